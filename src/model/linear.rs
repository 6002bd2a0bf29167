//! Linear constraints over binary decision variables.

use crate::model::variables::VarId;

/// How a constraint's left-hand side relates to its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equal,
    AtMost,
}

/// A single linear constraint: `sum(coefficient * variable) relation rhs`.
///
/// The name is stable for the life of the model and is how cuts are removed
/// later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    name: String,
    terms: Vec<(VarId, i64)>,
    relation: Relation,
    rhs: i64,
}

impl LinearConstraint {
    pub fn new(
        name: impl Into<String>,
        terms: Vec<(VarId, i64)>,
        relation: Relation,
        rhs: i64,
    ) -> Self {
        Self {
            name: name.into(),
            terms,
            relation,
            rhs,
        }
    }

    /// An equality constraint.
    pub fn equal(name: impl Into<String>, terms: Vec<(VarId, i64)>, rhs: i64) -> Self {
        Self::new(name, terms, Relation::Equal, rhs)
    }

    /// A sum of the given variables with unit coefficients.
    pub fn unit_sum(
        name: impl Into<String>,
        vars: impl IntoIterator<Item = VarId>,
        relation: Relation,
        rhs: i64,
    ) -> Self {
        Self::new(
            name,
            vars.into_iter().map(|var| (var, 1)).collect(),
            relation,
            rhs,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn rhs(&self) -> i64 {
        self.rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_sum_expands_coefficients() {
        let constraint = LinearConstraint::unit_sum("c", [3, 5, 9], Relation::Equal, 1);
        assert_eq!(constraint.terms(), &[(3, 1), (5, 1), (9, 1)]);
        assert_eq!(constraint.relation(), Relation::Equal);
        assert_eq!(constraint.rhs(), 1);
        assert_eq!(constraint.name(), "c");
    }
}
