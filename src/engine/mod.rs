//! The contract between the constraint model and whatever decides its
//! feasibility.
//!
//! The rest of the crate depends on solving only through [`SolveEngine`], so
//! the bundled [`branch_bound::BranchBoundEngine`] can be swapped for an
//! exact-cover engine or a third-party MIP library without touching the
//! builder, extractor or enumeration logic.

pub mod branch_bound;
mod work_list;

use crate::error::Result;
use crate::model::variables::VarId;
use crate::model::ConstraintModel;

/// Index of a constraint within one solve's flattened constraint list.
pub type ConstraintId = usize;

/// A solving backend for binary linear constraint systems.
///
/// Implementations need not be deterministic: repeated solves of the same
/// under-constrained model may legitimately return different feasible
/// assignments. Enumeration therefore relies on solution cuts, never on
/// reseeding.
pub trait SolveEngine {
    /// Decides feasibility of the model's full constraint system (base
    /// constraints plus active cuts).
    ///
    /// # Returns
    ///
    /// * `Ok(SolveOutcome::Feasible(assignment))` with a value for every
    ///   variable when the system has a solution.
    /// * `Ok(SolveOutcome::Infeasible)` when it provably has none.
    /// * `Err(Error::Engine(..))` when the backend failed to decide either
    ///   way; this is surfaced to callers, not coalesced with infeasibility.
    fn solve(&self, model: &ConstraintModel) -> Result<SolveOutcome>;
}

/// The two answers a backend may give.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Feasible(Assignment),
    Infeasible,
}

/// A complete 0/1 valuation of a model's variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    pub fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the given variable is set to 1. Out-of-range ids read as 0.
    pub fn is_on(&self, var: VarId) -> bool {
        self.values.get(var as usize).copied().unwrap_or(false)
    }
}
