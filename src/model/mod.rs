//! The binary constraint model: decision variables, linear constraints and
//! the builder that encodes a board's Sudoku rules.

pub mod linear;
pub mod variables;

use tracing::debug;

use crate::board::{Board, BoxShape};
use crate::model::linear::{LinearConstraint, Relation};
use crate::model::variables::{VarId, VarTable};

/// The full constraint system for one board.
///
/// Holds the variable table, the base constraints (cell, row, column, box
/// and clue families) and an ordered list of active solution cuts. Cuts can
/// be appended and removed without touching variables or base constraints;
/// cut names stay unique across a session because the counter never rewinds.
#[derive(Debug, Clone)]
pub struct ConstraintModel {
    shape: BoxShape,
    vars: VarTable,
    base: Vec<LinearConstraint>,
    cuts: Vec<LinearConstraint>,
    next_cut: usize,
}

impl ConstraintModel {
    /// Encodes `board` into a constraint system.
    ///
    /// A pure function of the board: building twice yields an equivalent
    /// fresh model, never an accumulation. Emits, in order:
    ///
    /// - `cell_{r}_{c}_one_value`: the `size` variables of one cell sum to 1.
    /// - `row_{r}_has_value_{v}` / `col_{c}_has_value_{v}`: each value occurs
    ///   exactly once per row and per column.
    /// - `box_{br}_{bc}_has_value_{v}`: each value occurs exactly once per
    ///   box; a box spans `height` rows by `width` columns, which is what
    ///   makes non-square shapes come out right.
    /// - `fixed_value_at_{r}_{c}`: forces the matching variable of each clue.
    ///
    /// There is no objective; the model is a pure feasibility problem.
    /// Contradictory clues still build fine — they are the solve step's
    /// business to report as infeasible.
    pub fn build(board: &Board) -> Self {
        let shape = board.shape();
        let size = shape.size();
        let vars = VarTable::new(size);
        let values = || 1..=size as u32;
        let mut base = Vec::with_capacity(3 * size * size + board.filled_count());

        for r in 0..size {
            for c in 0..size {
                base.push(LinearConstraint::unit_sum(
                    format!("cell_{}_{}_one_value", r + 1, c + 1),
                    values().map(|v| vars.id(r, c, v)),
                    Relation::Equal,
                    1,
                ));
            }
        }
        for r in 0..size {
            for v in values() {
                base.push(LinearConstraint::unit_sum(
                    format!("row_{}_has_value_{}", r + 1, v),
                    (0..size).map(|c| vars.id(r, c, v)),
                    Relation::Equal,
                    1,
                ));
            }
        }
        for c in 0..size {
            for v in values() {
                base.push(LinearConstraint::unit_sum(
                    format!("col_{}_has_value_{}", c + 1, v),
                    (0..size).map(|r| vars.id(r, c, v)),
                    Relation::Equal,
                    1,
                ));
            }
        }
        for box_r in 0..shape.box_rows() {
            for box_c in 0..shape.box_cols() {
                for v in values() {
                    let members = (0..shape.height()).flat_map(move |r| {
                        (0..shape.width()).map(move |c| {
                            vars.id(box_r * shape.height() + r, box_c * shape.width() + c, v)
                        })
                    });
                    base.push(LinearConstraint::unit_sum(
                        format!("box_{}_{}_has_value_{}", box_r + 1, box_c + 1, v),
                        members,
                        Relation::Equal,
                        1,
                    ));
                }
            }
        }
        for (r, c, value) in board.filled_cells() {
            base.push(LinearConstraint::equal(
                format!("fixed_value_at_{}_{}", r + 1, c + 1),
                vec![(vars.id(r, c, value), 1)],
                1,
            ));
        }

        debug!(
            variables = vars.len(),
            constraints = base.len(),
            "constraint model built"
        );
        Self {
            shape,
            vars,
            base,
            cuts: Vec::new(),
            next_cut: 1,
        }
    }

    pub fn shape(&self) -> BoxShape {
        self.shape
    }

    pub fn vars(&self) -> &VarTable {
        &self.vars
    }

    pub fn base_constraints(&self) -> &[LinearConstraint] {
        &self.base
    }

    pub fn cuts(&self) -> &[LinearConstraint] {
        &self.cuts
    }

    /// Base constraints followed by the active cuts.
    pub fn constraints(&self) -> impl Iterator<Item = &LinearConstraint> {
        self.base.iter().chain(self.cuts.iter())
    }

    pub fn constraint_count(&self) -> usize {
        self.base.len() + self.cuts.len()
    }

    /// Appends a no-good cut over the variables that matched a solution.
    ///
    /// The cut `sum(matching) <= size^2 - 1` forbids that exact assignment
    /// from recurring: any other feasible assignment disagrees on at least
    /// one cell. Returns the fresh cut's name.
    pub fn add_cut(&mut self, matching: Vec<VarId>) -> &str {
        let size = self.shape.size();
        let name = format!("cut_{}", self.next_cut);
        self.next_cut += 1;
        debug!(%name, terms = matching.len(), "adding solution cut");
        self.cuts.push(LinearConstraint::unit_sum(
            name,
            matching,
            Relation::AtMost,
            (size * size - 1) as i64,
        ));
        self.cuts[self.cuts.len() - 1].name()
    }

    /// Removes a single cut by name; returns whether one was removed.
    pub fn remove_cut(&mut self, name: &str) -> bool {
        let before = self.cuts.len();
        self.cuts.retain(|cut| cut.name() != name);
        self.cuts.len() < before
    }

    /// Drops every active cut, restoring the clue-only constraint system.
    pub fn clear_cuts(&mut self) {
        self.cuts.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::board::{Board, BoxShape};
    use crate::model::linear::Relation;

    use super::*;

    fn empty_board(width: usize, height: usize) -> Board {
        Board::empty(BoxShape::new(width, height).unwrap())
    }

    #[test]
    fn emits_three_families_for_empty_board() {
        let model = ConstraintModel::build(&empty_board(2, 2));
        // 16 cell + 16 row + 16 col + 16 box, no clues.
        assert_eq!(model.constraint_count(), 64);
        assert_eq!(model.vars().len(), 64);
    }

    #[test]
    fn clue_constraints_are_appended() {
        let shape = BoxShape::new(2, 2).unwrap();
        let board = Board::from_string("1003200040010000", shape, None).unwrap();
        let model = ConstraintModel::build(&board);
        assert_eq!(model.constraint_count(), 64 + 5);

        let clue = model
            .constraints()
            .find(|c| c.name() == "fixed_value_at_1_1")
            .unwrap();
        assert_eq!(clue.relation(), Relation::Equal);
        assert_eq!(clue.rhs(), 1);
        assert_eq!(clue.terms(), &[(model.vars().id(0, 0, 1), 1)]);
    }

    #[test]
    fn constraint_names_follow_the_grid() {
        let model = ConstraintModel::build(&empty_board(3, 3));
        for name in [
            "cell_1_1_one_value",
            "cell_9_9_one_value",
            "row_1_has_value_1",
            "row_9_has_value_9",
            "col_5_has_value_3",
            "box_1_1_has_value_1",
            "box_3_3_has_value_9",
        ] {
            assert!(
                model.constraints().any(|c| c.name() == name),
                "missing constraint {name}"
            );
        }
    }

    #[test]
    fn box_constraints_cover_rectangular_blocks() {
        // 2 wide, 3 tall: boxes span 3 rows and 2 columns.
        let model = ConstraintModel::build(&empty_board(2, 3));
        let constraint = model
            .constraints()
            .find(|c| c.name() == "box_1_1_has_value_1")
            .unwrap();
        let cells: Vec<_> = constraint
            .terms()
            .iter()
            .map(|&(var, _)| {
                let (r, c, v) = model.vars().cell(var);
                assert_eq!(v, 1);
                (r, c)
            })
            .collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn second_box_column_starts_after_width() {
        let model = ConstraintModel::build(&empty_board(2, 3));
        let constraint = model
            .constraints()
            .find(|c| c.name() == "box_1_2_has_value_4")
            .unwrap();
        let (row, col, value) = model.vars().cell(constraint.terms()[0].0);
        assert_eq!((row, col, value), (0, 2, 4));
    }

    #[test]
    fn cuts_are_named_monotonically() {
        let mut model = ConstraintModel::build(&empty_board(2, 2));
        let vars: Vec<_> = (0..16).map(|i| model.vars().id(i / 4, i % 4, 1)).collect();
        assert_eq!(model.add_cut(vars.clone()), "cut_1");
        assert_eq!(model.add_cut(vars.clone()), "cut_2");
        assert_eq!(model.cuts().len(), 2);
        assert_eq!(model.cuts()[0].relation(), Relation::AtMost);
        assert_eq!(model.cuts()[0].rhs(), 15);

        model.clear_cuts();
        assert!(model.cuts().is_empty());
        // The counter never rewinds, so names stay unique.
        assert_eq!(model.add_cut(vars), "cut_3");
    }

    #[test]
    fn remove_cut_by_name() {
        let mut model = ConstraintModel::build(&empty_board(2, 2));
        let vars: Vec<_> = (0..4).map(|c| model.vars().id(0, c, 1)).collect();
        model.add_cut(vars.clone());
        model.add_cut(vars);
        assert!(model.remove_cut("cut_1"));
        assert!(!model.remove_cut("cut_1"));
        assert_eq!(model.cuts().len(), 1);
        assert_eq!(model.cuts()[0].name(), "cut_2");
    }
}
