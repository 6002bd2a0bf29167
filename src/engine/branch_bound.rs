//! The bundled solving backend: bounds propagation over linear constraints
//! on 0/1 variables, plus a depth-first branch-and-bound search.

use im::Vector;
use tracing::debug;

use crate::engine::work_list::WorkList;
use crate::engine::{Assignment, ConstraintId, SolveEngine, SolveOutcome};
use crate::error::Result;
use crate::model::linear::{LinearConstraint, Relation};
use crate::model::variables::VarId;
use crate::model::ConstraintModel;

/// Search counters, logged at debug level after every solve.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub backtracks: u64,
    pub propagations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VarState {
    Free,
    Zero,
    One,
}

/// Persistent domain store: cloning a search state is cheap, so every branch
/// gets its own copy and backtracking is just dropping it.
type Domains = Vector<VarState>;

/// A feasibility engine for binary linear constraint systems.
///
/// Propagation repeatedly tightens variable bounds per constraint (a
/// worklist algorithm: whenever a variable gets fixed, every constraint
/// mentioning it is revised again). When propagation alone does not settle
/// every variable, the search branches on the first free variable, trying 1
/// before 0 — with "exactly one" constraints everywhere, a positive guess
/// carries far more information.
#[derive(Debug, Default, Clone, Copy)]
pub struct BranchBoundEngine;

impl BranchBoundEngine {
    pub fn new() -> Self {
        Self
    }
}

struct SearchContext<'a> {
    constraints: Vec<&'a LinearConstraint>,
    /// For each variable, the constraints that mention it.
    depends: Vec<Vec<ConstraintId>>,
}

impl SolveEngine for BranchBoundEngine {
    fn solve(&self, model: &ConstraintModel) -> Result<SolveOutcome> {
        let constraints: Vec<&LinearConstraint> = model.constraints().collect();
        let mut depends = vec![Vec::new(); model.vars().len()];
        for (constraint_id, constraint) in constraints.iter().enumerate() {
            for &(var, _) in constraint.terms() {
                depends[var as usize].push(constraint_id);
            }
        }
        let ctx = SearchContext {
            constraints,
            depends,
        };
        let mut stats = SearchStats::default();

        let mut domains: Domains = std::iter::repeat(VarState::Free)
            .take(model.vars().len())
            .collect();
        let mut worklist = WorkList::new();
        for constraint_id in 0..ctx.constraints.len() {
            worklist.push_back(constraint_id);
        }

        let outcome = if propagate(&ctx, &mut domains, &mut worklist, &mut stats) {
            match search(&ctx, domains, 0, &mut stats) {
                Some(solved) => SolveOutcome::Feasible(Assignment::new(
                    solved.iter().map(|state| *state == VarState::One).collect(),
                )),
                None => SolveOutcome::Infeasible,
            }
        } else {
            SolveOutcome::Infeasible
        };

        debug!(
            nodes = stats.nodes_visited,
            backtracks = stats.backtracks,
            propagations = stats.propagations,
            feasible = matches!(outcome, SolveOutcome::Feasible(_)),
            "search finished"
        );
        Ok(outcome)
    }
}

fn search(
    ctx: &SearchContext<'_>,
    domains: Domains,
    from: usize,
    stats: &mut SearchStats,
) -> Option<Domains> {
    stats.nodes_visited += 1;

    // Fixing is monotonic along a path, so scanning can resume at `from`.
    let Some(var) = next_free(&domains, from) else {
        // Every variable is fixed and the worklist drained without conflict:
        // all constraints hold exactly.
        return Some(domains);
    };

    for guess in [VarState::One, VarState::Zero] {
        let mut child = domains.update(var, guess);
        let mut worklist = WorkList::new();
        for &constraint_id in &ctx.depends[var] {
            worklist.push_back(constraint_id);
        }
        if propagate(ctx, &mut child, &mut worklist, stats) {
            if let Some(found) = search(ctx, child, var + 1, stats) {
                return Some(found);
            }
        }
        stats.backtracks += 1;
    }

    None
}

fn next_free(domains: &Domains, from: usize) -> Option<usize> {
    domains
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, state)| **state == VarState::Free)
        .map(|(var, _)| var)
}

/// Revises queued constraints until the list drains (returns `true`) or one
/// of them has an empty feasibility window (returns `false`).
fn propagate(
    ctx: &SearchContext<'_>,
    domains: &mut Domains,
    worklist: &mut WorkList,
    stats: &mut SearchStats,
) -> bool {
    while let Some(constraint_id) = worklist.pop_front() {
        stats.propagations += 1;
        match revise(ctx.constraints[constraint_id], domains) {
            Revision::Conflict => return false,
            Revision::Fixed(fixed) => {
                for var in fixed {
                    for &dependent in &ctx.depends[var as usize] {
                        if dependent != constraint_id {
                            worklist.push_back(dependent);
                        }
                    }
                }
            }
            Revision::Unchanged => {}
        }
    }
    true
}

enum Revision {
    Conflict,
    Fixed(Vec<VarId>),
    Unchanged,
}

/// Tightens one constraint to its fixpoint against the current domains.
///
/// Activity bounds: a free 0/1 variable contributes `[min(a, 0), max(a, 0)]`
/// for its coefficient `a`, a fixed one contributes its exact value. The
/// constraint is conflicting when its bound falls outside the activity
/// window; a free variable is fixed whenever one of its two sides is
/// impossible. After every fix the activities are recomputed, so leaving
/// this function means the constraint's window is currently satisfiable.
fn revise(constraint: &LinearConstraint, domains: &mut Domains) -> Revision {
    let mut fixed = Vec::new();
    loop {
        let mut min_activity = 0i64;
        let mut max_activity = 0i64;
        for &(var, coefficient) in constraint.terms() {
            match domains[var as usize] {
                VarState::Zero => {}
                VarState::One => {
                    min_activity += coefficient;
                    max_activity += coefficient;
                }
                VarState::Free => {
                    min_activity += coefficient.min(0);
                    max_activity += coefficient.max(0);
                }
            }
        }

        let rhs = constraint.rhs();
        let conflicting = match constraint.relation() {
            Relation::Equal => rhs < min_activity || rhs > max_activity,
            Relation::AtMost => min_activity > rhs,
        };
        if conflicting {
            return Revision::Conflict;
        }

        let mut changed = false;
        for &(var, coefficient) in constraint.terms() {
            if domains[var as usize] != VarState::Free {
                continue;
            }
            let low = coefficient.min(0);
            let high = coefficient.max(0);

            // The high side of this variable alone would overshoot the bound.
            if min_activity - low + high > rhs {
                let state = if coefficient > 0 {
                    VarState::Zero
                } else {
                    VarState::One
                };
                domains.set(var as usize, state);
                fixed.push(var);
                changed = true;
                break;
            }
            // For equalities, the low side alone would undershoot it.
            if constraint.relation() == Relation::Equal && max_activity - high + low < rhs {
                let state = if coefficient > 0 {
                    VarState::One
                } else {
                    VarState::Zero
                };
                domains.set(var as usize, state);
                fixed.push(var);
                changed = true;
                break;
            }
        }
        if !changed {
            return if fixed.is_empty() {
                Revision::Unchanged
            } else {
                Revision::Fixed(fixed)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::board::{Board, BoxShape};

    use super::*;

    fn free_domains(len: usize) -> Domains {
        std::iter::repeat(VarState::Free).take(len).collect()
    }

    #[test]
    fn revise_forces_the_last_candidate_on() {
        // x0 + x1 + x2 = 1 with x0 = x1 = 0 forces x2 = 1.
        let constraint = LinearConstraint::unit_sum("c", [0, 1, 2], Relation::Equal, 1);
        let mut domains = free_domains(3);
        domains.set(0, VarState::Zero);
        domains.set(1, VarState::Zero);

        let Revision::Fixed(fixed) = revise(&constraint, &mut domains) else {
            panic!("expected a fix");
        };
        assert_eq!(fixed, vec![2]);
        assert_eq!(domains[2], VarState::One);
    }

    #[test]
    fn revise_turns_competitors_off() {
        // x0 + x1 + x2 = 1 with x0 = 1 forces x1 = x2 = 0.
        let constraint = LinearConstraint::unit_sum("c", [0, 1, 2], Relation::Equal, 1);
        let mut domains = free_domains(3);
        domains.set(0, VarState::One);

        let Revision::Fixed(fixed) = revise(&constraint, &mut domains) else {
            panic!("expected fixes");
        };
        assert_eq!(fixed, vec![1, 2]);
        assert_eq!(domains[1], VarState::Zero);
        assert_eq!(domains[2], VarState::Zero);
    }

    #[test]
    fn revise_detects_an_empty_window() {
        // x0 + x1 = 1 with both already 1 overshoots.
        let constraint = LinearConstraint::unit_sum("c", [0, 1], Relation::Equal, 1);
        let mut domains = free_domains(2);
        domains.set(0, VarState::One);
        domains.set(1, VarState::One);
        assert!(matches!(
            revise(&constraint, &mut domains),
            Revision::Conflict
        ));
    }

    #[test]
    fn revise_applies_cut_style_bounds() {
        // x0 + x1 + x2 <= 2 with x0 = x1 = 1 forces x2 = 0.
        let constraint = LinearConstraint::unit_sum("cut", [0, 1, 2], Relation::AtMost, 2);
        let mut domains = free_domains(3);
        domains.set(0, VarState::One);
        domains.set(1, VarState::One);

        let Revision::Fixed(fixed) = revise(&constraint, &mut domains) else {
            panic!("expected a fix");
        };
        assert_eq!(fixed, vec![2]);
        assert_eq!(domains[2], VarState::Zero);
    }

    #[test]
    fn revise_handles_negative_coefficients() {
        // x0 - x1 = 1 forces x0 = 1 and x1 = 0.
        let constraint =
            LinearConstraint::new("c", vec![(0, 1), (1, -1)], Relation::Equal, 1);
        let mut domains = free_domains(2);

        let Revision::Fixed(fixed) = revise(&constraint, &mut domains) else {
            panic!("expected fixes");
        };
        assert_eq!(fixed.len(), 2);
        assert_eq!(domains[0], VarState::One);
        assert_eq!(domains[1], VarState::Zero);
    }

    #[test]
    fn solves_a_single_cell_board() {
        let board = Board::empty(BoxShape::new(1, 1).unwrap());
        let model = ConstraintModel::build(&board);
        let outcome = BranchBoundEngine::new().solve(&model).unwrap();
        let SolveOutcome::Feasible(assignment) = outcome else {
            panic!("expected feasible");
        };
        assert!(assignment.is_on(model.vars().id(0, 0, 1)));
    }

    #[test]
    fn empty_four_by_four_is_feasible() {
        let board = Board::empty(BoxShape::new(2, 2).unwrap());
        let model = ConstraintModel::build(&board);
        let outcome = BranchBoundEngine::new().solve(&model).unwrap();
        assert!(matches!(outcome, SolveOutcome::Feasible(_)));
    }

    #[test]
    fn conflicting_clues_are_infeasible() {
        // The value 1 twice in the first row.
        let shape = BoxShape::new(2, 2).unwrap();
        let board = Board::from_string("1100000000000000", shape, None).unwrap();
        let model = ConstraintModel::build(&board);
        let outcome = BranchBoundEngine::new().solve(&model).unwrap();
        assert_eq!(outcome, SolveOutcome::Infeasible);
    }

    #[test]
    fn a_cut_over_the_only_solution_is_infeasible() {
        let board = Board::empty(BoxShape::new(1, 1).unwrap());
        let mut model = ConstraintModel::build(&board);
        model.add_cut(vec![model.vars().id(0, 0, 1)]);
        let outcome = BranchBoundEngine::new().solve(&model).unwrap();
        assert_eq!(outcome, SolveOutcome::Infeasible);
    }
}
