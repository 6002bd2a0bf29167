//! The solving session: solve / extract / cut / reset, and multi-solution
//! enumeration on top.

use tracing::debug;

use crate::board::{Board, BoxShape};
use crate::engine::branch_bound::BranchBoundEngine;
use crate::engine::{SolveEngine, SolveOutcome};
use crate::error::{Error, Result};
use crate::extract::extract;
use crate::model::variables::VarId;
use crate::model::ConstraintModel;

/// One puzzle's solving state: the board, the lazily built model, the
/// current solution and the active cuts (owned by the model).
///
/// Every mutating operation takes `&mut self`, so sharing a session across
/// threads requires external synchronization by construction; independent
/// puzzles solve in parallel by giving each its own session.
pub struct SolverSession {
    board: Board,
    engine: Box<dyn SolveEngine>,
    model: Option<ConstraintModel>,
    current: Option<Board>,
}

impl SolverSession {
    /// A session over the bundled [`BranchBoundEngine`].
    pub fn new(board: Board) -> Self {
        Self::with_engine(board, Box::new(BranchBoundEngine::new()))
    }

    /// A session over any [`SolveEngine`] implementation.
    pub fn with_engine(board: Board, engine: Box<dyn SolveEngine>) -> Self {
        Self {
            board,
            engine,
            model: None,
            current: None,
        }
    }

    /// Decodes a puzzle string and opens a session on it.
    pub fn from_string(input: &str, shape: BoxShape, delimiter: Option<char>) -> Result<Self> {
        Ok(Self::new(Board::from_string(input, shape, delimiter)?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The constraint model, once the first solve has built it.
    pub fn model(&self) -> Option<&ConstraintModel> {
        self.model.as_ref()
    }

    /// Runs one solve against the current constraint system.
    ///
    /// Builds the model on first use. On a feasible outcome the extracted
    /// solution becomes the current solution and `true` is returned; on an
    /// infeasible one the current solution is cleared and `false` is
    /// returned. An engine failure propagates as [`Error::Engine`] — it is
    /// deliberately not folded into "no solution".
    pub fn solve_one(&mut self) -> Result<bool> {
        let model = self
            .model
            .get_or_insert_with(|| ConstraintModel::build(&self.board));
        match self.engine.solve(model)? {
            SolveOutcome::Feasible(assignment) => {
                let solution = extract(model, &assignment)?;
                debug!(cuts = model.cuts().len(), "found a solution");
                self.current = Some(solution);
                Ok(true)
            }
            SolveOutcome::Infeasible => {
                debug!(cuts = model.cuts().len(), "system is infeasible");
                self.current = None;
                Ok(false)
            }
        }
    }

    /// The most recent solution, if the last solve found one.
    pub fn current_solution(&self) -> Result<&Board> {
        self.current.as_ref().ok_or(Error::NoCurrentSolution)
    }

    /// Forbids the current solution from being found again.
    ///
    /// Appends a cut requiring at least one of the `size^2` matched
    /// variables to differ next time. Fails with
    /// [`Error::NoCurrentSolution`] when there is nothing to cut.
    pub fn cut_current_solution(&mut self) -> Result<()> {
        let solution = self.current.as_ref().ok_or(Error::NoCurrentSolution)?;
        let model = self.model.as_mut().ok_or(Error::NoCurrentSolution)?;
        debug_assert!(solution.is_complete());
        let matching: Vec<VarId> = solution
            .filled_cells()
            .map(|(row, col, value)| model.vars().id(row, col, value))
            .collect();
        model.add_cut(matching);
        Ok(())
    }

    /// Enumerates distinct solutions in discovery order.
    ///
    /// Repeats solve / record / cut until the system goes infeasible or
    /// `max_solutions` boards are collected (`None` means unbounded — safe,
    /// because every cut strictly shrinks a finite feasible set). Each
    /// returned board is a copy, detached from session state.
    pub fn find_all(&mut self, max_solutions: Option<usize>) -> Result<Vec<Board>> {
        let mut solutions = Vec::new();
        while max_solutions.map_or(true, |max| solutions.len() < max) {
            if !self.solve_one()? {
                break;
            }
            solutions.push(self.current_solution()?.clone());
            self.cut_current_solution()?;
        }
        debug!(count = solutions.len(), "enumeration finished");
        Ok(solutions)
    }

    /// Drops every cut and the current solution, returning the session to
    /// its clue-only state. A no-op when nothing was cut; variables and base
    /// constraints are kept as built.
    pub fn reset(&mut self) {
        if let Some(model) = self.model.as_mut() {
            model.clear_cuts();
        }
        self.current = None;
    }
}
