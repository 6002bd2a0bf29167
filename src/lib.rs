//! Rectoku solves generalized Sudoku puzzles whose sub-grids are rectangles
//! of any `width x height`, not just the classic 3x3 squares.
//!
//! A puzzle is modelled as a pure feasibility problem over binary decision
//! variables: one variable per `(row, column, value)` triple, with linear
//! "exactly one" constraints for cells, rows, columns and boxes, plus one
//! forcing constraint per clue. A solving engine decides feasibility and, on
//! success, the winning assignment is mapped back to a board. Enumeration of
//! further solutions works by adding a *cut* per found solution — a
//! constraint that forbids exactly that assignment — and re-solving until
//! the system becomes infeasible.
//!
//! # Core Concepts
//!
//! - **[`board::Board`]** and **[`board::BoxShape`]**: a validated puzzle
//!   grid and the rectangular sub-grid shape that defines its size.
//! - **[`model::ConstraintModel`]**: the binary linear constraint system for
//!   one board, including the mutable list of solution cuts.
//! - **[`engine::SolveEngine`]**: the narrow contract every solving backend
//!   implements. The crate ships
//!   [`engine::branch_bound::BranchBoundEngine`], a propagation plus
//!   branch-and-bound engine, as the default.
//! - **[`session::SolverSession`]**: the solve / extract / cut / reset cycle
//!   that drives enumeration.
//!
//! # Example
//!
//! ```
//! use rectoku::board::{Board, BoxShape};
//! use rectoku::session::SolverSession;
//!
//! let shape = BoxShape::new(2, 2).unwrap();
//! let board = Board::from_string("1003200040010000", shape, None).unwrap();
//!
//! let mut session = SolverSession::new(board);
//! assert!(session.solve_one().unwrap());
//!
//! let solution = session.current_solution().unwrap();
//! assert!(solution.is_complete());
//! ```
//!
pub mod board;
pub mod engine;
pub mod error;
pub mod extract;
pub mod generate;
pub mod model;
pub mod render;
pub mod session;
