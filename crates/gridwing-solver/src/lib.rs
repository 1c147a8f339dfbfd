//! Backtracking solver for the Gridwing Sudoku engine.
//!
//! The solver classifies any puzzle as unsolvable, uniquely solvable, or
//! ambiguous, and produces a solution when one exists. It combines
//! constraint propagation (naked and hidden singles) with a
//! fewest-candidates-first backtracking search, counts solutions up to a
//! configurable cap, and supports cooperative cancellation.
//!
//! Every call returns an immutable [`SolveReport`]; the solver holds no
//! state between calls.

pub use self::{cancel::*, error::*, grade::*, propagate::SolveStats, solver::*};

mod cancel;
mod error;
mod grade;
mod grid;
mod propagate;
mod solver;
