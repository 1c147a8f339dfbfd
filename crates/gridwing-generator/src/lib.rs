//! Difficulty-calibrated puzzle generation for the Gridwing Sudoku engine.
//!
//! Generation is seeded and reproducible: a [`PuzzleSeed`] plus a board
//! shape and difficulty always produce the same puzzle. Internally each
//! attempt builds a random solved grid, digs givens out while re-checking
//! uniqueness after every removal, and grades the result until it matches
//! the requested difficulty.
//!
//! Killer variants additionally partition the solved grid into sum cages
//! via [`CageGenerator`].

pub use self::{cage::*, generator::*, seed::*};

mod cage;
mod generator;
mod seed;
