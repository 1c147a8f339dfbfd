//! Play-time session layer for the Gridwing Sudoku engine.
//!
//! [`Game`] wraps a generated (or imported) puzzle and handles everything
//! a player does to it: value edits with given-cell protection and
//! mistake highlighting, pencil-mark notes with automatic erasure,
//! bounded undo/redo history, and on-demand hints through
//! [`HintEngine`].

pub use self::{game::*, hint::*};

mod game;
mod hint;
mod history;
