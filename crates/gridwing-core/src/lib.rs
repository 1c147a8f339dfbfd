//! Core board model for the Gridwing Sudoku engine.
//!
//! This crate defines the data types shared by the solver, generator, and
//! game layers:
//!
//! - [`GameType`] - board shape descriptor (size, box dimensions, killer flag)
//! - [`GameDifficulty`] - requested/classified difficulty tier
//! - [`Board`] / [`Cell`] - a row-major grid of cells
//! - [`Note`] - a player-visible pencil mark
//! - [`Cage`] - a killer-variant cage with a target sum
//! - [`ValueSet`] - a bitset of cell values 1..=N
//! - [`codec`] - flat digit-string encoding and decoding
//! - [`rules`] - candidate computation and placement validity

pub use self::{board::*, game_type::*, value_set::*};

mod board;
pub mod codec;
mod game_type;
pub mod rules;
mod value_set;
