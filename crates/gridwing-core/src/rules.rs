//! Candidate computation and placement validity.
//!
//! These helpers are the single authority for "which values are legal
//! here": the solver rebuilds the same information incrementally, the hint
//! engine consumes it as [`Note`]s, and the game layer uses
//! [`is_valid_placement`] for mistake highlighting after every edit.

use std::ops::Range;

use crate::{Board, Cell, Note, ValueSet};

/// Returns the row index range of the box containing `row`.
///
/// The range starts at `row - row % section_height` and spans one box.
#[must_use]
pub fn box_row_range(row: u8, section_height: u8) -> Range<u8> {
    let start = row - row % section_height;
    start..start + section_height
}

/// Returns the column index range of the box containing `col`.
#[must_use]
pub fn box_col_range(col: u8, section_width: u8) -> Range<u8> {
    let start = col - col % section_width;
    start..start + section_width
}

/// Computes the legal candidate values for the cell at `(row, col)`.
///
/// Starts from the full set `{1..=N}` and removes every value present
/// elsewhere in the cell's box, row, or column. The cell's own value is
/// ignored.
///
/// # Examples
///
/// ```
/// use gridwing_core::{GameType, ValueSet, codec, rules};
///
/// let board = codec::parse_board_with_separator(
///     "500600000020053001100350040000001005",
///     GameType::CLASSIC_6X6,
///     '0',
/// )?;
/// // r1c2 sees 5 and 6 in its row, 5 and 4 in its column, 5 in its box
/// assert_eq!(rules::candidates(&board, 0, 1), ValueSet::from_iter([1, 2, 3]));
/// # Ok::<(), gridwing_core::codec::BoardParseError>(())
/// ```
#[must_use]
pub fn candidates(board: &Board, row: u8, col: u8) -> ValueSet {
    let game_type = board.game_type();
    let mut candidates = ValueSet::full(game_type.size());

    for r in box_row_range(row, game_type.section_height()) {
        for c in box_col_range(col, game_type.section_width()) {
            let value = board.value(r, c);
            if value != 0 && (r != row || c != col) {
                candidates.remove(value);
            }
        }
    }

    for i in 0..game_type.size() {
        let in_col = board.value(i, col);
        if in_col != 0 && i != row {
            candidates.remove(in_col);
        }
        let in_row = board.value(row, i);
        if in_row != 0 && i != col {
            candidates.remove(in_row);
        }
    }

    candidates
}

/// Computes candidates for every empty cell and flattens them into notes.
///
/// This backs both the player's "fill notes" feature and the hint engine's
/// fallback when the caller supplies no notes.
#[must_use]
pub fn compute_notes(board: &Board) -> Vec<Note> {
    let mut notes = Vec::new();
    for cell in board.cells() {
        if cell.is_empty() {
            for value in candidates(board, cell.row, cell.col) {
                notes.push(Note::new(cell.row, cell.col, value));
            }
        }
    }
    notes
}

/// Returns `true` when no other cell in the same row, column, or box holds
/// the same non-zero value as `cell`.
///
/// An empty cell is always valid.
#[must_use]
pub fn is_valid_placement(board: &Board, cell: &Cell) -> bool {
    if cell.value == 0 {
        return true;
    }
    let game_type = board.game_type();

    for r in box_row_range(cell.row, game_type.section_height()) {
        for c in box_col_range(cell.col, game_type.section_width()) {
            if board.value(r, c) == cell.value && (r != cell.row || c != cell.col) {
                return false;
            }
        }
    }

    for i in 0..game_type.size() {
        if (board.value(i, cell.col) == cell.value && i != cell.row)
            || (board.value(cell.row, i) == cell.value && i != cell.col)
        {
            return false;
        }
    }
    true
}

/// Removes `cell.value` from the notes of every still-empty peer of `cell`.
///
/// Called after a value is placed; notes belonging to non-peer cells are
/// untouched.
pub fn auto_erase_notes(board: &Board, notes: &mut Vec<Note>, cell: &Cell) {
    if cell.value == 0 {
        return;
    }
    let game_type = board.game_type();
    let value = cell.value;

    notes.retain(|note| {
        if note.value != value {
            return true;
        }
        if !board.cell(note.row, note.col).is_empty() {
            return true;
        }
        let same_row = note.row == cell.row;
        let same_col = note.col == cell.col;
        let same_box = box_row_range(cell.row, game_type.section_height()).contains(&note.row)
            && box_col_range(cell.col, game_type.section_width()).contains(&note.col);
        !(same_row || same_col || same_box)
    });
}
