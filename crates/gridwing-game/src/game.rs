//! A playable game session.

use std::num::NonZero;

use gridwing_core::{Board, GameType, Note, rules};
use gridwing_generator::GeneratedPuzzle;
use rand::Rng;

use crate::{
    Hint, HintEngine, HintSettings,
    history::{History, Snapshot},
};

/// How many board states the undo history retains.
pub const HISTORY_CAPACITY: usize = 50;

/// Error produced by game edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The targeted cell is a given and cannot be modified.
    #[display("cell at row {row}, column {col} is a given and cannot be modified")]
    LockedCell {
        /// Row of the cell, 0-based.
        row: u8,
        /// Column of the cell, 0-based.
        col: u8,
    },
    /// The value does not fit the board.
    #[display("value {value} exceeds board size {size}")]
    ValueOutOfRange {
        /// The rejected value.
        value: u8,
        /// The board size.
        size: u8,
    },
    /// Problem and solution boards do not share a shape.
    #[display("problem and solution boards have different shapes")]
    BoardMismatch,
}

/// A Sudoku play session.
///
/// Tracks the live board, the player's notes, and a bounded undo/redo
/// history of immutable snapshots. Given cells are locked against edits;
/// every edit re-derives the error flags from
/// [`rules::is_valid_placement`].
///
/// # Examples
///
/// ```
/// use gridwing_core::{GameDifficulty, GameType};
/// use gridwing_game::Game;
/// use gridwing_generator::PuzzleGenerator;
///
/// let puzzle = PuzzleGenerator::new()
///     .generate(GameType::CLASSIC_6X6, GameDifficulty::Unspecified)
///     .unwrap();
/// let game = Game::new(&puzzle);
/// assert!(!game.is_solved());
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    solution: Board,
    notes: Vec<Note>,
    history: History,
    auto_erase_notes: bool,
}

impl Game {
    /// Creates a session from a generated puzzle.
    #[must_use]
    pub fn new(puzzle: &GeneratedPuzzle) -> Self {
        Self::from_parts(puzzle.problem.clone(), puzzle.solution.clone())
    }

    /// Creates a session from an initial board and its solution.
    ///
    /// Non-empty cells of `problem` become locked givens.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::BoardMismatch`] when the boards have different
    /// shapes.
    pub fn from_boards(problem: Board, solution: Board) -> Result<Self, GameError> {
        if problem.game_type() != solution.game_type() {
            return Err(GameError::BoardMismatch);
        }
        let mut problem = problem;
        problem.lock_givens();
        Ok(Self::from_parts(problem, solution))
    }

    fn from_parts(board: Board, solution: Board) -> Self {
        let initial = Snapshot {
            board: board.clone(),
            notes: Vec::new(),
        };
        Self {
            board,
            solution,
            notes: Vec::new(),
            history: History::new(
                NonZero::new(HISTORY_CAPACITY).expect("history capacity is non-zero"),
                initial,
            ),
            auto_erase_notes: true,
        }
    }

    /// Returns the live board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the solved board.
    #[must_use]
    pub fn solution(&self) -> &Board {
        &self.solution
    }

    /// Returns the player's notes.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns the board shape.
    #[must_use]
    pub fn game_type(&self) -> GameType {
        self.board.game_type()
    }

    /// Enables or disables automatic note erasure on placement.
    pub fn set_auto_erase_notes(&mut self, enabled: bool) {
        self.auto_erase_notes = enabled;
    }

    /// Places `value` at `(row, col)`, or clears the cell when `value` is
    /// zero.
    ///
    /// Recomputes error flags for the whole board and, when auto-erase is
    /// on, removes the placed value from the notes of every peer cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::LockedCell`] for given cells and
    /// [`GameError::ValueOutOfRange`] for values beyond the board size.
    pub fn set_value(&mut self, row: u8, col: u8, value: u8) -> Result<(), GameError> {
        let size = self.board.size();
        if value > size {
            return Err(GameError::ValueOutOfRange { value, size });
        }
        if self.board.cell(row, col).locked {
            return Err(GameError::LockedCell { row, col });
        }

        self.board.cell_mut(row, col).value = value;
        if value != 0 {
            self.notes
                .retain(|note| note.row != row || note.col != col);
            if self.auto_erase_notes {
                let placed = *self.board.cell(row, col);
                rules::auto_erase_notes(&self.board, &mut self.notes, &placed);
            }
        }
        self.refresh_errors();
        self.push_snapshot();
        Ok(())
    }

    /// Clears the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::LockedCell`] for given cells.
    pub fn clear_cell(&mut self, row: u8, col: u8) -> Result<(), GameError> {
        self.set_value(row, col, 0)
    }

    /// Adds the note when absent, removes it when present.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ValueOutOfRange`] for values beyond the board
    /// size.
    pub fn toggle_note(&mut self, note: Note) -> Result<(), GameError> {
        let size = self.board.size();
        if note.value == 0 || note.value > size {
            return Err(GameError::ValueOutOfRange {
                value: note.value,
                size,
            });
        }
        match self.notes.iter().position(|existing| *existing == note) {
            Some(index) => {
                self.notes.remove(index);
            }
            None => self.notes.push(note),
        }
        self.push_snapshot();
        Ok(())
    }

    /// Replaces the notes with the computed candidates of every empty
    /// cell.
    pub fn fill_notes(&mut self) {
        self.notes = rules::compute_notes(&self.board);
        self.push_snapshot();
    }

    /// Produces a hint for the current position, or `None` when no
    /// enabled technique applies.
    ///
    /// Player notes are used when any exist; otherwise candidates are
    /// computed on the fly.
    pub fn hint<R: Rng>(&self, settings: HintSettings, rng: &mut R) -> Option<Hint> {
        let engine = HintEngine::new(&self.board, &self.solution).with_settings(settings);
        let engine = if self.notes.is_empty() {
            engine
        } else {
            engine.with_notes(&self.notes)
        };
        engine.best_hint(rng)
    }

    /// Returns `true` when an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Steps back to the previous snapshot. Returns `false` when at the
    /// beginning of history.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.board = snapshot.board.clone();
                self.notes = snapshot.notes.clone();
                true
            }
            None => false,
        }
    }

    /// Returns `true` when a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Steps forward to the next snapshot. Returns `false` when at the
    /// end of history.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.board = snapshot.board.clone();
                self.notes = snapshot.notes.clone();
                true
            }
            None => false,
        }
    }

    /// Returns `true` when the board is full and free of rule violations.
    ///
    /// Any valid completion counts, not just the stored solution, so
    /// puzzles imported with multiple solutions behave sensibly.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.board.is_full()
            && self
                .board
                .cells()
                .iter()
                .all(|cell| rules::is_valid_placement(&self.board, cell))
    }

    fn refresh_errors(&mut self) {
        let flags: Vec<bool> = self
            .board
            .cells()
            .iter()
            .map(|cell| !cell.is_empty() && !rules::is_valid_placement(&self.board, cell))
            .collect();
        for (cell, error) in self.board.cells_mut().zip(flags) {
            cell.error = error;
        }
    }

    fn push_snapshot(&mut self) {
        self.history.push(Snapshot {
            board: self.board.clone(),
            notes: self.notes.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use gridwing_core::codec;

    use super::*;

    const PUZZLE_6X6: &str = "500600000020053001100350040000001005";
    const SOLVED_6X6: &str = "532614416523653241124356345162261435";

    fn game() -> Game {
        let problem =
            codec::parse_board_with_separator(PUZZLE_6X6, GameType::CLASSIC_6X6, '0').unwrap();
        let solution = codec::parse_board(SOLVED_6X6, GameType::CLASSIC_6X6).unwrap();
        Game::from_boards(problem, solution).unwrap()
    }

    #[test]
    fn test_given_cells_are_locked() {
        let mut game = game();
        assert_eq!(
            game.set_value(0, 0, 1),
            Err(GameError::LockedCell { row: 0, col: 0 })
        );
        assert_eq!(game.board().value(0, 0), 5);

        assert_eq!(
            game.set_value(0, 1, 9),
            Err(GameError::ValueOutOfRange { value: 9, size: 6 })
        );
    }

    #[test]
    fn test_conflicting_edit_sets_error_flags() {
        let mut game = game();
        // a second 5 in row 0
        game.set_value(0, 1, 5).unwrap();
        assert!(game.board().cell(0, 1).error);
        assert!(game.board().cell(0, 0).error);

        game.set_value(0, 1, 3).unwrap();
        assert!(!game.board().cell(0, 1).error);
        assert!(!game.board().cell(0, 0).error);
    }

    #[test]
    fn test_placement_erases_peer_notes() {
        let mut game = game();
        game.toggle_note(Note::new(0, 1, 3)).unwrap();
        game.toggle_note(Note::new(1, 1, 3)).unwrap();
        game.toggle_note(Note::new(5, 1, 3)).unwrap();
        game.toggle_note(Note::new(4, 4, 3)).unwrap();

        game.set_value(0, 1, 3).unwrap();
        // the cell's own notes and peer notes for 3 are gone
        assert_eq!(game.notes(), [Note::new(4, 4, 3)]);
    }

    #[test]
    fn test_toggle_note_round_trip() {
        let mut game = game();
        game.toggle_note(Note::new(2, 3, 4)).unwrap();
        assert_eq!(game.notes(), [Note::new(2, 3, 4)]);
        game.toggle_note(Note::new(2, 3, 4)).unwrap();
        assert!(game.notes().is_empty());

        assert_eq!(
            game.toggle_note(Note::new(0, 0, 0)),
            Err(GameError::ValueOutOfRange { value: 0, size: 6 })
        );
    }

    #[test]
    fn test_fill_notes_matches_candidates() {
        let mut game = game();
        game.fill_notes();
        assert_eq!(game.notes(), rules::compute_notes(game.board()));
    }

    #[test]
    fn test_undo_redo() {
        let mut game = game();
        assert!(!game.can_undo());

        game.set_value(0, 1, 3).unwrap();
        game.set_value(0, 2, 2).unwrap();
        assert!(game.can_undo());

        assert!(game.undo());
        assert_eq!(game.board().value(0, 2), 0);
        assert_eq!(game.board().value(0, 1), 3);

        assert!(game.can_redo());
        assert!(game.redo());
        assert_eq!(game.board().value(0, 2), 2);
        assert!(!game.redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut game = game();
        for i in 0..(HISTORY_CAPACITY + 20) {
            let value = u8::try_from(i % 6).unwrap();
            game.set_value(0, 1, value).unwrap();
        }
        let mut undos = 0;
        while game.undo() {
            undos += 1;
        }
        assert!(undos < HISTORY_CAPACITY);
    }

    #[test]
    fn test_is_solved_accepts_any_valid_completion() {
        let mut game = game();
        let solution = game.solution().clone();
        for cell in solution.cells() {
            if game.board().cell(cell.row, cell.col).is_empty() {
                game.set_value(cell.row, cell.col, cell.value).unwrap();
            }
        }
        assert!(game.is_solved());
    }

    #[test]
    fn test_hint_on_a_near_complete_board() {
        use rand::SeedableRng as _;

        let solution = codec::parse_board(SOLVED_6X6, GameType::CLASSIC_6X6).unwrap();
        let mut problem = solution.clone();
        problem.cell_mut(3, 3).value = 0;

        let game = Game::from_boards(problem, solution).unwrap();
        let mut rng = rand_pcg::Pcg64::seed_from_u64(5);
        let hint = game.hint(HintSettings::default(), &mut rng).unwrap();
        assert_eq!(hint.kind, crate::HintKind::FullHouse);
        assert_eq!((hint.target.row, hint.target.col), (3, 3));
        assert_eq!(hint.target.value, 3);
    }
}
