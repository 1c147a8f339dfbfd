//! The advanced hint engine.
//!
//! Given the current board, the known solution, and (optionally) the
//! player's notes, the engine produces at most one pedagogically ordered
//! hint. Techniques are tried in a fixed priority chain, first match wins:
//!
//! 1. wrong value check
//! 2. full house (boxes, then rows, then columns)
//! 3. naked single
//! 4. hidden single (row, column, or box)
//!
//! When several naked or hidden singles qualify, one is picked at random
//! through the injected RNG so repeated requests do not hammer the same
//! cell. Absence of a hint is a normal outcome, not an error.

use std::{collections::BTreeMap, fmt};

use gridwing_core::{Board, Cell, CellLabel, Note, rules};
use rand::Rng;
use rand::seq::IndexedRandom as _;

/// Which hint techniques are allowed to fire.
///
/// Everything is enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintSettings {
    /// Report cells whose value disagrees with the solution.
    pub wrong_value_check: bool,
    /// Report groups with a single empty cell.
    pub full_house: bool,
    /// Report cells with a single candidate.
    pub naked_single: bool,
    /// Report values with a single home in a row, column, or box.
    pub hidden_single: bool,
}

impl Default for HintSettings {
    fn default() -> Self {
        Self {
            wrong_value_check: true,
            full_house: true,
            naked_single: true,
            hidden_single: true,
        }
    }
}

/// Classification of a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum HintKind {
    /// A placed value disagrees with the solution.
    WrongValue,
    /// A group has exactly one empty cell left.
    FullHouse,
    /// A cell has exactly one candidate.
    NakedSingle,
    /// A value has exactly one candidate cell within a group.
    HiddenSingle,
}

/// The hint's detail message with its interpolated arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintDetail {
    /// Arguments of a wrong-value message.
    WrongValue {
        /// The value currently placed.
        value: u8,
        /// The offending cell.
        cell: CellLabel,
    },
    /// Arguments of a full-house message.
    FullHouse {
        /// The last empty cell of the group.
        cell: CellLabel,
        /// The forced value.
        value: u8,
    },
    /// Arguments of a naked-single message.
    NakedSingle {
        /// The cell with a single candidate.
        cell: CellLabel,
        /// The forced value.
        value: u8,
    },
    /// Arguments of a hidden-single message.
    HiddenSingle {
        /// The only cell of a group that can hold the value.
        cell: CellLabel,
        /// The forced value.
        value: u8,
    },
}

impl fmt::Display for HintDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongValue { value, cell } => {
                write!(f, "the value {value} at {cell} does not match the solution")
            }
            Self::FullHouse { cell, value } => {
                write!(f, "{cell} is the last empty cell of its group, so it must be {value}")
            }
            Self::NakedSingle { cell, value } => {
                write!(f, "{cell} has a single remaining candidate: {value}")
            }
            Self::HiddenSingle { cell, value } => {
                write!(f, "{value} fits only one cell of its group: {cell}")
            }
        }
    }
}

/// A single hint produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    /// Technique classification, used as the hint's title.
    pub kind: HintKind,
    /// Detail message and its arguments.
    pub detail: HintDetail,
    /// The cell the hint points at, carrying the value to place (or, for
    /// wrong-value hints, the offending value).
    pub target: Cell,
    /// Cells to highlight alongside the target, such as the full group of
    /// a full-house hint.
    pub helpers: Vec<Cell>,
}

/// Derives a single hint from the current and solved boards.
///
/// # Examples
///
/// ```
/// use gridwing_core::{GameType, codec};
/// use gridwing_game::{HintEngine, HintKind};
/// use rand::SeedableRng as _;
///
/// let solved = codec::parse_board("532614416523653241124356345162261435", GameType::CLASSIC_6X6)
///     .unwrap();
/// let mut board = solved.clone();
/// board.cell_mut(5, 5).value = 0;
///
/// let mut rng = rand_pcg::Pcg64::seed_from_u64(1);
/// let hint = HintEngine::new(&board, &solved).best_hint(&mut rng).unwrap();
/// assert_eq!(hint.kind, HintKind::FullHouse);
/// assert_eq!(hint.target.value, 5);
/// ```
#[derive(Debug)]
pub struct HintEngine<'a> {
    board: &'a Board,
    solved: &'a Board,
    notes: Vec<Note>,
    settings: HintSettings,
}

impl<'a> HintEngine<'a> {
    /// Creates an engine over the current and solved boards.
    ///
    /// Notes are computed from the current board; use
    /// [`with_notes`](Self::with_notes) to supply the player's own notes
    /// instead.
    ///
    /// # Panics
    ///
    /// Panics if the two boards have different shapes.
    #[must_use]
    pub fn new(board: &'a Board, solved: &'a Board) -> Self {
        assert_eq!(
            board.game_type(),
            solved.game_type(),
            "current and solved boards must share a shape"
        );
        Self {
            board,
            solved,
            notes: rules::compute_notes(board),
            settings: HintSettings::default(),
        }
    }

    /// Replaces the computed notes with caller-supplied ones.
    #[must_use]
    pub fn with_notes(mut self, notes: &[Note]) -> Self {
        self.notes = notes.to_vec();
        self
    }

    /// Restricts which techniques may fire.
    #[must_use]
    pub fn with_settings(mut self, settings: HintSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Runs the priority chain and returns the first applicable hint.
    pub fn best_hint<R: Rng>(&self, rng: &mut R) -> Option<Hint> {
        if self.settings.wrong_value_check
            && let Some(hint) = self.wrong_value()
        {
            return Some(hint);
        }
        if self.settings.full_house
            && let Some(hint) = self.full_house()
        {
            return Some(hint);
        }
        if self.settings.naked_single
            && let Some(hint) = self.naked_single(rng)
        {
            return Some(hint);
        }
        if self.settings.hidden_single
            && let Some(hint) = self.hidden_single(rng)
        {
            return Some(hint);
        }
        None
    }

    /// Reports the first cell, in row-major order, whose value disagrees
    /// with the solution.
    fn wrong_value(&self) -> Option<Hint> {
        for cell in self.board.cells() {
            let solved = self.solved.value(cell.row, cell.col);
            if cell.value != 0 && cell.value != solved {
                return Some(Hint {
                    kind: HintKind::WrongValue,
                    detail: HintDetail::WrongValue {
                        value: cell.value,
                        cell: cell.label(),
                    },
                    target: *cell,
                    helpers: Vec::new(),
                });
            }
        }
        None
    }

    /// Reports the first group (boxes, then rows, then columns) with
    /// exactly one empty cell.
    fn full_house(&self) -> Option<Hint> {
        let size = self.board.size();
        for index in 0..size {
            if let Some(hint) = self.full_house_in(self.board.box_cells(index)) {
                return Some(hint);
            }
        }
        for index in 0..size {
            if let Some(hint) = self.full_house_in(self.board.row_cells(index).iter()) {
                return Some(hint);
            }
        }
        for index in 0..size {
            if let Some(hint) = self.full_house_in(self.board.col_cells(index)) {
                return Some(hint);
            }
        }
        None
    }

    fn full_house_in<'b>(&self, group: impl Iterator<Item = &'b Cell>) -> Option<Hint> {
        let group: Vec<&Cell> = group.collect();
        let filled = group.iter().filter(|cell| !cell.is_empty()).count();
        if filled != usize::from(self.board.size()) - 1 {
            return None;
        }
        let empty = group.iter().find(|cell| cell.is_empty())?;
        let target = *self.solved.cell(empty.row, empty.col);
        Some(Hint {
            kind: HintKind::FullHouse,
            detail: HintDetail::FullHouse {
                cell: empty.label(),
                value: target.value,
            },
            target,
            helpers: group.into_iter().copied().collect(),
        })
    }

    /// Reports a random cell whose notes contain exactly one value.
    fn naked_single<R: Rng>(&self, rng: &mut R) -> Option<Hint> {
        let mut per_cell: BTreeMap<(u8, u8), u32> = BTreeMap::new();
        for note in &self.notes {
            *per_cell.entry((note.row, note.col)).or_default() += 1;
        }
        let singles: Vec<(u8, u8)> = per_cell
            .into_iter()
            .filter(|&(_, count)| count == 1)
            .map(|(pos, _)| pos)
            .collect();

        let &(row, col) = singles.choose(rng)?;
        let target = *self.solved.cell(row, col);
        Some(Hint {
            kind: HintKind::NakedSingle,
            detail: HintDetail::NakedSingle {
                cell: target.label(),
                value: target.value,
            },
            target,
            helpers: Vec::new(),
        })
    }

    /// Reports a random value that has exactly one candidate cell within
    /// some row, column, or box.
    fn hidden_single<R: Rng>(&self, rng: &mut R) -> Option<Hint> {
        let game_type = self.board.game_type();
        let mut groups: [BTreeMap<(u8, u8), Vec<(u8, u8)>>; 3] = Default::default();
        for note in &self.notes {
            let keys = [
                (note.row, note.value),
                (note.col, note.value),
                (game_type.box_of(note.row, note.col), note.value),
            ];
            for (group, key) in groups.iter_mut().zip(keys) {
                group.entry(key).or_default().push((note.row, note.col));
            }
        }

        let mut singles: Vec<(u8, u8)> = Vec::new();
        for group in &groups {
            for cells in group.values() {
                if let [only] = cells.as_slice()
                    && !singles.contains(only)
                {
                    singles.push(*only);
                }
            }
        }

        let &(row, col) = singles.choose(rng)?;
        let target = *self.solved.cell(row, col);
        Some(Hint {
            kind: HintKind::HiddenSingle,
            detail: HintDetail::HiddenSingle {
                cell: target.label(),
                value: target.value,
            },
            target,
            helpers: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use gridwing_core::{Board, GameType, codec};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    const SOLVED_6X6: &str = "532614416523653241124356345162261435";

    fn solved() -> Board {
        codec::parse_board(SOLVED_6X6, GameType::CLASSIC_6X6).unwrap()
    }

    fn rng() -> Pcg64 {
        Pcg64::seed_from_u64(99)
    }

    #[test]
    fn test_wrong_value_wins_the_chain() {
        let solved = solved();
        let mut board = solved.clone();
        board.cell_mut(0, 0).value = 4; // solution has 5 here
        board.cell_mut(5, 5).value = 0; // also a full house

        let hint = HintEngine::new(&board, &solved)
            .best_hint(&mut rng())
            .unwrap();
        assert_eq!(hint.kind, HintKind::WrongValue);
        assert_eq!((hint.target.row, hint.target.col), (0, 0));
        assert_eq!(hint.target.value, 4);
        assert_eq!(
            hint.detail.to_string(),
            "the value 4 at r1c1 does not match the solution"
        );
    }

    #[test]
    fn test_disabled_technique_is_skipped() {
        let solved = solved();
        let mut board = solved.clone();
        board.cell_mut(0, 0).value = 4;
        board.cell_mut(5, 5).value = 0;

        let settings = HintSettings {
            wrong_value_check: false,
            ..HintSettings::default()
        };
        let hint = HintEngine::new(&board, &solved)
            .with_settings(settings)
            .best_hint(&mut rng())
            .unwrap();
        assert_eq!(hint.kind, HintKind::FullHouse);
        assert_eq!((hint.target.row, hint.target.col), (5, 5));
        assert_eq!(hint.target.value, 5);
    }

    #[test]
    fn test_full_house_reports_group_helpers() {
        let solved = solved();
        let mut board = solved.clone();
        board.cell_mut(0, 0).value = 0;

        let hint = HintEngine::new(&board, &solved)
            .best_hint(&mut rng())
            .unwrap();
        assert_eq!(hint.kind, HintKind::FullHouse);
        assert_eq!((hint.target.row, hint.target.col), (0, 0));
        assert_eq!(hint.target.value, 5);
        // box 0 is scanned first; its six cells come back as helpers
        assert_eq!(hint.helpers.len(), 6);
        assert!(hint.helpers.iter().all(|cell| cell.row < 2 && cell.col < 3));
    }

    #[test]
    fn test_naked_single() {
        let solved = solved();
        let mut board = solved.clone();
        // a 2x2 rectangle inside box 0: every row, column, and box keeps
        // two empties, and each cleared cell has a single candidate
        board.cell_mut(0, 0).value = 0;
        board.cell_mut(0, 1).value = 0;
        board.cell_mut(1, 0).value = 0;
        board.cell_mut(1, 1).value = 0;

        let hint = HintEngine::new(&board, &solved)
            .best_hint(&mut rng())
            .unwrap();
        assert_eq!(hint.kind, HintKind::NakedSingle);
        assert!(hint.target.row < 2 && hint.target.col < 2);
        assert_eq!(
            hint.target.value,
            solved.value(hint.target.row, hint.target.col)
        );
    }

    #[test]
    fn test_hidden_single_from_supplied_notes() {
        let solved = solved();
        let board = Board::empty(GameType::CLASSIC_6X6);
        // no naked single (every cell carries two notes) and the 2x2
        // cluster is balanced in its rows, columns, and box, so only
        // (2, 2) is a hidden single
        let notes = vec![
            Note::new(0, 0, 1),
            Note::new(0, 0, 2),
            Note::new(0, 1, 1),
            Note::new(0, 1, 2),
            Note::new(1, 0, 1),
            Note::new(1, 0, 2),
            Note::new(1, 1, 1),
            Note::new(1, 1, 2),
            Note::new(2, 2, 5),
            Note::new(2, 2, 6),
        ];

        let hint = HintEngine::new(&board, &solved)
            .with_notes(&notes)
            .best_hint(&mut rng())
            .unwrap();
        assert_eq!(hint.kind, HintKind::HiddenSingle);
        assert_eq!((hint.target.row, hint.target.col), (2, 2));
        // the hint carries the solved value for the cell
        assert_eq!(hint.target.value, 3);
    }

    #[test]
    fn test_solved_board_yields_no_hint() {
        let solved = solved();
        let hint = HintEngine::new(&solved, &solved).best_hint(&mut rng());
        assert_eq!(hint, None);
    }
}
