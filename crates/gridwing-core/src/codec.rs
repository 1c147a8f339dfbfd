//! Flat string encoding of boards, notes, and cages.
//!
//! Boards cross the engine boundary as strings of base-13 digits, one per
//! cell in row-major order. Values `1..=9` use `1`-`9` and values `10..=12`
//! use `a`-`c`, so every supported board size fits a single digit per cell.
//! Empty cells use `0`, `.`, `-`, or `_` interchangeably, or one
//! caller-chosen separator character.
//!
//! # Examples
//!
//! ```
//! use gridwing_core::{GameType, codec};
//!
//! let board = codec::parse_board("023006005000050010060020000500500160", GameType::CLASSIC_6X6)?;
//! assert_eq!(board.value(0, 1), 2);
//! assert_eq!(board.value(0, 5), 6);
//! assert_eq!(codec::board_to_string(&board, '0').len(), 36);
//! # Ok::<(), codec::BoardParseError>(())
//! ```

use crate::{Board, Cage, GameType, Note};

/// The radix used for single-digit cell values (supports values up to 12).
const RADIX: u32 = 13;

/// Characters accepted as "empty cell" when no explicit separator is chosen.
pub const EMPTY_SEPARATORS: [char; 4] = ['0', '.', '-', '_'];

/// Error produced when a board string cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    /// The input string was empty.
    #[display("input string was empty")]
    Empty,
    /// The input length does not match the board's cell count.
    #[display("input has {actual} cells, expected {expected}")]
    Length {
        /// Expected number of cells (`size * size`).
        expected: usize,
        /// Number of characters found.
        actual: usize,
    },
    /// A character is not a digit in the board's radix.
    #[display("invalid digit {ch:?} at cell {index}")]
    InvalidDigit {
        /// The offending character.
        ch: char,
        /// Row-major cell index.
        index: usize,
    },
    /// A digit decodes to a value larger than the board size.
    #[display("value {value} at cell {index} exceeds board size {size}")]
    ValueOutOfRange {
        /// The decoded value.
        value: u8,
        /// Row-major cell index.
        index: usize,
        /// The board size.
        size: u8,
    },
}

/// Parses a board string using the default empty separators.
///
/// # Errors
///
/// Returns [`BoardParseError`] when the input is empty, has the wrong
/// length, or contains characters outside the board's digit set. Input is
/// never truncated or padded.
pub fn parse_board(s: &str, game_type: GameType) -> Result<Board, BoardParseError> {
    parse_board_impl(s, game_type, None)
}

/// Parses a board string where exactly `separator` marks empty cells.
///
/// With an explicit separator the digit `0` also decodes to an empty
/// cell, so stored boards that used `0` as their blank marker decode
/// unchanged.
///
/// # Errors
///
/// Returns [`BoardParseError`] under the same conditions as
/// [`parse_board`].
pub fn parse_board_with_separator(
    s: &str,
    game_type: GameType,
    separator: char,
) -> Result<Board, BoardParseError> {
    parse_board_impl(s, game_type, Some(separator))
}

fn parse_board_impl(
    s: &str,
    game_type: GameType,
    separator: Option<char>,
) -> Result<Board, BoardParseError> {
    if s.is_empty() {
        return Err(BoardParseError::Empty);
    }
    let expected = game_type.cell_count();
    let actual = s.chars().count();
    if actual != expected {
        return Err(BoardParseError::Length { expected, actual });
    }

    let mut board = Board::empty(game_type);
    let size = game_type.size();
    for (index, ch) in s.chars().enumerate() {
        let is_empty = match separator {
            Some(sep) => ch == sep,
            None => EMPTY_SEPARATORS.contains(&ch),
        };
        let value = if is_empty {
            0
        } else {
            let digit = ch
                .to_digit(RADIX)
                .ok_or(BoardParseError::InvalidDigit { ch, index })?;
            let value = u8::try_from(digit).expect("base-13 digits fit in u8");
            if value > size {
                return Err(BoardParseError::ValueOutOfRange { value, index, size });
            }
            value
        };
        let row = u8::try_from(index / usize::from(size)).expect("board sizes fit in u8");
        let col = u8::try_from(index % usize::from(size)).expect("board sizes fit in u8");
        board.cell_mut(row, col).value = value;
    }
    Ok(board)
}

/// Encodes a board as a flat digit string, using `empty` for empty cells.
#[must_use]
pub fn board_to_string(board: &Board, empty: char) -> String {
    board
        .cells()
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                empty
            } else {
                value_to_digit(cell.value)
            }
        })
        .collect()
}

fn value_to_digit(value: u8) -> char {
    char::from_digit(u32::from(value), RADIX).expect("cell values fit in one base-13 digit")
}

/// Error produced when a notes string cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum NoteParseError {
    /// An entry does not have the `row,col,value;` shape.
    #[display("malformed note entry at offset {offset}")]
    Malformed {
        /// Byte offset of the entry.
        offset: usize,
    },
    /// A coordinate or value digit is not valid base-13.
    #[display("invalid digit {ch:?} in note entry")]
    InvalidDigit {
        /// The offending character.
        ch: char,
    },
}

/// Encodes notes as `row,col,value;` triples in base-13 digits.
#[must_use]
pub fn notes_to_string(notes: &[Note]) -> String {
    let mut out = String::with_capacity(notes.len() * 6);
    for note in notes {
        out.push(coord_digit(note.row));
        out.push(',');
        out.push(coord_digit(note.col));
        out.push(',');
        out.push(coord_digit(note.value));
        out.push(';');
    }
    out
}

fn coord_digit(value: u8) -> char {
    char::from_digit(u32::from(value), RADIX).expect("coordinates fit in one base-13 digit")
}

/// Parses a notes string produced by [`notes_to_string`].
///
/// # Errors
///
/// Returns [`NoteParseError`] on malformed entries or invalid digits.
pub fn parse_notes(s: &str) -> Result<Vec<Note>, NoteParseError> {
    let mut notes = Vec::new();
    let mut offset = 0;
    for entry in s.split_terminator(';') {
        let mut parts = entry.split(',');
        let (Some(row), Some(col), Some(value), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(NoteParseError::Malformed { offset });
        };
        notes.push(Note::new(
            parse_coord(row, offset)?,
            parse_coord(col, offset)?,
            parse_coord(value, offset)?,
        ));
        offset += entry.len() + 1;
    }
    Ok(notes)
}

fn parse_coord(part: &str, offset: usize) -> Result<u8, NoteParseError> {
    let mut chars = part.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return Err(NoteParseError::Malformed { offset });
    };
    let digit = ch
        .to_digit(RADIX)
        .ok_or(NoteParseError::InvalidDigit { ch })?;
    Ok(u8::try_from(digit).expect("base-13 digits fit in u8"))
}

/// Error produced when a cage string cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CageParseError {
    /// An entry does not have the `id,sum,cells;` shape.
    #[display("malformed cage entry at index {index}")]
    Malformed {
        /// Entry index within the string.
        index: usize,
    },
    /// A number or coordinate could not be decoded.
    #[display("invalid number in cage entry at index {index}")]
    InvalidNumber {
        /// Entry index within the string.
        index: usize,
    },
}

/// Encodes cages as `id,sum,r0c0r1c1...;` entries.
///
/// Ids and sums are decimal; cell coordinates are single base-13 digits.
#[must_use]
pub fn cages_to_string(cages: &[Cage]) -> String {
    let mut out = String::new();
    for cage in cages {
        out.push_str(&cage.id.to_string());
        out.push(',');
        out.push_str(&cage.sum.to_string());
        out.push(',');
        for &(row, col) in &cage.cells {
            out.push(coord_digit(row));
            out.push(coord_digit(col));
        }
        out.push(';');
    }
    out
}

/// Parses a cage string produced by [`cages_to_string`].
///
/// # Errors
///
/// Returns [`CageParseError`] on malformed entries or undecodable numbers.
pub fn parse_cages(s: &str) -> Result<Vec<Cage>, CageParseError> {
    let mut cages = Vec::new();
    for (index, entry) in s.split_terminator(';').enumerate() {
        let mut parts = entry.split(',');
        let (Some(id), Some(sum), Some(cells), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CageParseError::Malformed { index });
        };
        let id: u16 = id
            .parse()
            .map_err(|_| CageParseError::InvalidNumber { index })?;
        let sum: u16 = sum
            .parse()
            .map_err(|_| CageParseError::InvalidNumber { index })?;
        let coords: Vec<u8> = cells
            .chars()
            .map(|ch| {
                ch.to_digit(RADIX)
                    .map(|d| u8::try_from(d).expect("base-13 digits fit in u8"))
                    .ok_or(CageParseError::InvalidNumber { index })
            })
            .collect::<Result<_, _>>()?;
        if coords.len() % 2 != 0 {
            return Err(CageParseError::Malformed { index });
        }
        let cells = coords.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
        cages.push(Cage { id, sum, cells });
    }
    Ok(cages)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_parse_6x6_literal() {
        let board =
            parse_board_with_separator("023006005000050010060020000500500160", GameType::CLASSIC_6X6, '0')
                .unwrap();

        assert_eq!(board.value(0, 0), 0);
        assert_eq!(board.value(0, 1), 2);
        assert_eq!(board.value(0, 2), 3);
        assert_eq!(board.value(0, 5), 6);
        assert_eq!(board.value(1, 2), 5);
        assert_eq!(board.value(2, 1), 5);
        assert_eq!(board.value(2, 4), 1);
        assert_eq!(board.value(5, 0), 5);
        assert_eq!(board.value(5, 3), 1);
        assert_eq!(board.value(5, 4), 6);
        assert_eq!(board.value(5, 5), 0);
        assert_eq!(board.filled_count(), 12);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            parse_board("", GameType::CLASSIC_6X6),
            Err(BoardParseError::Empty)
        );
        assert_eq!(
            parse_board("123", GameType::CLASSIC_6X6),
            Err(BoardParseError::Length {
                expected: 36,
                actual: 3
            })
        );

        let mut junk = "0".repeat(35);
        junk.push('x');
        assert_eq!(
            parse_board(&junk, GameType::CLASSIC_6X6),
            Err(BoardParseError::InvalidDigit { ch: 'x', index: 35 })
        );

        let mut too_big = "0".repeat(35);
        too_big.push('9');
        assert_eq!(
            parse_board(&too_big, GameType::CLASSIC_6X6),
            Err(BoardParseError::ValueOutOfRange {
                value: 9,
                index: 35,
                size: 6
            })
        );
    }

    #[test]
    fn test_parse_accepts_all_default_separators() {
        let mut s = "1".repeat(32);
        s.push_str("0.-_");
        let board = parse_board(&s, GameType::CLASSIC_6X6).unwrap();
        assert_eq!(board.value(5, 2), 0);
        assert_eq!(board.value(5, 3), 0);
        assert_eq!(board.value(5, 4), 0);
        assert_eq!(board.value(5, 5), 0);
    }

    #[test]
    fn test_12x12_uses_base_13_digits() {
        let mut values = vec![0u8; GameType::CLASSIC_12X12.cell_count()];
        values[0] = 10;
        values[1] = 11;
        values[2] = 12;
        let board = Board::from_values(GameType::CLASSIC_12X12, &values);

        let s = board_to_string(&board, '0');
        assert!(s.starts_with("abc"));

        let parsed = parse_board(&s, GameType::CLASSIC_12X12).unwrap();
        assert_eq!(parsed.values(), values);
    }

    #[test]
    fn test_notes_round_trip() {
        let notes = vec![Note::new(0, 3, 1), Note::new(0, 3, 5), Note::new(7, 7, 12)];
        let s = notes_to_string(&notes);
        assert_eq!(s, "0,3,1;0,3,5;7,7,c;");
        assert_eq!(parse_notes(&s).unwrap(), notes);
        assert_eq!(parse_notes("").unwrap(), Vec::new());
    }

    #[test]
    fn test_notes_rejects_malformed() {
        assert!(matches!(
            parse_notes("0,3;"),
            Err(NoteParseError::Malformed { .. })
        ));
        assert_eq!(
            parse_notes("0,z,1;"),
            Err(NoteParseError::InvalidDigit { ch: 'z' })
        );
    }

    #[test]
    fn test_cages_round_trip() {
        let cages = vec![
            Cage {
                id: 0,
                sum: 11,
                cells: vec![(0, 0), (0, 1), (1, 0)],
            },
            Cage {
                id: 1,
                sum: 7,
                cells: vec![(5, 11), (5, 10)],
            },
        ];
        let s = cages_to_string(&cages);
        assert_eq!(parse_cages(&s).unwrap(), cages);
    }

    proptest! {
        #[test]
        fn prop_board_string_round_trip(values in prop::collection::vec(0u8..=9, 81)) {
            let board = Board::from_values(GameType::CLASSIC_9X9, &values);
            let s = board_to_string(&board, '0');
            let reparsed = parse_board_with_separator(&s, GameType::CLASSIC_9X9, '0').unwrap();
            prop_assert_eq!(reparsed.values(), values);

            // parse(to_string(parse(s))) == parse(s)
            let again = parse_board_with_separator(
                &board_to_string(&reparsed, '0'),
                GameType::CLASSIC_9X9,
                '0',
            )
            .unwrap();
            prop_assert_eq!(again, reparsed);
        }
    }
}
