//! Board shape and difficulty descriptors.

use std::fmt::{self, Display};

/// The largest supported board size.
///
/// Values are encoded as single base-13 digits at the string boundary, so
/// boards larger than 12 are rejected at construction time.
pub const MAX_SIZE: u8 = 12;

/// A board shape descriptor.
///
/// A game type fixes the board size `N`, the dimensions of its boxes
/// (`section_width` x `section_height`, whose product must equal `N`), and
/// whether the killer variant (cage sum constraints) is in play.
///
/// # Examples
///
/// ```
/// use gridwing_core::GameType;
///
/// let classic = GameType::CLASSIC_9X9;
/// assert_eq!(classic.size(), 9);
/// assert_eq!(classic.cell_count(), 81);
/// assert!(!classic.is_killer());
///
/// // Arbitrary shapes are validated on construction
/// let six = GameType::new(6, 3, 2, false).unwrap();
/// assert_eq!(six.box_count(), 6);
/// assert!(GameType::new(6, 3, 3, false).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameType {
    size: u8,
    section_width: u8,
    section_height: u8,
    killer: bool,
}

impl GameType {
    /// The classic 6x6 board with 3x2 boxes.
    pub const CLASSIC_6X6: Self = Self {
        size: 6,
        section_width: 3,
        section_height: 2,
        killer: false,
    };

    /// The classic 9x9 board with 3x3 boxes.
    pub const CLASSIC_9X9: Self = Self {
        size: 9,
        section_width: 3,
        section_height: 3,
        killer: false,
    };

    /// The classic 12x12 board with 4x3 boxes.
    pub const CLASSIC_12X12: Self = Self {
        size: 12,
        section_width: 4,
        section_height: 3,
        killer: false,
    };

    /// The killer 9x9 board (cage sums over a 3x3-boxed grid).
    pub const KILLER_9X9: Self = Self {
        size: 9,
        section_width: 3,
        section_height: 3,
        killer: true,
    };

    /// Creates a validated game type.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGameType`] when the size is outside `2..=12` or the
    /// section dimensions do not multiply to the board size.
    pub fn new(
        size: u8,
        section_width: u8,
        section_height: u8,
        killer: bool,
    ) -> Result<Self, InvalidGameType> {
        if size < 2 || size > MAX_SIZE {
            return Err(InvalidGameType::UnsupportedSize { size });
        }
        if section_width == 0
            || section_height == 0
            || u16::from(section_width) * u16::from(section_height) != u16::from(size)
        {
            return Err(InvalidGameType::SectionMismatch {
                size,
                section_width,
                section_height,
            });
        }
        Ok(Self {
            size,
            section_width,
            section_height,
            killer,
        })
    }

    /// Returns the board size `N` (rows, columns, and values run `1..=N`).
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Returns the box width.
    #[must_use]
    pub const fn section_width(&self) -> u8 {
        self.section_width
    }

    /// Returns the box height.
    #[must_use]
    pub const fn section_height(&self) -> u8 {
        self.section_height
    }

    /// Returns `true` for killer variants.
    #[must_use]
    pub const fn is_killer(&self) -> bool {
        self.killer
    }

    /// Returns the total number of cells (`N * N`).
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Returns the number of boxes, which always equals the board size.
    #[must_use]
    pub const fn box_count(&self) -> u8 {
        self.size
    }

    /// Returns the index of the box containing `(row, col)`.
    ///
    /// Boxes are numbered row-major:
    /// `section_row * (size / section_width) + section_col`.
    #[must_use]
    pub const fn box_of(&self, row: u8, col: u8) -> u8 {
        let boxes_per_row = self.size / self.section_width;
        (row / self.section_height) * boxes_per_row + col / self.section_width
    }

    /// Returns the `(row, col)` of the top-left cell of a box.
    #[must_use]
    pub const fn box_origin(&self, box_index: u8) -> (u8, u8) {
        let boxes_per_row = self.size / self.section_width;
        (
            (box_index / boxes_per_row) * self.section_height,
            (box_index % boxes_per_row) * self.section_width,
        )
    }
}

impl Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.killer {
            write!(f, "killer {0}x{0}", self.size)
        } else {
            write!(f, "{0}x{0}", self.size)
        }
    }
}

/// Error returned when a [`GameType`] cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidGameType {
    /// The size is outside the supported range.
    #[display("board size {size} is outside the supported range 2-12")]
    UnsupportedSize {
        /// The rejected size.
        size: u8,
    },
    /// The box dimensions do not tile the board.
    #[display("{section_width}x{section_height} boxes do not tile a board of size {size}")]
    SectionMismatch {
        /// The board size.
        size: u8,
        /// The rejected box width.
        section_width: u8,
        /// The rejected box height.
        section_height: u8,
    },
}

/// A puzzle difficulty tier.
///
/// `Unspecified` accepts any difficulty during generation; `Custom` marks
/// player-imported puzzles that were never graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum GameDifficulty {
    /// No particular difficulty requested or determined.
    Unspecified,
    /// Solvable with a handful of trivial placements.
    Simple,
    /// Solvable with naked singles alone.
    Easy,
    /// Requires a meaningful number of hidden singles.
    Moderate,
    /// Requires a small amount of guessing beyond pure propagation.
    Hard,
    /// Requires substantial backtracking search.
    Challenge,
    /// Imported or hand-built puzzle with no grade.
    Custom,
}

impl Display for GameDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unspecified => "unspecified",
            Self::Simple => "simple",
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Hard => "hard",
            Self::Challenge => "challenge",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(GameType::new(9, 3, 3, false).is_ok());
        assert!(GameType::new(6, 2, 3, false).is_ok());
        assert!(GameType::new(12, 4, 3, true).is_ok());

        assert_eq!(
            GameType::new(6, 3, 3, false),
            Err(InvalidGameType::SectionMismatch {
                size: 6,
                section_width: 3,
                section_height: 3,
            })
        );
        assert_eq!(
            GameType::new(1, 1, 1, false),
            Err(InvalidGameType::UnsupportedSize { size: 1 })
        );
        assert_eq!(
            GameType::new(20, 4, 5, false),
            Err(InvalidGameType::UnsupportedSize { size: 20 })
        );
    }

    #[test]
    fn test_box_numbering_9x9() {
        let t = GameType::CLASSIC_9X9;
        assert_eq!(t.box_of(0, 0), 0);
        assert_eq!(t.box_of(0, 8), 2);
        assert_eq!(t.box_of(4, 4), 4);
        assert_eq!(t.box_of(8, 0), 6);
        assert_eq!(t.box_origin(4), (3, 3));
        assert_eq!(t.box_origin(8), (6, 6));
    }

    #[test]
    fn test_box_numbering_6x6() {
        // 3x2 boxes: two boxes per box-row, numbered row-major
        let t = GameType::CLASSIC_6X6;
        assert_eq!(t.box_of(0, 0), 0);
        assert_eq!(t.box_of(0, 3), 1);
        assert_eq!(t.box_of(1, 2), 0);
        assert_eq!(t.box_of(2, 0), 2);
        assert_eq!(t.box_of(5, 5), 5);
        assert_eq!(t.box_origin(3), (2, 3));
        assert_eq!(t.box_origin(5), (4, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(GameType::CLASSIC_6X6.to_string(), "6x6");
        assert_eq!(GameType::KILLER_9X9.to_string(), "killer 9x9");
        assert_eq!(GameDifficulty::Moderate.to_string(), "moderate");
    }
}
