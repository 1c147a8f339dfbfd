//! Difficulty grading from solve statistics.

use gridwing_core::{GameDifficulty, GameType};

use crate::SolveStats;

/// Classifies a puzzle's difficulty from the statistics of its solution
/// pass.
///
/// The tiers are defined by which techniques the solve needed:
///
/// - `Challenge`: substantial guessing (more branch attempts than the
///   board's guess allowance)
/// - `Hard`: some guessing, but within the allowance
/// - `Moderate`: propagation only, with many hidden singles
/// - `Easy`: propagation only, mostly naked singles
/// - `Simple`: a handful of trivial placements
///
/// Thresholds scale with the board size; a 12x12 grid earns its tier with
/// proportionally more deductions than a 6x6 one.
///
/// # Examples
///
/// ```
/// use gridwing_core::{GameDifficulty, GameType};
/// use gridwing_solver::{SolveStats, grade};
///
/// let stats = SolveStats {
///     naked_singles: 40,
///     hidden_singles: 2,
///     guesses: 0,
///     backtracks: 0,
/// };
/// assert_eq!(grade(GameType::CLASSIC_9X9, &stats), GameDifficulty::Easy);
/// ```
#[must_use]
pub fn grade(game_type: GameType, stats: &SolveStats) -> GameDifficulty {
    let size = game_type.size();
    if stats.guesses > guess_allowance(size) {
        return GameDifficulty::Challenge;
    }
    if stats.guesses > 0 {
        return GameDifficulty::Hard;
    }
    if stats.hidden_singles > hidden_single_allowance(size) {
        return GameDifficulty::Moderate;
    }
    if stats.naked_singles > naked_single_allowance(size) {
        return GameDifficulty::Easy;
    }
    GameDifficulty::Simple
}

fn guess_allowance(size: u8) -> u32 {
    match size {
        ..=6 => 2,
        7..=9 => 4,
        _ => 8,
    }
}

fn hidden_single_allowance(size: u8) -> u32 {
    match size {
        ..=6 => 0,
        7..=9 => 10,
        _ => 20,
    }
}

fn naked_single_allowance(size: u8) -> u32 {
    match size {
        ..=6 => 10,
        7..=9 => 35,
        _ => 50,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(naked: u32, hidden: u32, guesses: u32, backtracks: u32) -> SolveStats {
        SolveStats {
            naked_singles: naked,
            hidden_singles: hidden,
            guesses,
            backtracks,
        }
    }

    #[test]
    fn test_tiers_9x9() {
        let t = GameType::CLASSIC_9X9;
        assert_eq!(grade(t, &stats(5, 0, 0, 0)), GameDifficulty::Simple);
        assert_eq!(grade(t, &stats(40, 2, 0, 0)), GameDifficulty::Easy);
        assert_eq!(grade(t, &stats(30, 25, 0, 0)), GameDifficulty::Moderate);
        assert_eq!(grade(t, &stats(30, 25, 3, 1)), GameDifficulty::Hard);
        assert_eq!(grade(t, &stats(30, 25, 12, 9)), GameDifficulty::Challenge);
    }

    #[test]
    fn test_size_scaled_thresholds() {
        // one hidden single already lifts a 6x6 out of Easy
        assert_eq!(
            grade(GameType::CLASSIC_6X6, &stats(12, 1, 0, 0)),
            GameDifficulty::Moderate
        );
        // but not a 9x9
        assert_eq!(
            grade(GameType::CLASSIC_9X9, &stats(40, 1, 0, 0)),
            GameDifficulty::Easy
        );
        // a 12x12 tolerates more guessing before Challenge
        assert_eq!(
            grade(GameType::CLASSIC_12X12, &stats(0, 0, 6, 2)),
            GameDifficulty::Hard
        );
        assert_eq!(
            grade(GameType::CLASSIC_9X9, &stats(0, 0, 6, 2)),
            GameDifficulty::Challenge
        );
    }
}
