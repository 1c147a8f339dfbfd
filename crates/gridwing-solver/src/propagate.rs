use crate::grid::CandidateGrid;

/// Counts of the deductions and guesses a solve required.
///
/// Collected during the solution pass of
/// [`BacktrackSolver::solve`](crate::BacktrackSolver::solve) and consumed by
/// [`grade`](crate::grade) to classify puzzle difficulty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SolveStats {
    /// Cells decided because they had exactly one candidate left.
    pub naked_singles: u32,
    /// Cells decided because a value had exactly one home in a row,
    /// column, or box.
    pub hidden_singles: u32,
    /// Branch values tried at choice points.
    pub guesses: u32,
    /// Branches abandoned without reaching a solution.
    pub backtracks: u32,
}

impl SolveStats {
    /// Returns the total number of forced placements.
    #[must_use]
    pub fn propagation_steps(&self) -> u32 {
        self.naked_singles + self.hidden_singles
    }

    /// Returns `true` when the solve needed no guessing at all.
    #[must_use]
    pub fn propagation_only(&self) -> bool {
        self.guesses == 0
    }
}

/// Outcome of running propagation to a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Propagation {
    /// Every cell is filled.
    Solved,
    /// No forced placement remains; the search must branch.
    Stuck,
    /// An empty cell ran out of candidates.
    Contradiction,
}

/// Applies forced placements until none remain.
///
/// Each iteration places at most one cell: the first naked single in
/// row-major order, or failing that the first hidden single found scanning
/// values across rows, then columns, then boxes.
pub(crate) fn propagate(grid: &mut CandidateGrid, stats: &mut SolveStats) -> Propagation {
    loop {
        if grid.has_contradiction() {
            return Propagation::Contradiction;
        }
        if grid.is_full() {
            return Propagation::Solved;
        }
        if place_naked_single(grid, stats) {
            continue;
        }
        if place_hidden_single(grid, stats) {
            continue;
        }
        return Propagation::Stuck;
    }
}

fn place_naked_single(grid: &mut CandidateGrid, stats: &mut SolveStats) -> bool {
    for index in 0..grid.cell_count() {
        if grid.value(index) == 0
            && let Some(value) = grid.candidates_at(index).single()
        {
            stats.naked_singles += 1;
            grid.place(index, value);
            return true;
        }
    }
    false
}

fn place_hidden_single(grid: &mut CandidateGrid, stats: &mut SolveStats) -> bool {
    let game_type = grid.game_type();
    let size = usize::from(game_type.size());

    for value in 1..=game_type.size() {
        for row in 0..size {
            if place_single_home(grid, stats, value, (0..size).map(|col| row * size + col)) {
                return true;
            }
        }
        for col in 0..size {
            if place_single_home(grid, stats, value, (0..size).map(|row| row * size + col)) {
                return true;
            }
        }
        for box_index in 0..game_type.box_count() {
            let (origin_row, origin_col) = game_type.box_origin(box_index);
            let width = usize::from(game_type.section_width());
            let height = usize::from(game_type.section_height());
            let cells = (0..height).flat_map(|dr| {
                (0..width).map(move |dc| {
                    (usize::from(origin_row) + dr) * size + usize::from(origin_col) + dc
                })
            });
            if place_single_home(grid, stats, value, cells) {
                return true;
            }
        }
    }
    false
}

/// Places `value` when exactly one empty cell of the house can hold it.
fn place_single_home(
    grid: &mut CandidateGrid,
    stats: &mut SolveStats,
    value: u8,
    cells: impl Iterator<Item = usize>,
) -> bool {
    let mut home = None;
    for index in cells {
        if grid.value(index) == 0 && grid.candidates_at(index).contains(value) {
            if home.is_some() {
                return false;
            }
            home = Some(index);
        }
    }
    let Some(index) = home else {
        return false;
    };
    stats.hidden_singles += 1;
    grid.place(index, value);
    true
}

#[cfg(test)]
mod tests {
    use gridwing_core::GameType;

    use super::*;

    #[test]
    fn test_naked_single_is_found_and_placed() {
        let mut grid = CandidateGrid::empty(GameType::CLASSIC_6X6);
        // fill row 0 with 1..=5, leaving (0, 5) forced to 6
        for (col, value) in (0..5).zip(1..=5) {
            assert!(grid.place(col, value));
        }
        let mut stats = SolveStats::default();
        assert!(place_naked_single(&mut grid, &mut stats));
        assert_eq!(grid.value(5), 6);
        assert_eq!(stats.naked_singles, 1);
    }

    #[test]
    fn test_propagate_reports_contradiction() {
        let mut puzzle = vec![0u8; 36];
        puzzle[0] = 3;
        puzzle[6] = 3; // same column
        let mut grid = CandidateGrid::from_puzzle(GameType::CLASSIC_6X6, &puzzle);
        let mut stats = SolveStats::default();
        assert_eq!(propagate(&mut grid, &mut stats), Propagation::Contradiction);
    }

    #[test]
    fn test_propagate_stalls_on_empty_grid() {
        let mut grid = CandidateGrid::empty(GameType::CLASSIC_9X9);
        let mut stats = SolveStats::default();
        assert_eq!(propagate(&mut grid, &mut stats), Propagation::Stuck);
        assert_eq!(stats.propagation_steps(), 0);
    }
}
