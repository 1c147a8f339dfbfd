use gridwing_core::GameType;
use rand::{rand_core::RngCore, seq::SliceRandom as _};
use tinyvec::ArrayVec;

use crate::{
    CancelToken, PuzzleFormatError, SolveStats,
    grid::CandidateGrid,
    propagate::{Propagation, propagate},
};

/// How a finished search classified the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SolveClassification {
    /// No completion of the givens exists (including duplicate givens).
    NoSolution,
    /// Exactly one completion exists.
    Unique,
    /// At least two completions exist; the search stopped at the cap.
    Multiple,
    /// The search was cancelled before it could classify the puzzle.
    Interrupted,
}

/// Immutable result of one solve call.
///
/// The report owns everything the caller may want to inspect after the
/// call: the classification, one solution (all zeros when none was found),
/// and the deduction statistics of the solution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    game_type: GameType,
    classification: SolveClassification,
    solution: Vec<u8>,
    stats: SolveStats,
}

impl SolveReport {
    /// Returns the board shape the puzzle was solved against.
    #[must_use]
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    /// Returns the classification of the puzzle.
    #[must_use]
    pub fn classification(&self) -> SolveClassification {
        self.classification
    }

    /// Returns the flat solution array; all zeros when no solution exists
    /// or the search was interrupted.
    #[must_use]
    pub fn solution(&self) -> &[u8] {
        &self.solution
    }

    /// Returns the deduction statistics of the solution pass.
    #[must_use]
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Returns `true` when the puzzle has no solution.
    #[must_use]
    pub fn is_impossible(&self) -> bool {
        self.classification.is_no_solution()
    }

    /// Returns `true` when exactly one solution exists.
    #[must_use]
    pub fn has_unique_solution(&self) -> bool {
        self.classification.is_unique()
    }

    /// Returns the solution count, saturated at the counting cap.
    #[must_use]
    pub fn solution_count(&self) -> u32 {
        match self.classification {
            SolveClassification::NoSolution | SolveClassification::Interrupted => 0,
            SolveClassification::Unique => 1,
            SolveClassification::Multiple => 2,
        }
    }
}

/// Guess-and-recurse Sudoku solver with solution counting.
///
/// Each call builds its own grid and choice stack; the solver itself is
/// just configuration and is cheap to clone.
///
/// # Examples
///
/// ```
/// use gridwing_core::{GameType, codec};
/// use gridwing_solver::BacktrackSolver;
///
/// let board = codec::parse_board_with_separator(
///     "500600000020053001100350040000001005",
///     GameType::CLASSIC_6X6,
///     '0',
/// )
/// .unwrap();
///
/// let report = BacktrackSolver::new()
///     .solve(&board.values(), GameType::CLASSIC_6X6)
///     .unwrap();
/// assert!(report.has_unique_solution());
/// ```
#[derive(Debug, Clone)]
pub struct BacktrackSolver {
    solution_limit: u32,
    cancel: Option<CancelToken>,
}

impl Default for BacktrackSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BacktrackSolver {
    /// The default solution counting cap: two is enough to tell a unique
    /// puzzle from an ambiguous one.
    pub const DEFAULT_SOLUTION_LIMIT: u32 = 2;

    /// Creates a solver with the default solution cap and no cancellation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            solution_limit: Self::DEFAULT_SOLUTION_LIMIT,
            cancel: None,
        }
    }

    /// Sets the solution counting cap (clamped to at least 1).
    ///
    /// A cap of 1 cannot distinguish a unique puzzle from an ambiguous
    /// one; keep the default of 2 when classification matters.
    #[must_use]
    pub fn with_solution_limit(mut self, limit: u32) -> Self {
        self.solution_limit = limit.max(1);
        self
    }

    /// Attaches a cancellation token, checked at every choice point.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Solves a flat puzzle and classifies its solution count.
    ///
    /// Runs a counting pass (capped at the solution limit) followed by a
    /// deterministic solution pass that records [`SolveStats`]. The givens
    /// of the puzzle always reappear unchanged in the solution.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleFormatError`] when the array has the wrong length or
    /// contains a value larger than the board size. A puzzle with no
    /// solution is not an error; see [`SolveReport::is_impossible`].
    pub fn solve(
        &self,
        puzzle: &[u8],
        game_type: GameType,
    ) -> Result<SolveReport, PuzzleFormatError> {
        validate(puzzle, game_type)?;
        let grid = CandidateGrid::from_puzzle(game_type, puzzle);

        let counted = self.run_search(&grid, self.solution_limit, None);
        let classification = match counted {
            Counted::Interrupted => SolveClassification::Interrupted,
            Counted::Solutions(0) => SolveClassification::NoSolution,
            Counted::Solutions(1) => SolveClassification::Unique,
            Counted::Solutions(_) => SolveClassification::Multiple,
        };
        if !matches!(
            classification,
            SolveClassification::Unique | SolveClassification::Multiple
        ) {
            return Ok(SolveReport {
                game_type,
                classification,
                solution: vec![0; game_type.cell_count()],
                stats: SolveStats::default(),
            });
        }

        // Second pass: find the first solution deterministically so the
        // recorded stats describe solving, not counting.
        let mut stats = SolveStats::default();
        let mut state = SearchState {
            limit: 1,
            cancel: self.cancel.as_ref(),
            count: 0,
            solution: None,
            interrupted: false,
        };
        search(grid, None::<&mut dyn RngCore>, &mut stats, &mut state);
        let solution = state
            .solution
            .unwrap_or_else(|| vec![0; game_type.cell_count()]);
        Ok(SolveReport {
            game_type,
            classification,
            solution,
            stats,
        })
    }

    /// Counts solutions up to the configured cap without producing a
    /// solution or statistics.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleFormatError`] under the same conditions as
    /// [`solve`](Self::solve).
    pub fn count_solutions(
        &self,
        puzzle: &[u8],
        game_type: GameType,
    ) -> Result<SolveClassification, PuzzleFormatError> {
        validate(puzzle, game_type)?;
        let grid = CandidateGrid::from_puzzle(game_type, puzzle);
        let classification = match self.run_search(&grid, self.solution_limit, None) {
            Counted::Interrupted => SolveClassification::Interrupted,
            Counted::Solutions(0) => SolveClassification::NoSolution,
            Counted::Solutions(1) => SolveClassification::Unique,
            Counted::Solutions(_) => SolveClassification::Multiple,
        };
        Ok(classification)
    }

    /// Produces one random completion of an empty board.
    ///
    /// Candidate values at each choice point are tried in an order drawn
    /// from `rng`, so every call can yield a different full grid. Returns
    /// `None` only when the search is cancelled.
    pub fn random_completion<R: RngCore>(
        &self,
        game_type: GameType,
        rng: &mut R,
    ) -> Option<Vec<u8>> {
        let grid = CandidateGrid::empty(game_type);
        let mut stats = SolveStats::default();
        let mut state = SearchState {
            limit: 1,
            cancel: self.cancel.as_ref(),
            count: 0,
            solution: None,
            interrupted: false,
        };
        search(grid, Some(rng), &mut stats, &mut state);
        state.solution
    }

    fn run_search(
        &self,
        grid: &CandidateGrid,
        limit: u32,
        rng: Option<&mut dyn RngCore>,
    ) -> Counted {
        let mut stats = SolveStats::default();
        let mut state = SearchState {
            limit,
            cancel: self.cancel.as_ref(),
            count: 0,
            solution: None,
            interrupted: false,
        };
        search(grid.clone(), rng, &mut stats, &mut state);
        if state.interrupted {
            Counted::Interrupted
        } else {
            Counted::Solutions(state.count)
        }
    }
}

enum Counted {
    Solutions(u32),
    Interrupted,
}

fn validate(puzzle: &[u8], game_type: GameType) -> Result<(), PuzzleFormatError> {
    let expected = game_type.cell_count();
    if puzzle.len() != expected {
        return Err(PuzzleFormatError::Length {
            expected,
            actual: puzzle.len(),
        });
    }
    let size = game_type.size();
    for (index, &value) in puzzle.iter().enumerate() {
        if value > size {
            return Err(PuzzleFormatError::ValueOutOfRange { value, index, size });
        }
    }
    Ok(())
}

struct SearchState<'a> {
    limit: u32,
    cancel: Option<&'a CancelToken>,
    count: u32,
    solution: Option<Vec<u8>>,
    interrupted: bool,
}

/// Depth-first search over the puzzle's choice tree.
///
/// Propagation runs to a fixed point before every branch; choice points
/// snapshot the grid by cloning it, so backtracking is a drop.
fn search<R: RngCore + ?Sized>(
    mut grid: CandidateGrid,
    mut rng: Option<&mut R>,
    stats: &mut SolveStats,
    state: &mut SearchState<'_>,
) {
    match propagate(&mut grid, stats) {
        Propagation::Contradiction => return,
        Propagation::Solved => {
            state.count += 1;
            if state.solution.is_none() {
                state.solution = Some(grid.values().to_vec());
            }
            return;
        }
        Propagation::Stuck => {}
    }

    let Some(cell) = grid.fewest_candidates_cell() else {
        return;
    };
    let mut values: ArrayVec<[u8; 16]> = grid.candidates_at(cell).into_iter().collect();
    if let Some(r) = rng.as_deref_mut() {
        values.shuffle(r);
    }

    for &value in &values {
        if let Some(token) = state.cancel
            && token.is_cancelled()
        {
            state.interrupted = true;
            return;
        }
        if state.count >= state.limit {
            return;
        }
        stats.guesses += 1;
        let found_before = state.count;
        let mut child = grid.clone();
        if child.place(cell, value) {
            search(child, rng.as_deref_mut(), stats, state);
            if state.interrupted {
                return;
            }
        }
        if state.count == found_before {
            stats.backtracks += 1;
        }
    }
}
