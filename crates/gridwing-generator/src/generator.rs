//! Seeded, difficulty-calibrated puzzle generation.

use gridwing_core::{Board, Cage, GameDifficulty, GameType};
use gridwing_solver::{BacktrackSolver, CancelToken, SolveClassification, grade};
use rand::seq::SliceRandom as _;
use rand_pcg::Pcg64;

use crate::{CageGenerator, PuzzleSeed};

/// A generated puzzle together with its solution and provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The board shape the puzzle was generated for.
    pub game_type: GameType,
    /// The graded difficulty of the delivered puzzle.
    pub difficulty: GameDifficulty,
    /// The seed that reproduces this puzzle.
    pub seed: PuzzleSeed,
    /// The initial board; givens are locked.
    pub problem: Board,
    /// The unique solution of `problem`.
    pub solution: Board,
    /// Killer cages over the solution; empty for non-killer variants.
    pub cages: Vec<Cage>,
}

/// Error produced when generation cannot deliver a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerateError {
    /// No attempt produced a puzzle of the requested difficulty.
    #[display("no {difficulty} puzzle found within {attempts} attempts")]
    RetriesExhausted {
        /// The requested difficulty.
        difficulty: GameDifficulty,
        /// Number of attempts made.
        attempts: u32,
    },
    /// The attached cancel token fired mid-generation.
    #[display("generation was cancelled")]
    Cancelled,
}

/// Difficulty-calibrated puzzle generator.
///
/// Each attempt:
///
/// 1. builds a random solved grid by solving an empty board with
///    randomized candidate ordering,
/// 2. removes givens in shuffled order, restoring any removal that breaks
///    uniqueness (and, for a targeted difficulty, any removal that
///    overshoots the target),
/// 3. grades the dug puzzle and accepts it when the grade matches.
///
/// Attempts draw independent RNG streams from the seed, so a run is fully
/// reproducible from `(seed, game_type, difficulty)`.
///
/// # Examples
///
/// ```
/// use gridwing_core::{GameDifficulty, GameType};
/// use gridwing_generator::PuzzleGenerator;
///
/// let generator = PuzzleGenerator::new();
/// let puzzle = generator
///     .generate(GameType::CLASSIC_6X6, GameDifficulty::Unspecified)
///     .unwrap();
/// assert_eq!(puzzle.problem.given_count(), puzzle.problem.filled_count());
/// assert!(puzzle.solution.is_full());
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleGenerator {
    solver: BacktrackSolver,
    max_attempts: u32,
    cancel: Option<CancelToken>,
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleGenerator {
    /// Default bound on generation attempts per call.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 250;

    /// Creates a generator with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            solver: BacktrackSolver::new(),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            cancel: None,
        }
    }

    /// Bounds the number of attempts before giving up (at least 1).
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Attaches a cancellation token, checked between attempts and at
    /// every choice point of the underlying searches.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.solver = self.solver.with_cancel_token(token.clone());
        self.cancel = Some(token);
        self
    }

    /// Generates a puzzle from a fresh random seed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::RetriesExhausted`] when no attempt matched
    /// the requested difficulty, or [`GenerateError::Cancelled`] when the
    /// cancel token fired.
    pub fn generate(
        &self,
        game_type: GameType,
        difficulty: GameDifficulty,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        self.generate_with_seed(game_type, difficulty, PuzzleSeed::random())
    }

    /// Generates a puzzle reproducibly from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] under the same conditions as
    /// [`generate`](Self::generate).
    pub fn generate_with_seed(
        &self,
        game_type: GameType,
        difficulty: GameDifficulty,
        seed: PuzzleSeed,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        for attempt in 0..self.max_attempts {
            if self.is_cancelled() {
                return Err(GenerateError::Cancelled);
            }
            let mut rng = seed.attempt_rng(attempt);
            if let Some((problem, solution, graded)) =
                self.attempt(game_type, difficulty, &mut rng)?
            {
                let cages = if game_type.is_killer() {
                    CageGenerator::new(&solution).generate(&mut rng)
                } else {
                    Vec::new()
                };
                return Ok(GeneratedPuzzle {
                    game_type,
                    difficulty: graded,
                    seed,
                    problem,
                    solution,
                    cages,
                });
            }
            log::debug!(
                "attempt {attempt} did not yield a {difficulty} {game_type} puzzle, retrying"
            );
        }
        Err(GenerateError::RetriesExhausted {
            difficulty,
            attempts: self.max_attempts,
        })
    }

    /// Runs one generation attempt; `Ok(None)` means the dug puzzle did
    /// not grade as requested.
    fn attempt(
        &self,
        game_type: GameType,
        difficulty: GameDifficulty,
        rng: &mut Pcg64,
    ) -> Result<Option<(Board, Board, GameDifficulty)>, GenerateError> {
        let Some(solved) = self.solver.random_completion(game_type, rng) else {
            return Err(GenerateError::Cancelled);
        };

        // Targeted difficulties bound how hard the dug puzzle may get;
        // Unspecified and Custom accept whatever digging produces.
        let ceiling = match difficulty {
            GameDifficulty::Unspecified | GameDifficulty::Custom => None,
            target => Some(target),
        };

        let mut puzzle = solved.clone();
        let mut order: Vec<usize> = (0..puzzle.len()).collect();
        order.shuffle(rng);

        for &index in &order {
            let removed = puzzle[index];
            puzzle[index] = 0;
            let classification = self
                .solver
                .count_solutions(&puzzle, game_type)
                .expect("dug puzzles are well-formed");
            match classification {
                SolveClassification::Unique => {}
                SolveClassification::Interrupted => return Err(GenerateError::Cancelled),
                SolveClassification::Multiple | SolveClassification::NoSolution => {
                    puzzle[index] = removed;
                    continue;
                }
            }
            if let Some(ceiling) = ceiling
                && self.grade_puzzle(&puzzle, game_type)? > ceiling
            {
                puzzle[index] = removed;
            }
        }

        let graded = self.grade_puzzle(&puzzle, game_type)?;
        if let Some(target) = ceiling
            && graded != target
        {
            return Ok(None);
        }

        let mut problem = Board::from_values(game_type, &puzzle);
        problem.lock_givens();
        let solution = Board::from_values(game_type, &solved);
        Ok(Some((problem, solution, graded)))
    }

    fn grade_puzzle(
        &self,
        puzzle: &[u8],
        game_type: GameType,
    ) -> Result<GameDifficulty, GenerateError> {
        let report = self
            .solver
            .solve(puzzle, game_type)
            .expect("dug puzzles are well-formed");
        if report.classification() == SolveClassification::Interrupted {
            return Err(GenerateError::Cancelled);
        }
        Ok(grade(game_type, report.stats()))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}
