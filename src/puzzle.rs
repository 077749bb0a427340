//! Collaborator-facing handle on one puzzle: its board, solve status and last solution.
use crate::engine::Board;
use crate::error::PuzzleError;
use crate::generator;
use crate::heuristics::Heuristic;
use crate::solver::{self, Algorithm, InteractiveSearch, SolveOutcome, Solution};
use crate::state::{State, Status};
use rand::Rng;

/// Manages one puzzle through its solve lifecycle.
///
/// The status starts at `Ready`. A solve request runs the parity check first: a failing
/// board goes straight to `Unsolvable`, otherwise the puzzle is `Solving` for the
/// duration of the search and `Done` once a goal is reached.
///
/// # Examples
/// ```
/// use npuzzle_solver::puzzle::Puzzle;
/// use npuzzle_solver::solver::Algorithm;
/// use npuzzle_solver::heuristics::Heuristic;
/// use npuzzle_solver::state::Status;
///
/// let mut puzzle = Puzzle::from_text("3\n1 2 3\n4 5 6\n7 0 8\n").unwrap();
/// assert_eq!(puzzle.status(), Status::Ready);
///
/// let solution = puzzle.solve(Algorithm::Optimized, Heuristic::Manhattan).unwrap();
/// assert_eq!(solution.move_count(), 1);
/// assert_eq!(puzzle.status(), Status::Done);
/// assert_eq!(puzzle.history().unwrap().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Puzzle {
    root: State,
    solution: Option<Solution>,
}

impl Puzzle {
    /// A solved puzzle of side `size`.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        Ok(Puzzle::from_board(Board::solved(size)?))
    }

    pub fn from_board(board: Board) -> Self {
        Puzzle {
            root: State::root(board),
            solution: None,
        }
    }

    /// Parses the puzzle text format.
    pub fn from_text(input: &str) -> Result<Self, PuzzleError> {
        Ok(Puzzle::from_board(Board::from_text(input)?))
    }

    /// A freshly generated puzzle, see `generator::generate`.
    pub fn generate<R: Rng + ?Sized>(
        size: usize,
        complexity: usize,
        force_unsolvable: bool,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        let board = generator::generate(size, complexity, force_unsolvable, rng)?;
        Ok(Puzzle::from_board(board))
    }

    pub fn board(&self) -> &Board {
        self.root.board()
    }

    pub fn status(&self) -> Status {
        self.root.status()
    }

    pub fn is_solvable(&self) -> bool {
        self.root.board().is_solvable()
    }

    /// Solves the puzzle and keeps the solution.
    ///
    /// # Returns
    /// `Some(&Solution)` on success, `None` when the board is unsolvable. Solving again
    /// replaces any previous solution.
    pub fn solve(&mut self, algorithm: Algorithm, heuristic: Heuristic) -> Option<&Solution> {
        self.solution = None;
        if !self.is_solvable() {
            self.root.set_status(Status::Unsolvable);
            return None;
        }
        self.root.set_status(Status::Solving);
        match solver::solve(self.root.board(), algorithm, heuristic) {
            SolveOutcome::Solved(solution) => {
                self.root.set_status(Status::Done);
                self.solution = Some(solution);
            }
            SolveOutcome::Unsolvable => self.root.set_status(Status::Unsolvable),
        }
        self.solution.as_ref()
    }

    /// `solve` with names for the algorithm and heuristic.
    ///
    /// Unknown names are reported before any status change.
    pub fn solve_named(
        &mut self,
        algorithm: &str,
        heuristic: &str,
    ) -> Result<Option<&Solution>, PuzzleError> {
        let algorithm: Algorithm = algorithm.parse()?;
        let heuristic: Heuristic = heuristic.parse()?;
        Ok(self.solve(algorithm, heuristic))
    }

    /// Starts a step-by-step search from this puzzle's board.
    ///
    /// The puzzle itself is marked `Solving`; the caller owns the search from here on.
    pub fn interactive(&mut self, heuristic: Heuristic) -> Result<InteractiveSearch, PuzzleError> {
        match InteractiveSearch::new(self.root.board(), heuristic) {
            Ok(search) => {
                self.solution = None;
                self.root.set_status(Status::Solving);
                Ok(search)
            }
            Err(e) => {
                self.root.set_status(Status::Unsolvable);
                Err(e)
            }
        }
    }

    /// Records a solution produced by an `InteractiveSearch` started from this puzzle.
    pub fn complete(&mut self, solution: Solution) {
        self.root.set_status(Status::Done);
        self.solution = Some(solution);
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// The states of the last solution, initial board first.
    pub fn history(&self) -> Option<&[State]> {
        self.solution.as_ref().map(|s| s.history.as_slice())
    }

    /// Canonical text form of the board.
    pub fn to_text(&self) -> String {
        self.root.board().to_text()
    }
}
