//! Informed search from a board to the solved configuration.
//!
//! Four control-flow variants share the same bookkeeping (`Search`): an arena of
//! nodes, a `BucketQueue` frontier and a closed map from board key to the lowest `g`
//! at which that board was expanded.
//!
//! - `solve_reference`: A* that scans the frontier for duplicates before admitting a
//!   child and reopens closed boards when a strictly cheaper path turns up.
//! - `solve_optimized`: lazy-deletion A*. Children are pushed unconditionally and
//!   duplicates are discarded when they are popped.
//! - `solve_best_first`: greedy search, same loop as `solve_optimized`, ranked by `h` only.
//! - `InteractiveSearch`: the optimized loop, paused before every expansion.
//!
//! Equal priorities are popped last-in first-out. Which optimal path comes back when
//! several exist depends on that order; the cost does not.
use crate::engine::{Board, BoardKey, Direction};
use crate::error::PuzzleError;
use crate::heuristics::Heuristic;
use crate::queue::BucketQueue;
use crate::state::{NodeId, SearchTree, State, Status};
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// The batch solvers selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// A* with eager frontier duplicate checks. Correct but slow.
    Reference,
    /// Lazy-deletion A*. The default.
    Optimized,
    /// Greedy search on `h` alone. Fast, not guaranteed optimal.
    BestFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Reference,
        Algorithm::Optimized,
        Algorithm::BestFirst,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Reference => "reference",
            Algorithm::Optimized => "optimized",
            Algorithm::BestFirst => "best-first",
        }
    }
}

impl FromStr for Algorithm {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reference" | "slow-a*" => Ok(Algorithm::Reference),
            "optimized" | "a*" => Ok(Algorithm::Optimized),
            "best-first" => Ok(Algorithm::BestFirst),
            _ => Err(PuzzleError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents a solution found by a solver.
#[derive(Clone, Debug)]
pub struct Solution {
    /// States from the initial board to the goal, inclusive.
    pub history: Vec<State>,
    /// Number of frontier extractions, stale ones included.
    pub iterations: usize,
    /// Largest `open + closed` size observed during the search.
    pub peak_size: usize,
    /// Wall time spent searching.
    pub elapsed: Duration,
}

impl Solution {
    /// The goal state at the end of the history.
    pub fn goal(&self) -> &State {
        &self.history[self.history.len() - 1]
    }

    /// Number of slides, one less than the history length.
    pub fn move_count(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// The slides that replay the history, as directions of the blank.
    pub fn moves(&self) -> Vec<Direction> {
        self.history
            .windows(2)
            .filter_map(|pair| {
                let from = pair[0].board();
                let to = pair[1].board();
                Direction::between(from.blank_index(), to.blank_index(), from.size())
            })
            .collect()
    }
}

/// Result of a solve request.
#[derive(Clone, Debug)]
pub enum SolveOutcome {
    Solved(Solution),
    /// The board failed the parity test; no search was run.
    Unsolvable,
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::Unsolvable => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::Unsolvable => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ranking {
    /// `g + h`
    TotalCost,
    /// `h`
    HeuristicOnly,
}

/// What `Search::admit` did with a child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Admission {
    /// New board, queued.
    Queued,
    /// Already on the frontier at a higher `g`; the cheaper copy was queued.
    Cheaper,
    /// Closed at a higher `g`; removed from the closed map and queued.
    Reopened,
    /// Already known at an equal or lower `g`.
    Skipped,
}

/// Frontier, closed map and node arena owned by one search.
struct Search {
    tree: SearchTree,
    open: BucketQueue<NodeId>,
    closed: HashMap<BoardKey, usize>,
    heuristic: Heuristic,
    ranking: Ranking,
    iterations: usize,
    peak_size: usize,
    started: Instant,
}

impl Search {
    fn new(root: State, heuristic: Heuristic, ranking: Ranking) -> Self {
        let mut search = Search {
            tree: SearchTree::new(),
            open: BucketQueue::new(),
            closed: HashMap::new(),
            heuristic,
            ranking,
            iterations: 0,
            peak_size: 0,
            started: Instant::now(),
        };
        let id = search.tree.push_root(root);
        let priority = search.priority(id);
        search.open.insert(id, priority);
        search.record_peak();
        search
    }

    fn priority(&mut self, id: NodeId) -> f64 {
        let heuristic = self.heuristic;
        let state = self.tree.get_mut(id);
        match self.ranking {
            Ranking::TotalCost => state.total_cost(heuristic),
            Ranking::HeuristicOnly => state.heuristic_value(heuristic),
        }
    }

    fn push(&mut self, parent: NodeId, child: State) {
        let id = self.tree.attach(parent, child);
        let priority = self.priority(id);
        self.open.insert(id, priority);
    }

    /// `true` if this board was already expanded at a cost no greater than this node's.
    fn is_stale(&self, id: NodeId) -> bool {
        let state = &self.tree[id];
        self.closed
            .get(&state.key())
            .is_some_and(|&closed_g| closed_g <= state.g())
    }

    fn close(&mut self, id: NodeId) {
        let state = &self.tree[id];
        self.closed.insert(state.key(), state.g());
    }

    /// Pushes every child of `id` onto the frontier.
    fn expand(&mut self, id: NodeId) {
        for child in self.tree.children(id) {
            self.push(id, child);
        }
        trace!(
            "expanded g={} ({})",
            self.tree[id].g(),
            self.status_line()
        );
    }

    /// Eager duplicate handling used by `solve_reference`.
    ///
    /// A board already on the frontier is only queued again on a strictly lower `g`. A
    /// closed board is reopened on a strictly lower `g`.
    fn admit(&mut self, parent: NodeId, child: State) -> Admission {
        let tree = &self.tree;
        let frontier_g = self
            .open
            .find(|&other| tree[other] == child)
            .map(|&other| tree[other].g());
        if let Some(frontier_g) = frontier_g {
            if child.g() < frontier_g {
                self.push(parent, child);
                return Admission::Cheaper;
            }
            return Admission::Skipped;
        }

        let key = child.key();
        match self.closed.get(&key).copied() {
            Some(closed_g) if child.g() < closed_g => {
                trace!("reopening board closed at g={} for g={}", closed_g, child.g());
                self.closed.remove(&key);
                self.push(parent, child);
                Admission::Reopened
            }
            Some(_) => Admission::Skipped,
            None => {
                self.push(parent, child);
                Admission::Queued
            }
        }
    }

    fn record_peak(&mut self) {
        self.peak_size = self.peak_size.max(self.open.len() + self.closed.len());
    }

    fn status_line(&self) -> String {
        format!("opened: {} closed: {}", self.open.len(), self.closed.len())
    }

    fn finish(mut self, goal: NodeId) -> Solution {
        self.record_peak();
        let mut history = self.tree.history(goal);
        if let Some(last) = history.last_mut() {
            last.set_status(Status::Done);
        }
        let solution = Solution {
            history,
            iterations: self.iterations,
            peak_size: self.peak_size,
            elapsed: self.started.elapsed(),
        };
        debug!(
            "goal reached: {} moves, {} iterations, peak size {}, {:?}",
            solution.move_count(),
            solution.iterations,
            solution.peak_size,
            solution.elapsed
        );
        solution
    }
}

/// The state graph of a solvable board is finite and connected, so running out of
/// frontier means the core is broken. Not recoverable.
fn frontier_exhausted(iterations: usize) -> ! {
    panic!(
        "search frontier exhausted after {} iterations without reaching the goal",
        iterations
    );
}

/// A* with linear frontier duplicate detection and closed-set reopening.
///
/// Before admitting a child, the frontier is scanned for the same board: the child is
/// only added if it is strictly cheaper, and the older entry is left to be skipped when
/// it surfaces. A closed board is reopened when a strictly cheaper path reaches it.
///
/// # Panics
/// Panics if the frontier empties, which only happens on an unsolvable root.
pub fn solve_reference(root: State, heuristic: Heuristic) -> Solution {
    let mut search = Search::new(root, heuristic, Ranking::TotalCost);
    while let Ok(id) = search.open.extract_min() {
        search.iterations += 1;
        if search.tree[id].is_goal() {
            return search.finish(id);
        }
        if search.is_stale(id) {
            continue;
        }
        search.close(id);

        for child in search.tree.children(id) {
            search.admit(id, child);
        }
        search.record_peak();
    }
    frontier_exhausted(search.iterations)
}

/// Pop, goal-test, skip stale, close, push all children.
fn lazy_search(root: State, heuristic: Heuristic, ranking: Ranking) -> Solution {
    let mut search = Search::new(root, heuristic, ranking);
    while let Ok(id) = search.open.extract_min() {
        search.iterations += 1;
        if search.tree[id].is_goal() {
            return search.finish(id);
        }
        if search.is_stale(id) {
            continue;
        }
        search.close(id);
        search.expand(id);
        search.record_peak();
    }
    frontier_exhausted(search.iterations)
}

/// Lazy-deletion A* ranked by `g + h`.
///
/// Duplicates are never merged on insertion; a popped node whose board was already
/// expanded at a cost no greater than its own is discarded.
///
/// # Panics
/// Panics if the frontier empties, which only happens on an unsolvable root.
pub fn solve_optimized(root: State, heuristic: Heuristic) -> Solution {
    lazy_search(root, heuristic, Ranking::TotalCost)
}

/// Greedy best-first search ranked by `h` alone.
///
/// # Panics
/// Panics if the frontier empties, which only happens on an unsolvable root.
pub fn solve_best_first(root: State, heuristic: Heuristic) -> Solution {
    lazy_search(root, heuristic, Ranking::HeuristicOnly)
}

/// Runs the parity check, then the selected solver.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::Heuristic;
/// use npuzzle_solver::solver::{solve, Algorithm, SolveOutcome};
///
/// let board = Board::from_text("3\n1 2 3\n4 5 6\n7 0 8\n").unwrap();
/// let outcome = solve(&board, Algorithm::Optimized, Heuristic::Manhattan);
/// assert_eq!(outcome.solution().unwrap().history.len(), 2);
///
/// let stuck = Board::from_text("3\n1 2 3\n4 5 6\n8 7 0\n").unwrap();
/// assert!(matches!(solve(&stuck, Algorithm::Optimized, Heuristic::Manhattan), SolveOutcome::Unsolvable));
/// ```
pub fn solve(board: &Board, algorithm: Algorithm, heuristic: Heuristic) -> SolveOutcome {
    if !board.is_solvable() {
        debug!("board is not solvable, skipping search");
        return SolveOutcome::Unsolvable;
    }
    debug!(
        "solving {0}x{0} board with {1} and {2}",
        board.size(),
        algorithm,
        heuristic
    );
    let root = State::root(board.clone());
    let solution = match algorithm {
        Algorithm::Reference => solve_reference(root, heuristic),
        Algorithm::Optimized => solve_optimized(root, heuristic),
        Algorithm::BestFirst => solve_best_first(root, heuristic),
    };
    SolveOutcome::Solved(solution)
}

/// `solve` with the algorithm and heuristic given by name.
///
/// # Returns
/// * `Err(PuzzleError::UnknownAlgorithm)` or `Err(PuzzleError::UnknownHeuristic)` for
///   names outside the supported sets.
/// * `Ok(SolveOutcome::Unsolvable)` for boards failing the parity test.
pub fn solve_named(
    board: &Board,
    algorithm: &str,
    heuristic: &str,
) -> Result<SolveOutcome, PuzzleError> {
    let algorithm: Algorithm = algorithm.parse()?;
    let heuristic: Heuristic = heuristic.parse()?;
    Ok(solve(board, algorithm, heuristic))
}

/// One pause point of an `InteractiveSearch`.
#[derive(Clone, Debug)]
pub enum SearchStep {
    /// The node about to be expanded, with a snapshot of the frontier sizes.
    Expanding { node: State, status: String },
    /// The goal was popped. No further steps follow.
    Solved(Solution),
}

/// Lazy-deletion A* run one expansion per `step` call.
///
/// Each step returns the next non-stale node before it is expanded; its children are
/// pushed at the start of the following step. Dropping the search mid-way cancels it.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::Heuristic;
/// use npuzzle_solver::solver::{InteractiveSearch, SearchStep};
///
/// let board = Board::from_text("3\n1 2 3\n4 5 6\n0 7 8\n").unwrap();
/// let mut search = InteractiveSearch::new(&board, Heuristic::Manhattan).unwrap();
/// let mut expansions = 0;
/// let solution = loop {
///     match search.step() {
///         Some(SearchStep::Expanding { .. }) => expansions += 1,
///         Some(SearchStep::Solved(solution)) => break solution,
///         None => unreachable!(),
///     }
/// };
/// assert_eq!(solution.move_count(), 2);
/// assert!(expansions >= 2);
/// assert!(search.step().is_none());
/// ```
pub struct InteractiveSearch {
    search: Option<Search>,
    pending: Option<NodeId>,
    /// Extractions made by a search that has already finished.
    finished_iterations: usize,
}

impl InteractiveSearch {
    /// Starts a search from `board`.
    ///
    /// # Returns
    /// `Err(PuzzleError::Unsolvable)` if the board fails the parity test.
    pub fn new(board: &Board, heuristic: Heuristic) -> Result<Self, PuzzleError> {
        if !board.is_solvable() {
            return Err(PuzzleError::Unsolvable);
        }
        let mut root = State::root(board.clone());
        root.set_status(Status::Solving);
        Ok(InteractiveSearch {
            search: Some(Search::new(root, heuristic, Ranking::TotalCost)),
            pending: None,
            finished_iterations: 0,
        })
    }

    /// Advances to the next pause point.
    ///
    /// Returns `None` once the goal has been returned.
    ///
    /// # Panics
    /// Panics if the frontier empties, which the parity check in `new` rules out.
    pub fn step(&mut self) -> Option<SearchStep> {
        let search = self.search.as_mut()?;
        if let Some(id) = self.pending.take() {
            search.expand(id);
            search.record_peak();
        }

        loop {
            let id = match search.open.extract_min() {
                Ok(id) => id,
                Err(_) => frontier_exhausted(search.iterations),
            };
            search.iterations += 1;
            if search.is_stale(id) {
                continue;
            }
            if search.tree[id].is_goal() {
                let finished = self.search.take()?;
                self.finished_iterations = finished.iterations;
                return Some(SearchStep::Solved(finished.finish(id)));
            }

            let status = search.status_line();
            search.close(id);
            self.pending = Some(id);
            let node = search.tree[id].clone();
            return Some(SearchStep::Expanding { node, status });
        }
    }

    /// `Solving` until the goal has been returned, then `Done`.
    pub fn status(&self) -> Status {
        if self.search.is_some() {
            Status::Solving
        } else {
            Status::Done
        }
    }

    pub fn is_finished(&self) -> bool {
        self.search.is_none()
    }

    /// Frontier extractions so far.
    pub fn iterations(&self) -> usize {
        self.search
            .as_ref()
            .map_or(self.finished_iterations, |s| s.iterations)
    }

    pub fn open_len(&self) -> usize {
        self.search.as_ref().map_or(0, |s| s.open.len())
    }

    pub fn closed_len(&self) -> usize {
        self.search.as_ref().map_or(0, |s| s.closed.len())
    }
}

impl Iterator for InteractiveSearch {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: usize, tiles: &[u16]) -> Board {
        Board::from_tiles(size, tiles.to_vec()).unwrap()
    }

    /// Checks that every consecutive pair in the history is one legal slide apart.
    fn assert_valid_history(start: &Board, solution: &Solution) {
        assert_eq!(solution.history[0].board(), start);
        assert!(solution.goal().is_goal());
        for pair in solution.history.windows(2) {
            let next = pair[0].board().neighbors().any(|(_, b)| &b == pair[1].board());
            assert!(next, "history contains a non-adjacent step");
            assert_eq!(pair[1].g(), pair[0].g() + 1);
        }
        assert_eq!(solution.moves().len(), solution.move_count());
    }

    #[test]
    fn test_algorithm_from_str() {
        for a in Algorithm::ALL {
            assert_eq!(a.name().parse::<Algorithm>().unwrap(), a);
        }
        assert_eq!("a*".parse::<Algorithm>().unwrap(), Algorithm::Optimized);
        assert_eq!("slow-a*".parse::<Algorithm>().unwrap(), Algorithm::Reference);
        assert_eq!(
            "dijkstra".parse::<Algorithm>().unwrap_err(),
            PuzzleError::UnknownAlgorithm("dijkstra".to_string())
        );
    }

    #[test]
    fn test_solve_already_solved() {
        let goal = Board::solved(3).unwrap();
        for algorithm in Algorithm::ALL {
            let outcome = solve(&goal, algorithm, Heuristic::Manhattan);
            let solution = outcome.solution().unwrap();
            assert_eq!(solution.history.len(), 1);
            assert_eq!(solution.iterations, 1);
            assert!(solution.moves().is_empty());
            assert_eq!(solution.goal().status(), Status::Done);
        }
    }

    #[test]
    fn test_solve_one_slide() {
        let b = board(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let solution = solve(&b, Algorithm::Optimized, Heuristic::Manhattan)
            .into_solution()
            .unwrap();
        assert_eq!(solution.history.len(), 2);
        assert!(solution.iterations >= 1);
        assert_eq!(solution.moves(), vec![Direction::Right]);
        assert_valid_history(&b, &solution);
    }

    #[test]
    fn test_solve_unsolvable_returns_outcome() {
        let b = board(3, &[1, 2, 3, 4, 5, 6, 8, 7, 0]);
        for algorithm in Algorithm::ALL {
            let outcome = solve(&b, algorithm, Heuristic::LinearConflict);
            assert!(!outcome.is_solved());
            assert!(outcome.solution().is_none());
        }
    }

    #[test]
    fn test_solve_named() {
        let b = board(2, &[0, 1, 3, 2]);
        let outcome = solve_named(&b, "a*", "manhattan").unwrap();
        assert_eq!(outcome.solution().unwrap().move_count(), 2);

        assert!(matches!(
            solve_named(&b, "ida*", "manhattan"),
            Err(PuzzleError::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            solve_named(&b, "optimized", "chebyshev"),
            Err(PuzzleError::UnknownHeuristic(_))
        ));
    }

    #[test]
    fn test_optimal_lengths_agree() {
        let boards = [
            board(3, &[1, 2, 3, 4, 0, 6, 7, 5, 8]),
            board(3, &[0, 1, 3, 4, 2, 5, 7, 8, 6]),
            board(3, &[4, 1, 3, 7, 2, 6, 0, 5, 8]),
            board(3, &[1, 3, 6, 5, 0, 2, 4, 7, 8]),
        ];
        for b in &boards {
            assert!(b.is_solvable());
            let optimal = solve_optimized(State::root(b.clone()), Heuristic::Manhattan);
            assert_valid_history(b, &optimal);
            for heuristic in [Heuristic::Hamming, Heuristic::Cartesian, Heuristic::Manhattan] {
                let fast = solve_optimized(State::root(b.clone()), heuristic);
                let slow = solve_reference(State::root(b.clone()), heuristic);
                let greedy = solve_best_first(State::root(b.clone()), heuristic);
                assert_eq!(fast.move_count(), optimal.move_count(), "{}", heuristic);
                assert_eq!(slow.move_count(), optimal.move_count(), "{}", heuristic);
                assert!(greedy.move_count() >= optimal.move_count());
                assert_valid_history(b, &slow);
                assert_valid_history(b, &greedy);
            }
        }
    }

    #[test]
    fn test_known_optimal_length() {
        // Blank walks up twice then left twice in reverse: 4 moves.
        let b = board(3, &[1, 2, 3, 4, 5, 6, 7, 8, 0])
            .slide(Direction::Up)
            .and_then(|b| b.slide(Direction::Up))
            .and_then(|b| b.slide(Direction::Left))
            .and_then(|b| b.slide(Direction::Left))
            .unwrap();
        let solution = solve_optimized(State::root(b.clone()), Heuristic::Manhattan);
        assert_eq!(solution.move_count(), 4);
        assert_eq!(
            solution.moves(),
            vec![Direction::Right, Direction::Right, Direction::Down, Direction::Down]
        );
    }

    #[test]
    fn test_peak_size_and_iterations_reported() {
        let b = board(3, &[4, 1, 3, 7, 2, 6, 0, 5, 8]);
        let solution = solve_optimized(State::root(b), Heuristic::Manhattan);
        assert!(solution.iterations > 1);
        assert!(solution.peak_size >= solution.move_count());
    }

    #[test]
    #[should_panic(expected = "frontier exhausted")]
    fn test_frontier_exhaustion_panics() {
        // Bypasses the parity check: the 2x2 unsolvable component is finite.
        let b = board(2, &[2, 1, 3, 0]);
        solve_optimized(State::root(b), Heuristic::Manhattan);
    }

    #[test]
    #[should_panic(expected = "frontier exhausted")]
    fn test_reference_frontier_exhaustion_panics() {
        let b = board(2, &[2, 1, 3, 0]);
        solve_reference(State::root(b), Heuristic::Hamming);
    }

    #[test]
    fn test_reference_reopens_cheaper_closed_board() {
        let b = board(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]);
        let mut search = Search::new(State::root(b), Heuristic::Manhattan, Ranking::TotalCost);
        let root = search.open.extract_min().unwrap();
        search.close(root);

        let children = search.tree.children(root);
        assert_eq!(children.len(), 2);
        let (first, second) = (children[0].clone(), children[1].clone());

        // First child pretends to have been closed through a longer path
        search.closed.insert(first.key(), 5);
        assert_eq!(search.admit(root, first.clone()), Admission::Reopened);
        assert!(!search.closed.contains_key(&first.key()));
        assert_eq!(search.open.len(), 1);

        // Same board again: already on the frontier at the same g
        assert_eq!(search.admit(root, first), Admission::Skipped);
        assert_eq!(search.open.len(), 1);

        // Closed at an equal g is not reopened
        search.closed.insert(second.key(), 1);
        assert_eq!(search.admit(root, second.clone()), Admission::Skipped);
        assert_eq!(search.closed.get(&second.key()), Some(&1));
        search.closed.remove(&second.key());
        assert_eq!(search.admit(root, second), Admission::Queued);
        assert_eq!(search.open.len(), 2);
    }

    #[test]
    fn test_reference_with_linear_conflict() {
        for seed in 0..8 {
            let b = crate::generator::generate_with_seed(3, 14, false, seed).unwrap();
            let optimal = solve_optimized(State::root(b.clone()), Heuristic::Manhattan);
            let slow = solve_reference(State::root(b.clone()), Heuristic::LinearConflict);
            assert_valid_history(&b, &slow);
            assert!(slow.move_count() >= optimal.move_count(), "seed {}", seed);
        }
    }

    #[test]
    fn test_interactive_matches_optimized() {
        let b = board(3, &[4, 1, 3, 7, 2, 6, 0, 5, 8]);
        let batch = solve_optimized(State::root(b.clone()), Heuristic::Manhattan);

        let mut search = InteractiveSearch::new(&b, Heuristic::Manhattan).unwrap();
        assert_eq!(search.status(), Status::Solving);
        let mut expansions = 0;
        let mut solution = None;
        for step in search.by_ref() {
            match step {
                SearchStep::Expanding { node, status } => {
                    expansions += 1;
                    assert!(!node.is_goal());
                    assert!(status.starts_with("opened: "));
                    assert!(status.contains(" closed: "));
                }
                SearchStep::Solved(s) => solution = Some(s),
            }
        }
        let solution = solution.unwrap();
        assert_eq!(solution.move_count(), batch.move_count());
        assert!(expansions >= batch.move_count());
        assert!(search.is_finished());
        assert_eq!(search.status(), Status::Done);
        assert_valid_history(&b, &solution);
    }

    #[test]
    fn test_interactive_first_step_expands_root() {
        let b = board(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]);
        let mut search = InteractiveSearch::new(&b, Heuristic::Manhattan).unwrap();
        match search.step() {
            Some(SearchStep::Expanding { node, status }) => {
                assert_eq!(node.board(), &b);
                assert_eq!(status, "opened: 0 closed: 0");
            }
            other => panic!("unexpected step: {:?}", other),
        }
        assert_eq!(search.closed_len(), 1);
        assert_eq!(search.open_len(), 0);
        // The next step pushes the root's children first.
        assert!(search.step().is_some());
        assert!(search.open_len() > 0);
    }

    #[test]
    fn test_interactive_solved_board() {
        let mut search = InteractiveSearch::new(&Board::solved(3).unwrap(), Heuristic::Hamming).unwrap();
        match search.step() {
            Some(SearchStep::Solved(solution)) => assert_eq!(solution.history.len(), 1),
            other => panic!("unexpected step: {:?}", other),
        }
        assert!(search.step().is_none());
        assert_eq!(search.iterations(), 1);
    }

    #[test]
    fn test_interactive_iterations_survive_the_end() {
        let b = board(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]);
        let mut search = InteractiveSearch::new(&b, Heuristic::Manhattan).unwrap();
        let mut last_seen = 0;
        let solution = loop {
            match search.step() {
                Some(SearchStep::Expanding { .. }) => {
                    assert!(search.iterations() > last_seen);
                    last_seen = search.iterations();
                }
                Some(SearchStep::Solved(solution)) => break solution,
                None => panic!("search ended without a solution"),
            }
        };
        assert!(search.is_finished());
        assert_eq!(search.iterations(), solution.iterations);
        assert!(search.iterations() > last_seen);
        assert!(search.step().is_none());
        assert_eq!(search.iterations(), solution.iterations);
    }

    #[test]
    fn test_interactive_unsolvable() {
        let b = board(3, &[1, 2, 3, 4, 5, 6, 8, 7, 0]);
        assert_eq!(
            InteractiveSearch::new(&b, Heuristic::Manhattan).err(),
            Some(PuzzleError::Unsolvable)
        );
    }

    #[test]
    fn test_interactive_can_be_abandoned() {
        let b = board(3, &[4, 1, 3, 7, 2, 6, 0, 5, 8]);
        let mut search = InteractiveSearch::new(&b, Heuristic::Manhattan).unwrap();
        assert!(matches!(search.step(), Some(SearchStep::Expanding { .. })));
        assert!(!search.is_finished());
        drop(search);
    }
}
