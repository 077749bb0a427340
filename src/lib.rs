//! # N-Puzzle Solver Library
//!
//! This library generates and solves sliding-tile ("n-puzzle") instances: an N×N grid
//! of numbered tiles and one blank, solved by sliding tiles into the blank until the
//! tiles read `1..N²-1` in row-major order with the blank last.
//!
//! It is used by three binaries:
//! - `npuzzle`: Generates puzzles and solves puzzle files from the command line.
//! - `step_solver`: Walks through an A* search one expansion at a time.
//! - `heuristic_evaluator`: Compares the heuristics on a batch of seeded puzzles.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), its canonical key (`BoardKey`),
//!   slide directions and the solvability parity test.
//! - `state`: Search nodes (`State`), the arena that owns them (`SearchTree`) and the
//!   `Status` lifecycle.
//! - `heuristics`: Distance estimates and the `Heuristic` selector.
//! - `queue`: The bucketed min-priority queue used as the frontier.
//! - `solver`: The reference, optimized and best-first solvers and the step-wise
//!   `InteractiveSearch`.
//! - `generator`: Randomized reverse-walk puzzle generation.
//! - `puzzle`: A `Puzzle` handle bundling a board with its solve status and solution.
//! - `utils`: Parsing and rendering of the puzzle text format.
//! - `error`: The `PuzzleError` type.

pub mod engine;
pub mod error;
pub mod generator;
pub mod heuristics;
pub mod puzzle;
pub mod queue;
pub mod solver;
pub mod state;
pub mod utils;

pub use error::PuzzleError;
