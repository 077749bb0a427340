//! Error type shared by board construction, solving and generation.

use thiserror::Error;

/// Errors reported by the puzzle core.
///
/// Exhausting the search frontier on a solvable board is not represented here:
/// it is an internal invariant violation and panics instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// The puzzle text is structurally malformed (line or token counts, non-numeric tokens).
    #[error("Invalid puzzle format: {0}")]
    Format(String),

    /// The tiles are not exactly the values `0..size*size`.
    #[error("Invalid puzzle: {0}")]
    InvalidPermutation(String),

    /// The board has more cells than a `u16` tile value can number.
    #[error("Puzzle is too big: {size} (max size is 255)")]
    TooLarge {
        /// The requested side length.
        size: usize,
    },

    /// The algorithm name is not one of the supported solvers.
    #[error("Bad solver: {0} (expected one of: reference, optimized, best-first)")]
    UnknownAlgorithm(String),

    /// The heuristic name is not one of the supported distance functions.
    #[error("Bad heuristic: {0} (expected one of: hamming, cartesian, manhattan, linear-conflict, permutation-count)")]
    UnknownHeuristic(String),

    /// No board of this size can be walked to this complexity.
    #[error("Can not generate a puzzle of size {size} with complexity {complexity}")]
    GenerationImpossible {
        /// The requested side length.
        size: usize,
        /// The requested walk length.
        complexity: usize,
    },

    /// The board fails the parity test.
    #[error("Puzzle is not solvable")]
    Unsolvable,
}
