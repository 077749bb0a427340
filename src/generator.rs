//! Scrambled puzzle generation by a randomized walk away from the solved board.
//!
//! The walk never revisits a board. When it runs out of unvisited neighbours it backtracks
//! to a sibling it passed over earlier. `complexity` is therefore the length of a
//! distinct-state walk, not the length of the shortest solution.
use crate::engine::Board;
use crate::error::PuzzleError;
use crate::state::State;
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Generates a board `complexity` distinct-state slides away from the solved board.
///
/// # Arguments
/// * `size`: Side length, at least 1.
/// * `complexity`: Target walk length.
/// * `force_unsolvable`: If `true`, two adjacent non-blank tiles near the start of the
///   board are swapped once the walk is done, flipping solvability parity.
/// * `rng`: Randomness source used to pick each step of the walk.
///
/// # Returns
/// * `Ok(Board)`, solvable when `force_unsolvable` is `false` and unsolvable otherwise.
/// * `Err(PuzzleError::GenerationImpossible)` if the walk exhausts every alternative
///   before reaching `complexity`, or if an unsolvable 1×1 board is requested.
/// * `Err(PuzzleError::Format)` / `Err(PuzzleError::TooLarge)` for unusable sizes.
pub fn generate<R: Rng + ?Sized>(
    size: usize,
    complexity: usize,
    force_unsolvable: bool,
    rng: &mut R,
) -> Result<Board, PuzzleError> {
    let impossible = PuzzleError::GenerationImpossible { size, complexity };
    let mut current = State::root(Board::solved(size)?);
    if force_unsolvable && size < 2 {
        warn!("a 1x1 board cannot be made unsolvable");
        return Err(impossible);
    }

    let mut visited = HashSet::new();
    let mut alternatives: Vec<State> = Vec::new();

    while current.g() < complexity {
        visited.insert(current.key());
        let mut options: Vec<State> = current
            .expand()
            .filter(|child| !visited.contains(&child.key()))
            .collect();

        if options.is_empty() {
            while alternatives
                .last()
                .is_some_and(|alt| visited.contains(&alt.key()))
            {
                alternatives.pop();
            }
            match alternatives.pop() {
                Some(previous) => {
                    current = previous;
                    continue;
                }
                None => {
                    warn!(
                        "can not generate: complexity {} is too high for board size {}",
                        complexity, size
                    );
                    return Err(impossible);
                }
            }
        }

        let pick = rng.gen_range(0..options.len());
        current = options.remove(pick);
        alternatives.extend(options);
    }

    let mut board = current.into_board();
    if force_unsolvable {
        flip_parity(&mut board);
    }
    debug!(
        "generated {0}x{0} board, complexity {1}, solvable: {2}",
        size,
        complexity,
        board.is_solvable()
    );
    Ok(board)
}

/// Swaps the first two cells, or the last two if the blank is among the first two.
/// Requires at least a 2×2 board.
fn flip_parity(board: &mut Board) {
    let len = board.tiles().len();
    let blank = board.blank_index();
    if blank == 0 || blank == 1 {
        board.swap_tiles(len - 1, len - 2);
    } else {
        board.swap_tiles(0, 1);
    }
}

/// `generate` with a `SmallRng` seeded from `seed`, for reproducible boards.
///
/// # Examples
/// ```
/// use npuzzle_solver::generator::generate_with_seed;
/// let a = generate_with_seed(4, 30, false, 7).unwrap();
/// let b = generate_with_seed(4, 30, false, 7).unwrap();
/// assert_eq!(a, b);
/// assert!(a.is_solvable());
/// assert!(!generate_with_seed(4, 30, true, 7).unwrap().is_solvable());
/// ```
pub fn generate_with_seed(
    size: usize,
    complexity: usize,
    force_unsolvable: bool,
    seed: u64,
) -> Result<Board, PuzzleError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    generate(size, complexity, force_unsolvable, &mut rng)
}

/// `generate` with a `SmallRng` seeded from system entropy.
pub fn generate_random(
    size: usize,
    complexity: usize,
    force_unsolvable: bool,
) -> Result<Board, PuzzleError> {
    let mut rng = SmallRng::from_entropy();
    generate(size, complexity, force_unsolvable, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_zero_is_solved() {
        let board = generate_with_seed(3, 0, false, 1).unwrap();
        assert!(board.is_solved());
    }

    #[test]
    fn test_generated_boards_are_solvable() {
        for size in 2..=5 {
            for seed in 0..20 {
                // The 2x2 solvable component has 12 boards, so walks stop at 11.
                let complexity = if size == 2 { 5 + seed as usize % 7 } else { 5 + seed as usize };
                let board = generate_with_seed(size, complexity, false, seed).unwrap();
                assert_eq!(board.size(), size);
                assert!(board.is_solvable(), "size {} seed {}", size, seed);
            }
        }
    }

    #[test]
    fn test_forced_unsolvable_boards() {
        for size in 2..=5 {
            for seed in 0..20 {
                let board = generate_with_seed(size, 10, true, seed).unwrap();
                assert!(!board.is_solvable(), "size {} seed {}", size, seed);
            }
        }
    }

    #[test]
    fn test_flip_parity_avoids_blank() {
        // Blank in the first cell: the last two cells are swapped instead.
        let mut board = Board::from_tiles(3, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        flip_parity(&mut board);
        assert_eq!(board.tiles(), &[0, 1, 2, 3, 4, 5, 6, 8, 7]);

        let mut board = Board::from_tiles(3, vec![1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        flip_parity(&mut board);
        assert_eq!(board.tiles(), &[1, 0, 2, 3, 4, 5, 6, 8, 7]);

        let mut board = Board::solved(3).unwrap();
        flip_parity(&mut board);
        assert_eq!(board.tiles(), &[2, 1, 3, 4, 5, 6, 7, 8, 0]);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = generate_with_seed(3, 25, false, 42).unwrap();
        let b = generate_with_seed(3, 25, false, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_walk_has_requested_length_without_backtracking_room() {
        // The 2x2 solvable component is a 12-cycle: the longest simple walk from the goal is 11.
        let furthest = generate_with_seed(2, 11, false, 3).unwrap();
        assert!(furthest.is_solvable());
        assert!(!furthest.is_solved());
    }

    #[test]
    fn test_generation_impossible() {
        let result = generate_with_seed(2, 12, false, 3);
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::GenerationImpossible {
                size: 2,
                complexity: 12
            }
        );
        assert!(generate_with_seed(1, 1, false, 0).is_err());
    }

    #[test]
    fn test_single_cell_board() {
        assert!(generate_with_seed(1, 0, false, 0).unwrap().is_solved());
        assert!(matches!(
            generate_with_seed(1, 0, true, 0),
            Err(PuzzleError::GenerationImpossible { .. })
        ));
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(
            generate_with_seed(0, 3, false, 0),
            Err(PuzzleError::Format(_))
        ));
    }

    #[test]
    fn test_generate_random_smoke() {
        let board = generate_random(3, 15, false).unwrap();
        assert!(board.is_solvable());
    }
}
