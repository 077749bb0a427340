//! Distance estimates from a board to the solved configuration.
//!
//! Every function has the shape of `DistanceFn`: it takes the row-major tiles and
//! the side length, returns a non-negative value, and returns exactly `0.0` on the
//! solved board. The `Heuristic` enum names them for configuration.
use crate::engine::{count_inversions, Board};
use crate::error::PuzzleError;
use std::fmt;
use std::str::FromStr;

/// Signature shared by all distance heuristics.
pub type DistanceFn = fn(&[u16], usize) -> f64;

/// Goal `(row, col)` of a non-blank tile.
fn goal_cell(tile: u16, size: usize) -> (usize, usize) {
    let idx = tile as usize - 1;
    (idx / size, idx % size)
}

/// Number of non-blank tiles outside their goal cell. Weak but admissible.
pub fn hamming(tiles: &[u16], _size: usize) -> f64 {
    tiles
        .iter()
        .enumerate()
        .filter(|&(i, &t)| t != 0 && t as usize != i + 1)
        .count() as f64
}

/// Sum of straight-line distances between each tile and its goal cell.
///
/// Admissible, since a slide never moves a tile further than one unit, but a poor
/// guide on a grid where diagonal moves do not exist.
pub fn cartesian(tiles: &[u16], size: usize) -> f64 {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t != 0)
        .map(|(i, &t)| {
            let (goal_r, goal_c) = goal_cell(t, size);
            let dr = (i / size) as f64 - goal_r as f64;
            let dc = (i % size) as f64 - goal_c as f64;
            (dr * dr + dc * dc).sqrt()
        })
        .sum()
}

/// Sum of `|Δrow| + |Δcol|` over all tiles. Admissible; the usual default.
pub fn manhattan(tiles: &[u16], size: usize) -> f64 {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t != 0)
        .map(|(i, &t)| {
            let (goal_r, goal_c) = goal_cell(t, size);
            (i / size).abs_diff(goal_r) + (i % size).abs_diff(goal_c)
        })
        .sum::<usize>() as f64
}

/// Counts pairs of tiles that share their goal line (row or column), currently sit
/// on that line, and appear in reversed order along it.
fn line_conflicts(tiles: &[u16], size: usize) -> usize {
    let mut conflicts = 0;

    // Row conflicts
    for row in 0..size {
        for a in 0..size {
            let ta = tiles[row * size + a];
            if ta == 0 || goal_cell(ta, size).0 != row {
                continue;
            }
            for b in a + 1..size {
                let tb = tiles[row * size + b];
                if tb != 0 && goal_cell(tb, size).0 == row && goal_cell(ta, size).1 > goal_cell(tb, size).1 {
                    conflicts += 1;
                }
            }
        }
    }

    // Column conflicts
    for col in 0..size {
        for a in 0..size {
            let ta = tiles[a * size + col];
            if ta == 0 || goal_cell(ta, size).1 != col {
                continue;
            }
            for b in a + 1..size {
                let tb = tiles[b * size + col];
                if tb != 0 && goal_cell(tb, size).1 == col && goal_cell(ta, size).0 > goal_cell(tb, size).0 {
                    conflicts += 1;
                }
            }
        }
    }

    conflicts
}

/// Manhattan distance plus 2 for every reversed pair on a shared goal line.
///
/// Much stronger than plain manhattan in practice. Counting every pair (rather than
/// the minimum number of tiles to lift out of a line) can overestimate when three or
/// more tiles conflict on one line, so treat it as fast and usually optimal, not as a
/// guaranteed lower bound.
pub fn linear_conflict(tiles: &[u16], size: usize) -> f64 {
    manhattan(tiles, size) + 2.0 * line_conflicts(tiles, size) as f64
}

/// Inversion count, plus one when the last cell is not the blank.
///
/// Diagnostic only: it is the solvability signal, not a distance, and it does not
/// guide search well.
pub fn permutation_count(tiles: &[u16], _size: usize) -> f64 {
    let mut count = count_inversions(tiles);
    if tiles.last().is_some_and(|&t| t != 0) {
        count += 1;
    }
    count as f64
}

/// The selectable distance heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    Hamming,
    Cartesian,
    Manhattan,
    LinearConflict,
    PermutationCount,
}

impl Heuristic {
    pub const ALL: [Heuristic; 5] = [
        Heuristic::Hamming,
        Heuristic::Cartesian,
        Heuristic::Manhattan,
        Heuristic::LinearConflict,
        Heuristic::PermutationCount,
    ];

    /// Configuration name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Hamming => "hamming",
            Heuristic::Cartesian => "cartesian",
            Heuristic::Manhattan => "manhattan",
            Heuristic::LinearConflict => "linear-conflict",
            Heuristic::PermutationCount => "permutation-count",
        }
    }

    pub fn function(&self) -> DistanceFn {
        match self {
            Heuristic::Hamming => hamming,
            Heuristic::Cartesian => cartesian,
            Heuristic::Manhattan => manhattan,
            Heuristic::LinearConflict => linear_conflict,
            Heuristic::PermutationCount => permutation_count,
        }
    }

    pub fn evaluate(&self, board: &Board) -> f64 {
        (self.function())(board.tiles(), board.size())
    }

    /// `true` for the heuristics that never overestimate, so A* with them is optimal.
    pub fn is_admissible(&self) -> bool {
        matches!(
            self,
            Heuristic::Hamming | Heuristic::Cartesian | Heuristic::Manhattan
        )
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hamming" => Ok(Heuristic::Hamming),
            "cartesian" => Ok(Heuristic::Cartesian),
            "manhattan" => Ok(Heuristic::Manhattan),
            "linear-conflict" => Ok(Heuristic::LinearConflict),
            "permutation-count" | "permutations" => Ok(Heuristic::PermutationCount),
            _ => Err(PuzzleError::UnknownHeuristic(s.to_string())),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_SLIDE: [u16; 9] = [1, 2, 3, 4, 5, 6, 7, 0, 8];
    const ROW_SWAP: [u16; 9] = [2, 1, 3, 4, 5, 6, 7, 8, 0];

    #[test]
    fn test_all_heuristics_zero_at_goal() {
        for size in 1..=5 {
            let goal = Board::solved(size).unwrap();
            for h in Heuristic::ALL {
                assert_eq!(h.evaluate(&goal), 0.0, "{} on size {}", h, size);
            }
        }
    }

    #[test]
    fn test_hamming() {
        assert_eq!(hamming(&ONE_SLIDE, 3), 1.0);
        assert_eq!(hamming(&ROW_SWAP, 3), 2.0);
        assert_eq!(hamming(&[8, 7, 6, 5, 4, 3, 2, 1, 0], 3), 8.0);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan(&ONE_SLIDE, 3), 1.0);
        assert_eq!(manhattan(&ROW_SWAP, 3), 2.0);
        // 8 sits at (0,0), goal (2,1): 3 moves. 1 sits at (2,1), goal (0,0): 3 moves.
        assert_eq!(manhattan(&[8, 2, 3, 4, 5, 6, 7, 1, 0], 3), 6.0);
    }

    #[test]
    fn test_cartesian() {
        // 1 at (1,1) distance sqrt(2), 5 at (0,0) distance sqrt(2).
        let tiles = [5, 2, 3, 4, 1, 6, 7, 8, 0];
        let d = cartesian(&tiles, 3);
        assert!((d - 2.0 * 2f64.sqrt()).abs() < 1e-9);
        assert_eq!(cartesian(&ONE_SLIDE, 3), 1.0);
    }

    #[test]
    fn test_linear_conflict_row() {
        assert_eq!(linear_conflict(&ROW_SWAP, 3), 4.0);
        assert_eq!(line_conflicts(&ONE_SLIDE, 3), 0);
    }

    #[test]
    fn test_linear_conflict_column() {
        // 1 and 4 swapped in the first column.
        let tiles = [4, 2, 3, 1, 5, 6, 7, 8, 0];
        assert_eq!(line_conflicts(&tiles, 3), 1);
        assert_eq!(linear_conflict(&tiles, 3), 4.0);
    }

    #[test]
    fn test_linear_conflict_ignores_tiles_off_their_line() {
        // 4 sits in row 0 but belongs in row 1, so it cannot conflict with 1 or 2.
        // Remaining pairs: 2 before 1 in row 0, 6 above 3 in column 2.
        let tiles = [2, 4, 1, 0, 5, 6, 7, 8, 3];
        assert_eq!(line_conflicts(&tiles, 3), 2);
    }

    #[test]
    fn test_linear_conflict_dominates_manhattan() {
        let boards: [[u16; 9]; 3] = [
            [8, 1, 3, 4, 0, 2, 7, 6, 5],
            [3, 2, 1, 6, 5, 4, 0, 8, 7],
            [1, 2, 3, 4, 5, 6, 0, 7, 8],
        ];
        for tiles in boards {
            assert!(linear_conflict(&tiles, 3) >= manhattan(&tiles, 3));
        }
    }

    #[test]
    fn test_permutation_count() {
        assert_eq!(permutation_count(&[1, 2, 3, 4, 5, 6, 8, 7, 0], 3), 1.0);
        // No inversions, last cell occupied.
        assert_eq!(permutation_count(&ONE_SLIDE, 3), 1.0);
        assert_eq!(permutation_count(&[0, 1, 2, 3], 2), 1.0);
    }

    #[test]
    fn test_heuristic_from_str() {
        for h in Heuristic::ALL {
            assert_eq!(h.name().parse::<Heuristic>().unwrap(), h);
        }
        assert_eq!(
            "permutations".parse::<Heuristic>().unwrap(),
            Heuristic::PermutationCount
        );
        assert_eq!(
            "euclid".parse::<Heuristic>().unwrap_err(),
            PuzzleError::UnknownHeuristic("euclid".to_string())
        );
    }

    #[test]
    fn test_admissibility_flags() {
        assert!(Heuristic::Manhattan.is_admissible());
        assert!(!Heuristic::LinearConflict.is_admissible());
        assert!(!Heuristic::PermutationCount.is_admissible());
    }
}
