//! Core board representation for the sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Direction`: The four ways the blank can travel.
//! - `Board`: An N×N row-major tile array with exactly one blank (`0`), plus
//!   validation, the parity-based solvability test and neighbour expansion.
//! - `BoardKey`: A compact, collision-free identity used to deduplicate boards
//!   inside frontier, closed and visited sets.
use crate::error::PuzzleError;
use crate::utils;
use std::fmt;

/// Boards must number fewer cells than this so every tile fits in a `u16`.
pub const MAX_CELLS: usize = u16::MAX as usize;

/// Largest board that can be packed into a single `u64` key (4 bits per cell).
const PACKED_CELLS: usize = 16;

/// Direction the blank travels when a neighbouring tile slides into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Blank moves one row up.
    Up,
    /// Blank moves one row down.
    Down,
    /// Blank moves one column right.
    Right,
    /// Blank moves one column left.
    Left,
}

impl Direction {
    /// Expansion order. Only matters for tie-breaking among equal-priority frontier entries.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
    ];

    /// Recovers the direction that took the blank from `from` to `to` on a board of side `size`.
    ///
    /// Returns `None` if the two cells are not orthogonally adjacent.
    pub fn between(from: usize, to: usize, size: usize) -> Option<Self> {
        if to + size == from {
            Some(Direction::Up)
        } else if from + size == to {
            Some(Direction::Down)
        } else if to == from + 1 && from % size != size - 1 {
            Some(Direction::Right)
        } else if from == to + 1 && from % size != 0 {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Right => "Right",
            Direction::Left => "Left",
        };
        write!(f, "{}", s)
    }
}

/// Canonical identity of a board's content.
///
/// Boards of up to 16 cells are packed into a `u64`, larger boards keep their
/// tiles verbatim. Both forms carry enough information to be injective.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoardKey {
    /// Four bits per cell, first cell in the lowest nibble.
    Packed {
        /// Side length, needed to tell a 2×2 board from a 3×3 one with the same nibbles.
        size: u8,
        /// Packed tile values.
        bits: u64,
    },
    /// Tiles copied as-is.
    Wide(Box<[u16]>),
}

/// An N×N sliding-tile board stored row-major.
///
/// The blank is the value `0`. A `Board` can only be built through a
/// validating constructor, so its tiles are always exactly `0..size*size`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u16>,
    blank: usize,
}

/// Rejects sizes the core cannot represent.
pub(crate) fn check_size(size: usize) -> Result<(), PuzzleError> {
    if size == 0 {
        return Err(PuzzleError::Format(
            "Invalid puzzle size: 0".to_string(),
        ));
    }
    match size.checked_mul(size) {
        Some(cells) if cells < MAX_CELLS => Ok(()),
        _ => Err(PuzzleError::TooLarge { size }),
    }
}

/// Counts pairs `i < j` of non-blank tiles with `tiles[i] > tiles[j]`.
///
/// This is the quantity behind both the solvability parity test and the
/// `permutation-count` heuristic.
pub fn count_inversions(tiles: &[u16]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

impl Board {
    /// Builds the goal board of side `size`: `1..size*size` in row-major order, blank last.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::solved(3).unwrap();
    /// assert_eq!(board.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
    /// assert!(board.is_solved());
    /// ```
    pub fn solved(size: usize) -> Result<Self, PuzzleError> {
        check_size(size)?;
        let total = size * size;
        let mut tiles: Vec<u16> = (1..=total as u16).collect();
        tiles[total - 1] = 0;
        Ok(Board {
            size,
            tiles,
            blank: total - 1,
        })
    }

    /// Creates a board from a row-major tile list.
    ///
    /// # Arguments
    /// * `size`: The side length N.
    /// * `tiles`: Exactly N² values forming a permutation of `0..N²`.
    ///
    /// # Returns
    /// * `Ok(Board)` if the tiles are a valid permutation.
    /// * `Err(PuzzleError::Format)` if the tile count does not match N².
    /// * `Err(PuzzleError::InvalidPermutation)` if a value is missing, repeated or out of range.
    pub fn from_tiles(size: usize, tiles: Vec<u16>) -> Result<Self, PuzzleError> {
        check_size(size)?;
        let total = size * size;
        if tiles.len() != total {
            return Err(PuzzleError::Format(format!(
                "Expected {} tiles for a puzzle of size {}, got {}",
                total,
                size,
                tiles.len()
            )));
        }

        let mut seen = vec![false; total];
        for &tile in &tiles {
            let idx = tile as usize;
            if idx >= total {
                return Err(PuzzleError::InvalidPermutation(format!(
                    "tile {} is out of range 0..{}",
                    tile, total
                )));
            }
            if seen[idx] {
                return Err(PuzzleError::InvalidPermutation(format!(
                    "tile {} appears more than once",
                    tile
                )));
            }
            seen[idx] = true;
        }

        // Every value in range appeared exactly once, so the blank is present.
        let blank = tiles.iter().position(|&t| t == 0).unwrap_or_default();
        Ok(Board { size, tiles, blank })
    }

    /// Parses the puzzle text format (see `utils::parse_board`) into a validated board.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::from_text("3\n1 2 3\n4 5 6 # comment\n7 0 8\n").unwrap();
    /// assert_eq!(board.blank_index(), 7);
    /// assert!(Board::from_text("2\n1 2\n3 3\n").is_err());
    /// ```
    pub fn from_text(input: &str) -> Result<Self, PuzzleError> {
        let (size, tiles) = utils::parse_board(input)?;
        Board::from_tiles(size, tiles)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    /// Row-major index of the blank cell.
    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// `true` if every tile sits in its goal cell.
    pub fn is_solved(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles
            .iter()
            .enumerate()
            .all(|(i, &t)| if i == last { t == 0 } else { t as usize == i + 1 })
    }

    /// Parity test for reachability of the goal board.
    ///
    /// With an odd side the board is solvable iff the inversion count is even. With
    /// an even side it is solvable iff exactly one of "inversion count is even" and
    /// "blank row counted from the bottom (1-based) is even" holds.
    pub fn is_solvable(&self) -> bool {
        let inversions_even = count_inversions(&self.tiles) % 2 == 0;
        if self.size % 2 == 1 {
            inversions_even
        } else {
            let row_from_bottom = self.size - self.blank / self.size;
            let row_even = row_from_bottom % 2 == 0;
            row_even != inversions_even
        }
    }

    /// Returns the board obtained by moving the blank one cell in `direction`,
    /// or `None` if that would leave the grid.
    pub fn slide(&self, direction: Direction) -> Option<Board> {
        let spot = self.blank;
        let target = match direction {
            Direction::Up if spot >= self.size => spot - self.size,
            Direction::Down if spot + self.size < self.tiles.len() => spot + self.size,
            Direction::Right if spot % self.size != self.size - 1 => spot + 1,
            Direction::Left if spot % self.size != 0 => spot - 1,
            _ => return None,
        };
        let mut tiles = self.tiles.clone();
        tiles.swap(spot, target);
        Some(Board {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// All boards one legal slide away, in `Direction::ALL` order.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, Board)> + '_ {
        Direction::ALL
            .iter()
            .filter_map(move |&dir| self.slide(dir).map(|board| (dir, board)))
    }

    /// Exchanges two non-blank cells. Flips solvability parity.
    ///
    /// # Panics
    /// Panics if either cell holds the blank.
    pub(crate) fn swap_tiles(&mut self, a: usize, b: usize) {
        assert!(
            a != self.blank && b != self.blank,
            "swap_tiles must not move the blank"
        );
        self.tiles.swap(a, b);
    }

    /// Canonical, collision-free identity of this board's content.
    pub fn key(&self) -> BoardKey {
        if self.tiles.len() <= PACKED_CELLS {
            let bits = self
                .tiles
                .iter()
                .enumerate()
                .fold(0u64, |acc, (i, &t)| acc | (u64::from(t) << (4 * i)));
            BoardKey::Packed {
                size: self.size as u8,
                bits,
            }
        } else {
            BoardKey::Wide(self.tiles.clone().into_boxed_slice())
        }
    }

    /// Canonical text form: the side length, then one padded row per line.
    pub fn to_text(&self) -> String {
        utils::format_board(self.size, &self.tiles)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
