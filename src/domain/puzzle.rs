// Copyright (c) 2024 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! The sliding-tile puzzle.
//!
//! A board of `rows x cols` cells holds the tiles $1, \dots, rows \cdot cols
//! - 1$ and one blank cell (represented by `0`). A move slides a tile
//! adjacent to the blank into the blank cell.
//!
//! # Example
//!
//! ```
//! use rs_bihs::domain::puzzle::{Board, SlidingTile};
//! use rs_bihs::search::mme;
//!
//! let puzzle = SlidingTile::new(3, 3);
//! let src = Board::new(3, 3, vec![1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
//! let snk = Board::solved(3, 3);
//!
//! let sol = mme::search(&puzzle, &src, &snk, 1, 0).unwrap();
//! assert_eq!(sol.cost, Some(2));
//! ```

use super::{check_permutation, Domain, Error, Result};
use crate::search::Direction;

use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A move of the blank.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in the order in which successors are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// A configuration of the board, tiles in row-major order.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Board {
    tiles: Vec<u8>,
}

impl Board {
    /// Create a board with `rows` rows and `cols` columns.
    ///
    /// The tiles must be a permutation of `0..rows * cols`.
    pub fn new(rows: usize, cols: usize, tiles: Vec<u8>) -> Result<Board> {
        if tiles.len() != rows * cols {
            return Err(Error::DimensionMismatch {
                expected: rows * cols,
                got: tiles.len(),
            });
        }
        check_permutation(&tiles, 0)?;
        Ok(Board { tiles })
    }

    /// Return the solved board: tiles in increasing order, blank last.
    pub fn solved(rows: usize, cols: usize) -> Board {
        let n = rows * cols;
        assert!(n >= 2 && n <= u8::MAX as usize + 1, "Invalid board size");
        Board {
            tiles: (1..n).chain(0..1).map(|t| t as u8).collect(),
        }
    }

    /// Return the tiles in row-major order.
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Return the index of the blank cell.
    pub fn blank(&self) -> usize {
        self.tiles.iter().position(|&t| t == 0).unwrap_or(0)
    }

    /// Return the number of pairs of (non-blank) tiles in wrong order.
    pub fn inversions(&self) -> usize {
        let order = self.tiles.iter().map(|&t| t as usize).collect::<Vec<_>>();
        count_inversions(&order)
    }

    /// Return the number of inversions w.r.t. the tile order of `target`.
    fn inversions_to(&self, target: &Board) -> usize {
        let position = positions(target);
        let order = self
            .tiles
            .iter()
            .map(|&t| if t == 0 { 0 } else { position[t as usize] + 1 })
            .collect::<Vec<_>>();
        count_inversions(&order)
    }
}

/// Count the inversions of all non-zero values.
fn count_inversions(order: &[usize]) -> usize {
    let mut n = 0;
    for (i, &a) in order.iter().enumerate().filter(|&(_, &a)| a != 0) {
        n += order[i + 1..].iter().filter(|&&b| b != 0 && b < a).count();
    }
    n
}

/// Return the index of each tile on `board`.
fn positions(board: &Board) -> Vec<usize> {
    let mut position = vec![0; board.tiles.len()];
    for (i, &t) in board.tiles.iter().enumerate() {
        position[t as usize] = i;
    }
    position
}

/// The sliding-tile puzzle of a fixed size.
///
/// The forward heuristic is the Manhattan distance of all tiles to their
/// target position, ignoring tiles with a number smaller than the heuristic
/// parameter. The backward heuristic is the blind heuristic.
#[derive(Clone, Copy, Debug)]
pub struct SlidingTile {
    rows: usize,
    cols: usize,
}

impl SlidingTile {
    /// Create the puzzle with `rows` rows and `cols` columns.
    ///
    /// # Panics
    ///
    /// Panics if the board has less than 2 or more than 256 cells.
    pub fn new(rows: usize, cols: usize) -> SlidingTile {
        assert!(
            rows * cols >= 2 && rows * cols <= u8::MAX as usize + 1,
            "Invalid board size"
        );
        SlidingTile { rows, cols }
    }

    /// Create a board of this puzzle from `tiles` in row-major order.
    pub fn board(&self, tiles: Vec<u8>) -> Result<Board> {
        Board::new(self.rows, self.cols, tiles)
    }

    /// Return the board after moving the blank, if the move is possible.
    pub fn make_move(&self, board: &Board, mv: Move) -> Option<Board> {
        let blank = board.blank();
        let (row, col) = (blank / self.cols, blank % self.cols);
        let other = match mv {
            Move::Up if row > 0 => blank - self.cols,
            Move::Down if row + 1 < self.rows => blank + self.cols,
            Move::Left if col > 0 => blank - 1,
            Move::Right if col + 1 < self.cols => blank + 1,
            _ => return None,
        };
        let mut tiles = board.tiles.clone();
        tiles.swap(blank, other);
        Some(Board { tiles })
    }

    /// Return `true` if `goal` can be reached from `start`.
    ///
    /// Each move changes the number of inversions by `cols - 1` (vertical
    /// moves) or not at all (horizontal moves). Hence on boards with an odd
    /// number of columns the parity of the inversions is invariant, on boards
    /// with an even number of columns the parity of the inversions plus the
    /// row of the blank is invariant.
    pub fn is_solvable(&self, start: &Board, goal: &Board) -> bool {
        let inversions = start.inversions_to(goal);
        if self.cols % 2 == 1 {
            inversions % 2 == 0
        } else {
            let rows = start.blank() / self.cols + goal.blank() / self.cols;
            (inversions + rows) % 2 == 0
        }
    }

    /// Apply `steps` random moves to `board`.
    ///
    /// The distance between `board` and the result is at most `steps`.
    pub fn random_walk<R: Rng + ?Sized>(&self, board: &Board, steps: usize, rng: &mut R) -> Board {
        let mut board = board.clone();
        for _ in 0..steps {
            let succs = self.successors(&board);
            if let Some(next) = succs.choose(rng) {
                board = next.clone();
            }
        }
        board
    }

    /// Return the sum of the Manhattan distances of tiles `first..`.
    fn manhattan(&self, u: &Board, target: &Board, first: usize) -> usize {
        let position = positions(target);
        let mut dist = 0;
        for (i, &t) in u.tiles.iter().enumerate() {
            let t = t as usize;
            if t == 0 || t < first {
                continue;
            }
            let j = position[t];
            dist += (i / self.cols).max(j / self.cols) - (i / self.cols).min(j / self.cols);
            dist += (i % self.cols).max(j % self.cols) - (i % self.cols).min(j % self.cols);
        }
        dist
    }
}

impl Domain for SlidingTile {
    type State = Board;
    type Cost = u32;

    fn successors(&self, u: &Board) -> Vec<Board> {
        Move::ALL.iter().filter_map(|&mv| self.make_move(u, mv)).collect()
    }

    fn heuristic(&self, u: &Board, target: &Board, dir: Direction, discount: usize) -> u32 {
        match dir {
            Direction::Forward => self.manhattan(u, target, discount) as u32,
            Direction::Backward => 0,
        }
    }

    fn validate(&self, src: &Board, snk: &Board) -> Result<()> {
        let n = self.rows * self.cols;
        for board in [src, snk] {
            if board.tiles.len() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    got: board.tiles.len(),
                });
            }
        }
        Ok(())
    }
}
