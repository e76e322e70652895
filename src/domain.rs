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

//! Implicit state spaces.
//!
//! A [`Domain`] describes a (usually huge) state space by its successor
//! function and a pair of heuristics. The search algorithms only ever see
//! states through this interface.
//!
//! Two domains are provided: the [pancake problem][pancake] and the
//! [sliding-tile puzzle][puzzle].

pub mod pancake;
pub mod puzzle;

pub use self::pancake::{Pancake, Stack};
pub use self::puzzle::{Board, SlidingTile};

use crate::search::Direction;

use num_traits::PrimInt;

use std::error;
use std::fmt::{self, Debug};
use std::hash::Hash;

/// A state space with unit edge costs.
///
/// The heuristic must be admissible and consistent in both directions, i.e.
/// $h(u) \le 1 + h(v)$ for each edge $(u,v)$ and $h(t) = 0$ for the target
/// $t$. This is *not* checked (except for some debug assertions), an
/// inconsistent heuristic silently yields wrong results.
pub trait Domain {
    /// A configuration of the state space.
    ///
    /// Equality and hash must only depend on the configuration.
    type State: Clone + Eq + Hash + Debug;

    /// The type of path costs.
    type Cost: PrimInt + Debug;

    /// Return all states reachable from `u` by applying one operator.
    ///
    /// The state `u` itself must not be contained.
    fn successors(&self, u: &Self::State) -> Vec<Self::State>;

    /// Return a lower bound on the distance between `u` and `target`.
    ///
    /// For `Direction::Forward` the target is the goal state, for
    /// `Direction::Backward` it is the start state. The parameter `param`
    /// tunes the heuristic, its meaning depends on the domain.
    fn heuristic(&self, u: &Self::State, target: &Self::State, dir: Direction, param: usize) -> Self::Cost;

    /// Return `true` if `u` is the goal state `goal`.
    fn is_goal(&self, u: &Self::State, goal: &Self::State) -> bool {
        u == goal
    }

    /// Check that `src` and `snk` are states of this domain.
    ///
    /// The search algorithms call this once before the search starts.
    fn validate(&self, _src: &Self::State, _snk: &Self::State) -> Result<()> {
        Ok(())
    }
}

impl<'a, D> Domain for &'a D
where
    D: Domain,
{
    type State = D::State;
    type Cost = D::Cost;

    fn successors(&self, u: &Self::State) -> Vec<Self::State> {
        (**self).successors(u)
    }

    fn heuristic(&self, u: &Self::State, target: &Self::State, dir: Direction, param: usize) -> Self::Cost {
        (**self).heuristic(u, target, dir, param)
    }

    fn is_goal(&self, u: &Self::State, goal: &Self::State) -> bool {
        (**self).is_goal(u, goal)
    }

    fn validate(&self, src: &Self::State, snk: &Self::State) -> Result<()> {
        (**self).validate(src, snk)
    }
}

/// Error when constructing a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The data does not describe a valid configuration.
    InvalidState { msg: String },
    /// The state has the wrong size.
    DimensionMismatch { expected: usize, got: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            InvalidState { msg } => write!(fmt, "Invalid state: {}", msg),
            DimensionMismatch { expected, got } => {
                write!(fmt, "Wrong state size: expected {}, got {}", expected, got)
            }
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Check that `values` is a permutation of `first..first + values.len()`.
fn check_permutation(values: &[u8], first: usize) -> Result<()> {
    let mut seen = vec![false; values.len()];
    for &v in values {
        let i = (v as usize).checked_sub(first).filter(|&i| i < values.len());
        match i {
            Some(i) if !seen[i] => seen[i] = true,
            Some(_) => {
                return Err(Error::InvalidState {
                    msg: format!("value {} occurs twice", v),
                })
            }
            None => {
                return Err(Error::InvalidState {
                    msg: format!("value {} out of range {}..{}", v, first, first + values.len()),
                })
            }
        }
    }
    Ok(())
}
