/*
 * Copyright (c) 2024 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! # Heuristic search algorithms.
//!
//! This module contains the bidirectional search algorithms GBFHS
//! ([`gbfhs`]) and MMe ([`mme`]) and a plain A*-search ([`astar`]) used for
//! cross-validation.
//!
//! All algorithms work on an implicit state space given by a
//! [`Domain`][crate::domain::Domain] and compute the cost of a shortest path
//! between a start and a goal state. Edges have unit cost. The bidirectional
//! algorithms never construct a path: they maintain an upper bound
//! ([`Bound`]) on the optimal cost that is tightened whenever the forward and
//! the backward search meet in some state, and stop as soon as that bound
//! is proven to be optimal.
//!
//! # Example
//!
//! ```
//! use rs_bihs::domain::pancake::{Pancake, Stack};
//! use rs_bihs::search::{astar, gbfhs, mme};
//!
//! let src = Stack::new(vec![2, 1, 4, 3, 5]).unwrap();
//! let snk = Stack::sorted(4);
//!
//! let a = astar::search(&Pancake, &src, &snk, 0).unwrap();
//! let g = gbfhs::search(&Pancake, &src, &snk, 1, 0).unwrap();
//! let m = mme::search(&Pancake, &src, &snk, 1, 0).unwrap();
//!
//! assert_eq!(a.cost, Some(3));
//! assert_eq!(g.cost, Some(3));
//! assert_eq!(m.cost, Some(3));
//! ```

pub mod astar;
pub mod gbfhs;
pub mod mme;

pub use self::astar::AStar;
pub use self::gbfhs::Gbfhs;
pub use self::mme::Mme;

use crate::domain::{self, Domain};

use num_traits::PrimInt;
#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};
use tracing::trace;

use std::error;
use std::fmt;

/// Direction of search.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Search from the start state towards the goal state.
    Forward,
    /// Search from the goal state towards the start state.
    Backward,
}

impl Direction {
    /// Both directions, forward first.
    pub const BOTH: [Direction; 2] = [Direction::Forward, Direction::Backward];

    /// Return the opposite direction.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Index of the direction for storing per-direction data in pairs.
    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
        }
    }
}

/// The outcome of a search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Solution<C> {
    /// The cost of an optimal path or `None` if the goal is unreachable.
    pub cost: Option<C>,
    /// The number of nodes that have been expanded.
    pub nodes_expanded: usize,
}

impl<C> Solution<C> {
    /// Return `true` iff a path has been found.
    pub fn is_solvable(&self) -> bool {
        self.cost.is_some()
    }
}

/// Error during a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The minimal edge cost `eps` is zero.
    InvalidEps,
    /// The maximal number of expansions has been reached.
    ExpansionLimit { nodes_expanded: usize },
    /// The start or goal state does not belong to the domain.
    InvalidState(domain::Error),
}

impl From<domain::Error> for Error {
    fn from(err: domain::Error) -> Self {
        Error::InvalidState(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            InvalidEps => write!(fmt, "Minimal edge cost must be positive"),
            ExpansionLimit { nodes_expanded } => {
                write!(fmt, "Expansion limit reached after {} expansions", nodes_expanded)
            }
            InvalidState(err) => write!(fmt, "{}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::InvalidState(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The best known upper bound on the cost of a shortest path.
///
/// The bound starts at the maximal value of the cost type (meaning "no path
/// known") and is only ever decreased, namely whenever a state reached by one
/// search is also known to the other search. Each such collision describes
/// an actual path whose cost is the sum of both path costs.
#[derive(Clone, Copy, Debug)]
pub struct Bound<C> {
    value: C,
}

impl<C> Default for Bound<C>
where
    C: PrimInt,
{
    fn default() -> Self {
        Bound { value: C::max_value() }
    }
}

impl<C> Bound<C>
where
    C: PrimInt + fmt::Debug,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Forget all collisions.
    pub fn reset(&mut self) {
        self.value = C::max_value();
    }

    /// Return the raw value of the bound.
    ///
    /// This is the maximal value of `C` if no path is known.
    pub fn value(&self) -> C {
        self.value
    }

    /// Return the cost of the best known path.
    pub fn get(&self) -> Option<C> {
        if self.value == C::max_value() {
            None
        } else {
            Some(self.value)
        }
    }

    /// Register a collision.
    ///
    /// A state has been reached with cost `g` in one direction and is known
    /// with cost `g_opp` in the other direction. Returns `true` if the bound
    /// has been improved.
    pub fn collide(&mut self, g: C, g_opp: C) -> bool {
        let candidate = g.saturating_add(g_opp);
        if candidate < self.value {
            trace!(bound = ?candidate, previous = ?self.get(), "bound improved");
            self.value = candidate;
            true
        } else {
            false
        }
    }
}

/// Heuristic estimates of a single search instance.
///
/// The forward heuristic estimates the distance to the goal state, the
/// backward heuristic the distance to the start state.
pub(crate) struct Heuristic<'a, D>
where
    D: Domain,
{
    pub domain: &'a D,
    pub src: &'a D::State,
    pub snk: &'a D::State,
    pub param: usize,
}

impl<'a, D> Heuristic<'a, D>
where
    D: Domain,
{
    pub fn call(&self, u: &D::State, dir: Direction) -> D::Cost {
        match dir {
            Direction::Forward => self.domain.heuristic(u, self.snk, dir, self.param),
            Direction::Backward => self.domain.heuristic(u, self.src, dir, self.param),
        }
    }
}

/// Counts node expansions, optionally up to some limit.
pub(crate) struct Expansions {
    count: usize,
    limit: Option<usize>,
}

impl Expansions {
    pub fn new(limit: Option<usize>) -> Self {
        Expansions { count: 0, limit }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Expand `u` and return its successors.
    ///
    /// Fails if the expansion limit has been reached.
    pub fn expand<D>(&mut self, domain: &D, u: &D::State) -> Result<Vec<D::State>>
    where
        D: Domain,
    {
        if self.limit.map(|limit| self.count >= limit).unwrap_or(false) {
            return Err(Error::ExpansionLimit {
                nodes_expanded: self.count,
            });
        }
        self.count += 1;
        Ok(domain.successors(u))
    }
}

#[cfg(test)]
mod tests {
    use super::{Bound, Direction, Error, Expansions};
    use crate::domain::pancake::{Pancake, Stack};

    #[test]
    fn test_reverse() {
        for &dir in &Direction::BOTH {
            assert_ne!(dir, dir.reverse());
            assert_eq!(dir, dir.reverse().reverse());
        }
        assert_eq!(Direction::Forward.index(), 0);
        assert_eq!(Direction::Backward.index(), 1);
    }

    #[test]
    fn test_bound_monotone() {
        let mut bound = Bound::<u32>::new();
        assert_eq!(bound.get(), None);

        assert!(bound.collide(4, 5));
        assert_eq!(bound.get(), Some(9));
        assert!(!bound.collide(6, 6));
        assert_eq!(bound.get(), Some(9));
        assert!(!bound.collide(5, 4));
        assert!(bound.collide(3, 3));
        assert_eq!(bound.get(), Some(6));

        // saturates instead of wrapping around
        assert!(!bound.collide(u32::MAX, 1));
        assert_eq!(bound.value(), 6);

        bound.reset();
        assert_eq!(bound.get(), None);
    }

    #[test]
    fn test_expansion_limit() {
        let u = Stack::sorted(3);
        let mut expansions = Expansions::new(Some(2));
        assert_eq!(expansions.expand(&Pancake, &u).unwrap().len(), 2);
        assert_eq!(expansions.expand(&Pancake, &u).unwrap().len(), 2);
        assert_eq!(
            expansions.expand(&Pancake, &u),
            Err(Error::ExpansionLimit { nodes_expanded: 2 })
        );
        assert_eq!(expansions.count(), 2);
    }
}
