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

//! Open and closed sets of a search direction.

use crate::search::Direction;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::{Index, IndexMut};

/// The search state of one direction.
///
/// A frontier consists of the set of open (reached but not yet expanded)
/// states, the set of closed (expanded) states and the cost of the best path
/// from the source of this direction to each reached state.
///
/// The costs are kept in a separate map keyed by the (immutable) state, so
/// the membership sets never contain data that changes while the state is
/// stored.
///
/// A state is never open and closed at the same time. Each state that is
/// open or closed has a cost.
pub struct Frontier<S, C> {
    open: HashSet<S>,
    closed: HashSet<S>,
    costs: HashMap<S, C>,
}

impl<S, C> Default for Frontier<S, C> {
    fn default() -> Self {
        Frontier {
            open: HashSet::new(),
            closed: HashSet::new(),
            costs: HashMap::new(),
        }
    }
}

impl<S, C> Frontier<S, C>
where
    S: Clone + Eq + Hash,
    C: Copy + PartialOrd,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Remove all states.
    pub fn clear(&mut self) {
        self.open.clear();
        self.closed.clear();
        self.costs.clear();
    }

    /// Return the number of open states.
    pub fn num_open(&self) -> usize {
        self.open.len()
    }

    /// Return the number of closed states.
    pub fn num_closed(&self) -> usize {
        self.closed.len()
    }

    /// Return `true` if there is no open state left.
    pub fn is_exhausted(&self) -> bool {
        self.open.is_empty()
    }

    pub fn contains_open(&self, u: &S) -> bool {
        self.open.contains(u)
    }

    pub fn contains_closed(&self, u: &S) -> bool {
        self.closed.contains(u)
    }

    /// Return the cost of the best known path to `u`.
    pub fn cost(&self, u: &S) -> Option<C> {
        self.costs.get(u).copied()
    }

    /// Add `u` with path cost `g` to the open states.
    ///
    /// The state must be neither open nor closed. An old cost of `u` is
    /// overwritten.
    pub fn insert_open(&mut self, u: S, g: C) {
        assert!(!self.closed.contains(&u), "Inserting closed state into open set");
        self.costs.insert(u.clone(), g);
        self.open.insert(u);
    }

    /// Move the open state `u` to the closed states.
    ///
    /// Returns `true` if `u` has been open.
    pub fn move_to_closed(&mut self, u: &S) -> bool {
        if let Some(u) = self.open.take(u) {
            self.closed.insert(u);
            true
        } else {
            false
        }
    }

    /// Remove `u` from the open or closed states.
    ///
    /// The cost of `u` is kept. Returns `true` if `u` has been open or closed.
    pub fn erase(&mut self, u: &S) -> bool {
        self.open.remove(u) || self.closed.remove(u)
    }

    /// Offer a path of cost `g` to `u`.
    ///
    /// If `u` is already open or closed with a cost not larger than `g`
    /// nothing happens and `false` is returned. Otherwise `u` is removed from
    /// the closed states (if necessary), gets cost `g` and becomes open.
    pub fn relax(&mut self, u: &S, g: C) -> bool {
        debug_assert!(
            !(self.contains_open(u) && self.contains_closed(u)),
            "State is open and closed"
        );
        let known = self.contains_open(u) || self.contains_closed(u);
        if known && self.cost(u).map(|old| old <= g).unwrap_or(false) {
            return false;
        }
        self.erase(u);
        self.insert_open(u.clone(), g);
        true
    }

    /// Return an iterator over all open states and their costs.
    pub fn open(&self) -> impl Iterator<Item = (&S, C)> + '_ {
        let costs = &self.costs;
        self.open.iter().map(move |u| (u, costs[u]))
    }
}

/// The frontiers of both search directions.
pub struct Frontiers<S, C>([Frontier<S, C>; 2]);

impl<S, C> Default for Frontiers<S, C> {
    fn default() -> Self {
        Frontiers([Frontier::default(), Frontier::default()])
    }
}

impl<S, C> Frontiers<S, C>
where
    S: Clone + Eq + Hash,
    C: Copy + PartialOrd,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Remove all states in both directions.
    pub fn clear(&mut self) {
        self.0[0].clear();
        self.0[1].clear();
    }

    /// Return `true` if one of the directions has no open state left.
    pub fn is_exhausted(&self) -> bool {
        self.0[0].is_exhausted() || self.0[1].is_exhausted()
    }
}

impl<S, C> Index<Direction> for Frontiers<S, C> {
    type Output = Frontier<S, C>;

    fn index(&self, dir: Direction) -> &Frontier<S, C> {
        &self.0[dir.index()]
    }
}

impl<S, C> IndexMut<Direction> for Frontiers<S, C> {
    fn index_mut(&mut self, dir: Direction) -> &mut Frontier<S, C> {
        &mut self.0[dir.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::{Frontier, Frontiers};
    use crate::search::Direction::{Backward, Forward};

    #[test]
    fn test_open_closed() {
        let mut f = Frontier::<&str, u32>::new();
        assert!(f.is_exhausted());
        assert_eq!(f.cost(&"a"), None);

        f.insert_open("a", 0);
        assert!(f.contains_open(&"a"));
        assert!(!f.contains_closed(&"a"));
        assert_eq!(f.cost(&"a"), Some(0));

        assert!(f.move_to_closed(&"a"));
        assert!(!f.move_to_closed(&"a"));
        assert!(!f.contains_open(&"a"));
        assert!(f.contains_closed(&"a"));
        assert!(f.is_exhausted());
        assert_eq!((f.num_open(), f.num_closed()), (0, 1));

        assert!(f.erase(&"a"));
        assert!(!f.erase(&"a"));
        assert!(!f.contains_closed(&"a"));
        // the cost survives until the state is inserted again
        assert_eq!(f.cost(&"a"), Some(0));
    }

    #[test]
    #[should_panic]
    fn test_insert_closed() {
        let mut f = Frontier::<u8, u32>::new();
        f.insert_open(1, 3);
        f.move_to_closed(&1);
        f.insert_open(1, 2);
    }

    #[test]
    fn test_relax() {
        let mut f = Frontier::<u8, u32>::new();
        assert!(f.relax(&1, 5));
        assert_eq!(f.cost(&1), Some(5));

        // not better
        assert!(!f.relax(&1, 5));
        assert!(!f.relax(&1, 7));
        assert_eq!(f.cost(&1), Some(5));

        // better while open
        assert!(f.relax(&1, 4));
        assert_eq!(f.cost(&1), Some(4));
        assert!(f.contains_open(&1));

        // better while closed: reopened
        f.move_to_closed(&1);
        assert!(!f.relax(&1, 4));
        assert!(f.contains_closed(&1));
        assert!(f.relax(&1, 2));
        assert!(f.contains_open(&1));
        assert!(!f.contains_closed(&1));
        assert_eq!(f.cost(&1), Some(2));
    }

    #[test]
    fn test_open_iter() {
        let mut f = Frontier::<u8, u32>::new();
        f.insert_open(1, 3);
        f.insert_open(2, 4);
        f.insert_open(3, 5);
        f.move_to_closed(&2);
        let mut open = f.open().map(|(&u, g)| (u, g)).collect::<Vec<_>>();
        open.sort();
        assert_eq!(open, vec![(1, 3), (3, 5)]);
    }

    #[test]
    fn test_frontiers() {
        let mut fs = Frontiers::<u8, u32>::new();
        fs[Forward].insert_open(1, 0);
        assert!(fs.is_exhausted());
        fs[Backward].insert_open(2, 0);
        assert!(!fs.is_exhausted());
        assert!(fs[Forward].contains_open(&1));
        assert!(!fs[Backward].contains_open(&1));
        fs.clear();
        assert_eq!(fs[Forward].cost(&1), None);
    }
}
