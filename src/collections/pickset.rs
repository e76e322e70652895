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

use std::collections::HashMap;
use std::hash::Hash;

/// A set whose elements can be accessed by position.
///
/// The elements are stored contiguously, so an element chosen by a random
/// position in `0..len()` is chosen uniformly. Insertion and removal (by
/// by position) take constant expected time, removal may change the position of
/// the last element.
pub struct PickSet<T> {
    /// The elements.
    items: Vec<T>,
    /// Position of each element in `items`.
    positions: HashMap<T, usize>,
}

impl<T> Default for PickSet<T> {
    fn default() -> Self {
        PickSet {
            items: vec![],
            positions: HashMap::new(),
        }
    }
}

impl<T> PickSet<T>
where
    T: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.positions.clear();
    }

    /// Add an element.
    ///
    /// Return `true` iff `x` had not been contained in the set.
    pub fn insert(&mut self, x: T) -> bool {
        if self.positions.contains_key(&x) {
            return false;
        }
        self.positions.insert(x.clone(), self.items.len());
        self.items.push(x);
        true
    }

    /// Remove and return the element at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn take(&mut self, i: usize) -> T {
        let x = self.items.swap_remove(i);
        self.positions.remove(&x);
        if let Some(moved) = self.items.get(i) {
            self.positions.insert(moved.clone(), i);
        }
        x
    }
}
