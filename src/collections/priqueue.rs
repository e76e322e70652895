/*
 * Copyright (c) 2018, 2024 Frank Fischer <frank-fischer@shadow-soft.de>
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

mod binheap;
pub use self::binheap::BinHeap;

/// A priority queue whose elements can be addressed after insertion.
pub trait ItemPriQueue<K, V> {
    /// Handle for an item in the queue.
    type Item: Copy;

    /// Return the number of elements in the queue.
    fn len(&self) -> usize;

    /// Return `true` iff the queue contains no element.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all elements from the queue.
    fn clear(&mut self);

    /// Push the element with given `key` and `value` onto the queue.
    ///
    /// Return a handle referencing the element. That handle can be used in a
    /// subsequent call to `decrease_key` as long as the element has not been
    /// removed.
    fn push(&mut self, key: K, value: V) -> Self::Item;

    /// Decrease the value of some item in the queue.
    ///
    /// Returns `true` if the new value is smaller than the old one, otherwise
    /// the value is not changed.
    fn decrease_key(&mut self, item: Self::Item, value: V) -> bool;

    /// Remove and return the element with the smallest value from the queue or `None` if
    /// the queue is empty.
    fn pop_min(&mut self) -> Option<(K, V)>;

    /// Return the current value associated with some item in the queue.
    fn value(&self, item: Self::Item) -> &V;
}
