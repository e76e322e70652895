// Copyright (c) 2016, 2017, 2020, 2024 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Binary heap with decrease-key.

use crate::collections::ItemPriQueue;

/// A slot holding one element.
struct Slot<K, V> {
    key: K,
    value: V,
    /// Position of the element on the heap.
    pos: usize,
}

/// Binary min-heap whose elements are addressed by slot indices.
///
/// Slots of removed elements are reused by later insertions, so a handle
/// must not be used after its element has been popped.
pub struct BinHeap<K, V> {
    /// Slot indices in heap order.
    heap: Vec<usize>,
    /// The slots, `None` if free.
    slots: Vec<Option<Slot<K, V>>>,
    /// Indices of free slots.
    free: Vec<usize>,
}

impl<K, V> Default for BinHeap<K, V> {
    fn default() -> Self {
        BinHeap {
            heap: vec![],
            slots: vec![],
            free: vec![],
        }
    }
}

impl<K, V> BinHeap<K, V> {
    pub fn new() -> Self {
        Default::default()
    }

    fn slot(&self, item: usize) -> &Slot<K, V> {
        self.slots[item].as_ref().expect("Invalid heap item")
    }

    fn slot_mut(&mut self, item: usize) -> &mut Slot<K, V> {
        self.slots[item].as_mut().expect("Invalid heap item")
    }
}

impl<K, V> ItemPriQueue<K, V> for BinHeap<K, V>
where
    V: PartialOrd,
{
    type Item = usize;

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
        self.free.clear();
    }

    fn value(&self, item: usize) -> &V {
        &self.slot(item).value
    }

    fn push(&mut self, key: K, value: V) -> usize {
        let slot = Slot {
            key,
            value,
            pos: self.heap.len(),
        };
        let item = if let Some(item) = self.free.pop() {
            self.slots[item] = Some(slot);
            item
        } else {
            self.slots.push(Some(slot));
            self.slots.len() - 1
        };
        self.heap.push(item);
        self.upheap(item);
        item
    }

    fn decrease_key(&mut self, item: usize, value: V) -> bool {
        if self.slot(item).value > value {
            self.slot_mut(item).value = value;
            self.upheap(item);
            true
        } else {
            false
        }
    }

    fn pop_min(&mut self) -> Option<(K, V)> {
        if self.heap.is_empty() {
            return None;
        }
        let min_item = self.heap.swap_remove(0);
        if let Some(&item) = self.heap.first() {
            self.slot_mut(item).pos = 0;
            self.downheap(item);
        }
        self.free.push(min_item);
        self.slots[min_item].take().map(|slot| (slot.key, slot.value))
    }
}

impl<K, V> BinHeap<K, V>
where
    V: PartialOrd,
{
    /// Move `item` up until its parent does not have a larger value.
    fn upheap(&mut self, item: usize) {
        let mut cur_pos = self.slot(item).pos;
        while cur_pos > 0 {
            let parent_pos = (cur_pos - 1) / 2;
            let parent = self.heap[parent_pos];
            // Using `>` instead of `>=` moves the item as far up as possible,
            // so among equal values the most recent one comes first.
            if self.slot(item).value > self.slot(parent).value {
                break;
            }
            self.heap[cur_pos] = parent;
            self.slot_mut(parent).pos = cur_pos;
            cur_pos = parent_pos;
        }
        self.heap[cur_pos] = item;
        self.slot_mut(item).pos = cur_pos;
    }

    /// Move `item` down until no child has a smaller value.
    fn downheap(&mut self, item: usize) {
        let n = self.heap.len();
        let mut cur_pos = self.slot(item).pos;
        loop {
            let left_pos = 2 * cur_pos + 1;
            let right_pos = left_pos + 1;
            if left_pos >= n {
                break;
            }
            let next_pos = if right_pos < n
                && self.slot(self.heap[right_pos]).value < self.slot(self.heap[left_pos]).value
            {
                right_pos
            } else {
                left_pos
            };
            let next = self.heap[next_pos];
            if self.slot(item).value <= self.slot(next).value {
                break;
            }
            self.heap[cur_pos] = next;
            self.slot_mut(next).pos = cur_pos;
            cur_pos = next_pos;
        }
        self.heap[cur_pos] = item;
        self.slot_mut(item).pos = cur_pos;
    }
}
