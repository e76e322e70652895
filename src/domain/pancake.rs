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

//! The pancake problem.
//!
//! A stack of $n$ pancakes of distinct sizes $1, \dots, n$ lies on a plate.
//! The only operation is to insert a spatula below the $k$-th pancake from the
//! top and flip the $k+1$ topmost pancakes. The goal is to sort the stack.
//!
//! The plate is represented as an additional pancake $n+1$ that always stays
//! at the bottom of the stack.
//!
//! # Example
//!
//! ```
//! use rs_bihs::domain::pancake::{Pancake, Stack};
//! use rs_bihs::search::gbfhs;
//!
//! let src = Stack::with_plate(&[3, 1, 2]).unwrap();
//! let snk = Stack::sorted(3);
//! assert_eq!(src.as_slice(), &[3, 1, 2, 4]);
//!
//! let sol = gbfhs::search(&Pancake, &src, &snk, 1, 0).unwrap();
//! assert_eq!(sol.cost, Some(2));
//! ```

use super::{check_permutation, Domain, Error, Result};
use crate::search::Direction;

use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A stack of pancakes from top to bottom, the last element is the plate.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Stack {
    cakes: Vec<u8>,
}

impl Stack {
    /// Create a stack from the pancake sizes including the plate.
    ///
    /// The values must be a permutation of $1, \dots, n+1$ with $n+1$ (the
    /// plate) at the last position.
    pub fn new(cakes: Vec<u8>) -> Result<Stack> {
        if cakes.len() < 2 || cakes.len() > u8::MAX as usize {
            return Err(Error::InvalidState {
                msg: format!("stack must contain 1 to {} pancakes", u8::MAX - 1),
            });
        }
        check_permutation(&cakes, 1)?;
        if cakes[cakes.len() - 1] as usize != cakes.len() {
            return Err(Error::InvalidState {
                msg: "the plate must be at the bottom".to_string(),
            });
        }
        Ok(Stack { cakes })
    }

    /// Create a stack from the pancake sizes and put it on a plate.
    pub fn with_plate(cakes: &[u8]) -> Result<Stack> {
        let mut cakes = cakes.to_vec();
        cakes.push((cakes.len() + 1).min(u8::MAX as usize) as u8);
        Stack::new(cakes)
    }

    /// Return the sorted stack of `n` pancakes.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero or larger than 254.
    pub fn sorted(n: usize) -> Stack {
        assert!(n > 0 && n < u8::MAX as usize, "Invalid number of pancakes");
        Stack {
            cakes: (1..=n as u8 + 1).collect(),
        }
    }

    /// Return a uniformly random stack of `n` pancakes.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Stack {
        let mut stack = Stack::sorted(n);
        stack.cakes[..n].shuffle(rng);
        stack
    }

    /// Return the number of pancakes (without the plate).
    pub fn num_pancakes(&self) -> usize {
        self.cakes.len() - 1
    }

    /// Return the pancakes from top to bottom including the plate.
    pub fn as_slice(&self) -> &[u8] {
        &self.cakes
    }

    /// Flip the pancakes at positions `0..=k`.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= k < self.num_pancakes()`.
    pub fn flip(&self, k: usize) -> Stack {
        assert!(k >= 1 && k < self.num_pancakes(), "Invalid flip position");
        let mut cakes = self.cakes.clone();
        cakes[..=k].reverse();
        Stack { cakes }
    }

    /// Return the number of gaps between positions `x..n` w.r.t. `target`.
    ///
    /// Two adjacent pancakes form a gap if they are not adjacent in
    /// `target`. If `target` is sorted, this is the number of adjacent
    /// pancakes whose sizes differ by more than one.
    pub fn gaps(&self, x: usize, target: &Stack) -> usize {
        debug_assert_eq!(self.cakes.len(), target.cakes.len());
        let mut position = vec![0isize; self.cakes.len() + 1];
        for (i, &c) in target.cakes.iter().enumerate() {
            position[c as usize] = i as isize;
        }
        self.cakes
            .windows(2)
            .skip(x)
            .filter(|w| (position[w[0] as usize] - position[w[1] as usize]).abs() > 1)
            .count()
    }
}

/// The pancake domain.
///
/// The forward heuristic is the GAP-x heuristic, where `x` is the heuristic
/// parameter: the number of gaps, ignoring the `x` topmost pancakes. The
/// backward heuristic is the blind heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pancake;

impl Domain for Pancake {
    type State = Stack;
    type Cost = u32;

    fn successors(&self, u: &Stack) -> Vec<Stack> {
        (1..u.num_pancakes()).map(|k| u.flip(k)).collect()
    }

    fn heuristic(&self, u: &Stack, target: &Stack, dir: Direction, gap_x: usize) -> u32 {
        match dir {
            Direction::Forward => u.gaps(gap_x, target) as u32,
            Direction::Backward => 0,
        }
    }

    fn validate(&self, src: &Stack, snk: &Stack) -> Result<()> {
        if src.cakes.len() != snk.cakes.len() {
            return Err(Error::DimensionMismatch {
                expected: snk.cakes.len(),
                got: src.cakes.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Pancake, Stack};
    use crate::domain::{Domain, Error};
    use crate::search::Direction::{Backward, Forward};

    use proptest::prelude::*;
    use std::collections::{HashMap, VecDeque};

    #[test]
    fn test_new() {
        assert!(Stack::new(vec![2, 1, 4, 3, 5]).is_ok());
        assert_eq!(Stack::with_plate(&[2, 1, 4, 3]), Stack::new(vec![2, 1, 4, 3, 5]));
        assert!(matches!(Stack::new(vec![2, 1, 5, 3, 4]), Err(Error::InvalidState { .. })));
        assert!(matches!(Stack::new(vec![2, 2, 4, 3, 5]), Err(Error::InvalidState { .. })));
        assert!(matches!(Stack::new(vec![1]), Err(Error::InvalidState { .. })));
        assert_eq!(Stack::sorted(4).as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_validate() {
        let s = Stack::new(vec![2, 1, 4, 3, 5]).unwrap();
        assert_eq!(Pancake.validate(&s, &Stack::sorted(4)), Ok(()));
        assert_eq!(
            Pancake.validate(&s, &Stack::sorted(6)),
            Err(Error::DimensionMismatch { expected: 7, got: 5 })
        );
    }

    #[test]
    fn test_flip() {
        let s = Stack::new(vec![2, 1, 4, 3, 5]).unwrap();
        assert_eq!(s.flip(1).as_slice(), &[1, 2, 4, 3, 5]);
        assert_eq!(s.flip(3).as_slice(), &[3, 4, 1, 2, 5]);
        assert_eq!(s.flip(2).flip(2), s);
    }

    #[test]
    fn test_successors() {
        let s = Stack::new(vec![2, 1, 4, 3, 5]).unwrap();
        let succs = Pancake.successors(&s);
        assert_eq!(succs.len(), 3);
        assert!(succs.iter().all(|t| *t != s));
        assert_eq!(succs[0], s.flip(1));
        assert_eq!(succs[2], s.flip(3));
    }

    #[test]
    fn test_gap_heuristic() {
        let s = Stack::new(vec![2, 1, 4, 3, 5]).unwrap();
        let t = Stack::sorted(4);
        assert_eq!(Pancake.heuristic(&s, &t, Forward, 0), 2);
        assert_eq!(Pancake.heuristic(&s, &t, Forward, 2), 1);
        assert_eq!(Pancake.heuristic(&s, &t, Forward, 4), 0);
        assert_eq!(Pancake.heuristic(&t, &t, Forward, 0), 0);
        assert_eq!(Pancake.heuristic(&s, &t, Backward, 0), 0);

        // w.r.t. an unsorted target
        assert_eq!(Pancake.heuristic(&s, &s, Forward, 0), 0);
        assert_eq!(Pancake.heuristic(&t, &s, Forward, 0), 2);
    }

    /// Distances to the sorted stack by breadth-first search.
    fn distances(n: usize) -> HashMap<Stack, u32> {
        let goal = Stack::sorted(n);
        let mut dist = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(goal.clone(), 0);
        queue.push_back(goal);
        while let Some(u) = queue.pop_front() {
            let d = dist[&u];
            for v in Pancake.successors(&u) {
                if !dist.contains_key(&v) {
                    dist.insert(v.clone(), d + 1);
                    queue.push_back(v);
                }
            }
        }
        dist
    }

    #[test]
    fn test_gap_admissible_consistent() {
        let goal = Stack::sorted(5);
        let dist = distances(5);
        assert_eq!(dist.len(), 120);
        for (u, &d) in &dist {
            let h = Pancake.heuristic(u, &goal, Forward, 0);
            assert!(h <= d, "{:?}: h={} d={}", u, h, d);
            for v in Pancake.successors(u) {
                assert!(h <= 1 + Pancake.heuristic(&v, &goal, Forward, 0));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_gap_bounded(perm in Just((1u8..=7).collect::<Vec<_>>()).prop_shuffle(), x in 0usize..8) {
            let s = Stack::with_plate(&perm).unwrap();
            let t = Stack::sorted(7);
            let h0 = Pancake.heuristic(&s, &t, Forward, 0);
            let hx = Pancake.heuristic(&s, &t, Forward, x);
            prop_assert!(hx <= h0);
            prop_assert!(h0 <= 7);
        }
    }
}
