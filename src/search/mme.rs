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

//! Bidirectional search meeting in the middle (MMe).
//!
//! MMe always expands an open state of minimal priority
//!
//! $$pr_D(u) = \max\{g_D(u) + h_D(u), 2 g_D(u) + \varepsilon\}$$
//!
//! over both directions (forward on ties). Let $U$ be the cost of the best
//! path found so far. The search stops as soon as
//!
//! $$U \le \max\{C, fmin_F, fmin_B, gmin_F + gmin_B + \varepsilon\},$$
//!
//! where $C$ is the minimal priority and $fmin_D$ and $gmin_D$ are the
//! minimal $f$- and $g$-values of the open states of direction $D$.
//!
//! The minima are maintained in binary heaps with lazy deletion: a heap
//! entry is only valid if its state is still open with the same cost it had
//! when the entry was pushed, all other entries are discarded when they reach
//! the top.

use crate::collections::{Frontier, Frontiers};
use crate::domain::Domain;
use crate::search::Direction::{Backward, Forward};
use crate::search::{Bound, Error, Expansions, Heuristic, Result, Solution};

use num_traits::{One, PrimInt, Saturating, Zero};
use tracing::debug;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Return the priority of a state with path cost `g` and heuristic value `h`.
pub fn priority<C>(g: C, h: C, eps: C) -> C
where
    C: PrimInt,
{
    g.saturating_add(h).max(g.saturating_add(g).saturating_add(eps))
}

/// Heap entry, the smallest key is on top.
struct Entry<K, S, C> {
    key: K,
    state: S,
    /// The cost of `state` when the entry was created.
    g: C,
}

impl<K: Ord, S, C> PartialEq for Entry<K, S, C> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Ord, S, C> Eq for Entry<K, S, C> {}

impl<K: Ord, S, C> PartialOrd for Entry<K, S, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, S, C> Ord for Entry<K, S, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key.cmp(&self.key)
    }
}

/// Min-heap of open states with lazy deletion.
struct LazyHeap<K, S, C>(BinaryHeap<Entry<K, S, C>>);

impl<K, S, C> LazyHeap<K, S, C>
where
    K: Ord + Copy,
    S: Clone + Eq + Hash,
    C: Copy + PartialOrd,
{
    fn new() -> Self {
        LazyHeap(BinaryHeap::new())
    }

    fn clear(&mut self) {
        self.0.clear()
    }

    fn push(&mut self, key: K, state: S, g: C) {
        self.0.push(Entry { key, state, g })
    }

    /// Return the smallest valid entry.
    fn peek(&mut self, frontier: &Frontier<S, C>) -> Option<&Entry<K, S, C>> {
        while let Some(e) = self.0.peek() {
            if frontier.contains_open(&e.state) && frontier.cost(&e.state) == Some(e.g) {
                break;
            }
            self.0.pop();
        }
        self.0.peek()
    }
}

/// The open lists of one direction.
struct OpenLists<S, C> {
    /// Ordered by priority, then by path cost.
    by_priority: LazyHeap<(C, C), S, C>,
    by_f: LazyHeap<C, S, C>,
    by_g: LazyHeap<C, S, C>,
}

/// The minimal values over the open states of one direction.
#[derive(Clone, Copy, Debug)]
struct Minima<C> {
    pr: C,
    f: C,
    g: C,
}

impl<S, C> OpenLists<S, C>
where
    S: Clone + Eq + Hash,
    C: PrimInt,
{
    fn new() -> Self {
        OpenLists {
            by_priority: LazyHeap::new(),
            by_f: LazyHeap::new(),
            by_g: LazyHeap::new(),
        }
    }

    fn clear(&mut self) {
        self.by_priority.clear();
        self.by_f.clear();
        self.by_g.clear();
    }

    /// Register the open state `u` with path cost `g`.
    fn push(&mut self, u: &S, g: C, h: C, eps: C) {
        self.by_priority.push((priority(g, h, eps), g), u.clone(), g);
        self.by_f.push(g.saturating_add(h), u.clone(), g);
        self.by_g.push(g, u.clone(), g);
    }

    /// Return the minima, `None` if there is no open state.
    fn minima(&mut self, frontier: &Frontier<S, C>) -> Option<Minima<C>> {
        let (pr, _) = self.by_priority.peek(frontier)?.key;
        let f = self.by_f.peek(frontier)?.key;
        let g = self.by_g.peek(frontier)?.key;
        Some(Minima { pr, f, g })
    }

    /// Remove and return the open state of minimal priority.
    fn pop(&mut self, frontier: &Frontier<S, C>) -> Option<S> {
        self.by_priority.peek(frontier)?;
        self.by_priority.0.pop().map(|e| e.state)
    }
}

/// The MMe algorithm.
pub struct Mme<'a, D>
where
    D: Domain,
{
    domain: &'a D,

    /// The minimal edge cost.
    pub eps: D::Cost,
    /// The parameter passed to the heuristic of the domain.
    pub heuristic_param: usize,
    /// The maximal number of expansions, unlimited if `None`.
    pub max_expansions: Option<usize>,

    frontiers: Frontiers<D::State, D::Cost>,
    open: [OpenLists<D::State, D::Cost>; 2],
    best: Bound<D::Cost>,
}

impl<'a, D> Mme<'a, D>
where
    D: Domain,
{
    pub fn new(domain: &'a D) -> Self {
        Mme {
            domain,
            eps: D::Cost::one(),
            heuristic_param: 0,
            max_expansions: None,
            frontiers: Frontiers::new(),
            open: [OpenLists::new(), OpenLists::new()],
            best: Bound::new(),
        }
    }

    /// Compute the cost of a shortest path from `src` to `snk`.
    pub fn solve(&mut self, src: &D::State, snk: &D::State) -> Result<Solution<D::Cost>> {
        if self.eps.is_zero() {
            return Err(Error::InvalidEps);
        }
        self.domain.validate(src, snk)?;
        if self.domain.is_goal(src, snk) {
            return Ok(Solution {
                cost: Some(D::Cost::zero()),
                nodes_expanded: 0,
            });
        }

        let heur = Heuristic {
            domain: self.domain,
            src,
            snk,
            param: self.heuristic_param,
        };
        let eps = self.eps;
        let mut expansions = Expansions::new(self.max_expansions);

        self.frontiers.clear();
        self.open[0].clear();
        self.open[1].clear();
        self.best.reset();
        for &(dir, u) in &[(Forward, src), (Backward, snk)] {
            self.frontiers[dir].insert_open(u.clone(), D::Cost::zero());
            self.open[dir.index()].push(u, D::Cost::zero(), heur.call(u, dir), eps);
        }

        loop {
            let fwd = self.open[0].minima(&self.frontiers[Forward]);
            let bwd = self.open[1].minima(&self.frontiers[Backward]);
            let (fwd, bwd) = match (fwd, bwd) {
                (Some(fwd), Some(bwd)) => (fwd, bwd),
                _ => break,
            };

            let lower = fwd
                .pr
                .min(bwd.pr)
                .max(fwd.f)
                .max(bwd.f)
                .max(fwd.g.saturating_add(bwd.g).saturating_add(eps));
            if self.best.get().map(|best| best <= lower).unwrap_or(false) {
                break;
            }

            let dir = if fwd.pr <= bwd.pr { Forward } else { Backward };
            let u = match self.open[dir.index()].pop(&self.frontiers[dir]) {
                Some(u) => u,
                None => break,
            };
            let frontier = &mut self.frontiers[dir];
            frontier.move_to_closed(&u);
            let g = frontier.cost(&u).expect("Open state without cost") + D::Cost::one();

            for v in expansions.expand(self.domain, &u)? {
                debug_assert!(
                    heur.call(&u, dir) <= heur.call(&v, dir) + D::Cost::one(),
                    "Inconsistent heuristic"
                );
                if !self.frontiers[dir].relax(&v, g) {
                    continue;
                }
                self.open[dir.index()].push(&v, g, heur.call(&v, dir), eps);
                if let Some(g_opp) = self.frontiers[dir.reverse()].cost(&v) {
                    self.best.collide(g, g_opp);
                }
            }
        }

        debug!(
            cost = ?self.best.get(),
            nodes_expanded = expansions.count(),
            "mme finished"
        );
        Ok(Solution {
            cost: self.best.get(),
            nodes_expanded: expansions.count(),
        })
    }
}

/// Run MMe from `src` to `snk`.
///
/// - `eps` is the minimal edge cost (must be positive),
/// - `heuristic_param` is passed to the heuristic of the domain.
pub fn search<D>(
    domain: &D,
    src: &D::State,
    snk: &D::State,
    eps: D::Cost,
    heuristic_param: usize,
) -> Result<Solution<D::Cost>>
where
    D: Domain,
{
    let mut mme = Mme::new(domain);
    mme.eps = eps;
    mme.heuristic_param = heuristic_param;
    mme.solve(src, snk)
}
