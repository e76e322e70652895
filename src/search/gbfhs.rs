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

//! General Best-First Heuristic Search (GBFHS).
//!
//! GBFHS is a front-to-end bidirectional search driven by a lower bound
//! `fLim` on the optimal cost. In each iteration the budget
//! $gLim_F + gLim_B = fLim - \varepsilon + 1$ is split among both directions
//! and all states with $g_D + h_D \le fLim$ and $g_D < gLim_D$ are expanded,
//! in uniformly random order across both directions. If no path of cost
//! `fLim` has been found, `fLim` is increased by one.
//!
//! The search terminates as soon as the best known path has cost `fLim` or
//! one of the directions has run out of open states.
//!
//! # Example
//!
//! ```
//! use rs_bihs::domain::puzzle::{Board, SlidingTile};
//! use rs_bihs::search::Gbfhs;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let puzzle = SlidingTile::new(3, 3);
//! let src = Board::new(3, 3, vec![1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
//! let snk = Board::solved(3, 3);
//!
//! let mut gbfhs = Gbfhs::new(&puzzle, StdRng::seed_from_u64(42));
//! gbfhs.max_expansions = Some(1000);
//! let sol = gbfhs.solve(&src, &snk).unwrap();
//! assert_eq!(sol.cost, Some(2));
//! assert!(sol.nodes_expanded > 0);
//! ```

use crate::collections::{Frontiers, PickSet};
use crate::domain::Domain;
use crate::search::Direction::{self, Backward, Forward};
use crate::search::{Bound, Error, Expansions, Heuristic, Result, Solution};

use num_traits::{One, PrimInt, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// The g-value limits of both directions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Limits<C> {
    pub fwd: C,
    pub bwd: C,
}

impl<C> Limits<C>
where
    C: Copy,
{
    /// Return the limit of direction `dir`.
    pub fn get(&self, dir: Direction) -> C {
        match dir {
            Forward => self.fwd,
            Backward => self.bwd,
        }
    }
}

/// Distribute `glsum` among the limits.
///
/// Both limits are never decreased and sum up to `glsum` afterwards (provided
/// they did not exceed `glsum` before). The excess is split in halves, an odd
/// remainder goes to the smaller limit (to the forward limit on a tie).
pub fn split<C>(glsum: C, limits: &mut Limits<C>)
where
    C: PrimInt,
{
    let two = C::one() + C::one();
    let excess = glsum.saturating_sub(limits.fwd + limits.bwd);
    let half = excess / two;
    limits.fwd = limits.fwd + half;
    limits.bwd = limits.bwd + half;
    if excess % two == C::one() {
        if limits.fwd <= limits.bwd {
            limits.fwd = limits.fwd + C::one();
        } else {
            limits.bwd = limits.bwd + C::one();
        }
    }
}

/// Return `true` if a state with path cost `g` and heuristic value `h` may be
/// expanded in the current level.
pub fn is_expandable<C>(g: C, h: C, flim: C, glim: C) -> bool
where
    C: PrimInt,
{
    g.saturating_add(h) <= flim && g < glim
}

/// Remove and return a uniformly random element of both sets.
///
/// The first set belongs to the forward search, the second to the backward
/// search.
fn pick<T, R>(sets: &mut [PickSet<T>; 2], rng: &mut R) -> Option<(Direction, T)>
where
    T: Clone + Eq + std::hash::Hash,
    R: Rng + ?Sized,
{
    let n_fwd = sets[0].len();
    let n = n_fwd + sets[1].len();
    if n == 0 {
        return None;
    }
    let i = rng.gen_range(0..n);
    if i < n_fwd {
        Some((Forward, sets[0].take(i)))
    } else {
        Some((Backward, sets[1].take(i - n_fwd)))
    }
}

/// The GBFHS algorithm.
///
/// The object holds all working data, it can be used for several searches.
pub struct Gbfhs<'a, D, R>
where
    D: Domain,
{
    domain: &'a D,
    rng: R,

    /// The minimal edge cost.
    pub eps: D::Cost,
    /// The parameter passed to the heuristic of the domain.
    pub heuristic_param: usize,
    /// The maximal number of expansions, unlimited if `None`.
    pub max_expansions: Option<usize>,

    frontiers: Frontiers<D::State, D::Cost>,
    /// The open states that may be expanded in the current level.
    expandable: [PickSet<D::State>; 2],
    best: Bound<D::Cost>,
}

impl<'a, D, R> Gbfhs<'a, D, R>
where
    D: Domain,
    R: Rng,
{
    /// Create a new search on `domain`.
    ///
    /// The random generator `rng` is used for choosing the next state to be
    /// expanded.
    pub fn new(domain: &'a D, rng: R) -> Self {
        Gbfhs {
            domain,
            rng,
            eps: D::Cost::one(),
            heuristic_param: 0,
            max_expansions: None,
            frontiers: Frontiers::new(),
            expandable: [PickSet::new(), PickSet::new()],
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
        let mut expansions = Expansions::new(self.max_expansions);

        self.frontiers.clear();
        self.best.reset();
        self.frontiers[Forward].insert_open(src.clone(), D::Cost::zero());
        self.frontiers[Backward].insert_open(snk.clone(), D::Cost::zero());

        let mut flim = heur.call(src, Forward).max(heur.call(snk, Backward)).max(self.eps);
        let mut limits = Limits {
            fwd: D::Cost::zero(),
            bwd: D::Cost::zero(),
        };

        loop {
            split(flim - self.eps + D::Cost::one(), &mut limits);
            debug!(
                flim = ?flim,
                glim_fwd = ?limits.fwd,
                glim_bwd = ?limits.bwd,
                open_fwd = self.frontiers[Forward].num_open(),
                open_bwd = self.frontiers[Backward].num_open(),
                closed_fwd = self.frontiers[Forward].num_closed(),
                closed_bwd = self.frontiers[Backward].num_closed(),
                nodes_expanded = expansions.count(),
                "gbfhs level"
            );
            self.expand_level(&heur, flim, limits, &mut expansions)?;
            if self.best.value() <= flim || self.frontiers.is_exhausted() {
                break;
            }
            flim = flim + D::Cost::one();
        }

        debug!(
            cost = ?self.best.get(),
            nodes_expanded = expansions.count(),
            "gbfhs finished"
        );
        Ok(Solution {
            cost: self.best.get(),
            nodes_expanded: expansions.count(),
        })
    }

    /// Expand all expandable states of the current level.
    ///
    /// Returns early if a path of cost at most `flim` has been found.
    fn expand_level(
        &mut self,
        heur: &Heuristic<D>,
        flim: D::Cost,
        limits: Limits<D::Cost>,
        expansions: &mut Expansions,
    ) -> Result<()> {
        for &dir in &Direction::BOTH {
            let expandable = &mut self.expandable[dir.index()];
            expandable.clear();
            for (u, g) in self.frontiers[dir].open() {
                if is_expandable(g, heur.call(u, dir), flim, limits.get(dir)) {
                    expandable.insert(u.clone());
                }
            }
        }

        while let Some((dir, u)) = pick(&mut self.expandable, &mut self.rng) {
            let frontier = &mut self.frontiers[dir];
            debug_assert!(frontier.contains_open(&u), "Expandable state is not open");
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
                if is_expandable(g, heur.call(&v, dir), flim, limits.get(dir)) {
                    self.expandable[dir.index()].insert(v.clone());
                }
                if let Some(g_opp) = self.frontiers[dir.reverse()].cost(&v) {
                    if self.best.collide(g, g_opp) && self.best.value() <= flim {
                        return Ok(());
                    }
                }
            }
        }

        Ok(())
    }
}

/// Run GBFHS with a random generator seeded from the system.
///
/// See [`search_with_rng`].
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
    search_with_rng(domain, src, snk, eps, heuristic_param, StdRng::from_entropy())
}

/// Run GBFHS from `src` to `snk`.
///
/// - `eps` is the minimal edge cost (must be positive),
/// - `heuristic_param` is passed to the heuristic of the domain,
/// - `rng` breaks ties between expandable states.
pub fn search_with_rng<D, R>(
    domain: &D,
    src: &D::State,
    snk: &D::State,
    eps: D::Cost,
    heuristic_param: usize,
    rng: R,
) -> Result<Solution<D::Cost>>
where
    D: Domain,
    R: Rng,
{
    let mut gbfhs = Gbfhs::new(domain, rng);
    gbfhs.eps = eps;
    gbfhs.heuristic_param = heuristic_param;
    gbfhs.solve(src, snk)
}

#[cfg(test)]
mod tests {
    use super::{is_expandable, pick, search_with_rng, split, Gbfhs, Limits};
    use crate::collections::PickSet;
    use crate::domain::pancake::{Pancake, Stack};
    use crate::search::Direction::{Backward, Forward};
    use crate::search::Error;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tracing_subscriber::EnvFilter;

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_split() {
        let mut limits = Limits { fwd: 0u32, bwd: 0 };
        split(5, &mut limits);
        assert_eq!(limits, Limits { fwd: 3, bwd: 2 });
        split(6, &mut limits);
        assert_eq!(limits, Limits { fwd: 3, bwd: 3 });
        split(7, &mut limits);
        assert_eq!(limits, Limits { fwd: 4, bwd: 3 });
        split(10, &mut limits);
        assert_eq!(limits, Limits { fwd: 5, bwd: 5 });

        let mut limits = Limits { fwd: 1u32, bwd: 6 };
        split(10, &mut limits);
        assert_eq!(limits, Limits { fwd: 3, bwd: 7 });
        assert_eq!(limits.get(Forward), 3);
        assert_eq!(limits.get(Backward), 7);
    }

    proptest! {
        #[test]
        fn prop_split(fwd in 0u32..1000, bwd in 0u32..1000, excess in 0u32..1000) {
            let glsum = fwd + bwd + excess;
            let mut limits = Limits { fwd, bwd };
            split(glsum, &mut limits);
            prop_assert!(limits.fwd >= fwd);
            prop_assert!(limits.bwd >= bwd);
            prop_assert_eq!(limits.fwd + limits.bwd, glsum);
        }
    }

    #[test]
    fn test_expandable() {
        assert!(is_expandable(2u32, 3, 5, 3));
        assert!(!is_expandable(2u32, 4, 5, 3));
        assert!(!is_expandable(3u32, 0, 5, 3));
        assert!(!is_expandable(0u32, u32::MAX, 5, 3));
    }

    #[test]
    fn test_pick() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sets = [PickSet::new(), PickSet::new()];
        for x in 0..5 {
            sets[0].insert(x);
        }
        for x in 10..13 {
            sets[1].insert(x);
        }
        let mut picked = vec![];
        while let Some((dir, x)) = pick(&mut sets, &mut rng) {
            assert_eq!(dir, if x < 10 { Forward } else { Backward });
            picked.push(x);
        }
        picked.sort();
        assert_eq!(picked, vec![0, 1, 2, 3, 4, 10, 11, 12]);
    }

    #[test]
    fn test_pancake_seeds() {
        init_logging();
        let src = Stack::new(vec![2, 1, 4, 3, 5]).unwrap();
        let snk = Stack::sorted(4);
        for seed in 0..20 {
            let sol = search_with_rng(&Pancake, &src, &snk, 1, 0, StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(sol.cost, Some(3));
            assert!(sol.nodes_expanded > 0);
        }
    }

    #[test]
    fn test_reuse() {
        let mut gbfhs = Gbfhs::new(&Pancake, StdRng::seed_from_u64(7));
        let snk = Stack::sorted(5);
        let a = Stack::with_plate(&[3, 1, 2, 5, 4]).unwrap();
        let b = Stack::with_plate(&[2, 1, 3, 4, 5]).unwrap();
        assert_eq!(gbfhs.solve(&a, &snk).unwrap().cost, Some(4));
        assert_eq!(gbfhs.solve(&b, &snk).unwrap().cost, Some(1));
        assert_eq!(gbfhs.solve(&a, &snk).unwrap().cost, Some(4));
    }

    #[test]
    fn test_errors() {
        let src = Stack::new(vec![2, 1, 4, 3, 5]).unwrap();
        let snk = Stack::sorted(4);
        let mut gbfhs = Gbfhs::new(&Pancake, StdRng::seed_from_u64(0));
        gbfhs.eps = 0;
        assert_eq!(gbfhs.solve(&src, &snk), Err(Error::InvalidEps));

        gbfhs.eps = 1;
        gbfhs.max_expansions = Some(1);
        assert_eq!(
            gbfhs.solve(&src, &snk),
            Err(Error::ExpansionLimit { nodes_expanded: 1 })
        );

        let sol = gbfhs.solve(&snk, &snk).unwrap();
        assert_eq!((sol.cost, sol.nodes_expanded), (Some(0), 0));
    }
}
