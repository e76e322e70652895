/*
 * Copyright (c) 2017-2021, 2024 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! A* search.
//!
//! A plain unidirectional A*-search from the start state towards the goal
//! state using the forward heuristic of the domain. The heuristic must be
//! consistent, i.e. $h(u) \le 1 + h(v)$ for each edge $(u,v)$, so closed states
//! are never reopened.
//!
//! The search is mainly used to cross-check the bidirectional algorithms.
//!
//! # Example
//!
//! ```
//! use rs_bihs::domain::puzzle::{Board, SlidingTile};
//! use rs_bihs::search::astar;
//!
//! let puzzle = SlidingTile::new(2, 3);
//! let src = Board::new(2, 3, vec![0, 1, 2, 4, 5, 3]).unwrap();
//! let snk = Board::solved(2, 3);
//!
//! let sol = astar::search(&puzzle, &src, &snk, 0).unwrap();
//! assert_eq!(sol.cost, Some(3));
//! ```

use crate::collections::{BinHeap, ItemPriQueue};
use crate::domain::Domain;
use crate::search::Direction::Forward;
use crate::search::{Expansions, Heuristic, Result, Solution};

use num_traits::{One, Zero};
use tracing::debug;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::Add;

/// Heap data of a state.
#[derive(Clone, Copy, Debug)]
struct Data<C> {
    /// distance to the start state
    distance: C,
    /// the lower bound on the distance to the goal state
    lower: C,
}

impl<C> PartialEq for Data<C>
where
    C: Copy + Add<Output = C> + PartialEq,
{
    fn eq(&self, data: &Self) -> bool {
        (self.distance + self.lower).eq(&(data.distance + data.lower))
    }
}

impl<C> PartialOrd for Data<C>
where
    C: Copy + Add<Output = C> + PartialOrd,
{
    fn partial_cmp(&self, data: &Self) -> Option<Ordering> {
        (self.distance + self.lower).partial_cmp(&(data.distance + data.lower))
    }
}

/// The A*-search.
pub struct AStar<'a, D>
where
    D: Domain,
{
    domain: &'a D,

    /// The parameter passed to the heuristic of the domain.
    pub heuristic_param: usize,
    /// The maximal number of expansions, unlimited if `None`.
    pub max_expansions: Option<usize>,

    /// The heap item of each reached state, `None` if the state is closed.
    nodes: HashMap<D::State, Option<usize>>,
    pqueue: BinHeap<D::State, Data<D::Cost>>,
}

impl<'a, D> AStar<'a, D>
where
    D: Domain,
{
    pub fn new(domain: &'a D) -> Self {
        AStar {
            domain,
            heuristic_param: 0,
            max_expansions: None,
            nodes: HashMap::new(),
            pqueue: BinHeap::new(),
        }
    }

    /// Compute the cost of a shortest path from `src` to `snk`.
    ///
    /// Fails if `src` or `snk` is not a valid state or the expansion limit is
    /// reached.
    pub fn solve(&mut self, src: &D::State, snk: &D::State) -> Result<Solution<D::Cost>> {
        self.domain.validate(src, snk)?;
        let heur = Heuristic {
            domain: self.domain,
            src,
            snk,
            param: self.heuristic_param,
        };
        let mut expansions = Expansions::new(self.max_expansions);

        self.nodes.clear();
        self.pqueue.clear();

        let item = self.pqueue.push(
            src.clone(),
            Data {
                distance: D::Cost::zero(),
                lower: heur.call(src, Forward),
            },
        );
        self.nodes.insert(src.clone(), Some(item));

        let mut cost = None;
        while let Some((u, data)) = self.pqueue.pop_min() {
            if self.domain.is_goal(&u, snk) {
                cost = Some(data.distance);
                break;
            }
            let d = data.distance + D::Cost::one();
            for v in expansions.expand(self.domain, &u)? {
                match self.nodes.get(&v) {
                    // closed, cannot be improved
                    Some(None) => {}
                    Some(&Some(item)) => {
                        let lower = self.pqueue.value(item).lower;
                        self.pqueue.decrease_key(item, Data { distance: d, lower });
                    }
                    None => {
                        let lower = heur.call(&v, Forward);
                        let item = self.pqueue.push(v.clone(), Data { distance: d, lower });
                        self.nodes.insert(v, Some(item));
                    }
                }
            }
            self.nodes.insert(u, None);
        }

        debug!(cost = ?cost, nodes_expanded = expansions.count(), "astar finished");
        Ok(Solution {
            cost,
            nodes_expanded: expansions.count(),
        })
    }
}

/// Run A* from `src` to `snk`.
///
/// The parameter `heuristic_param` is passed to the forward heuristic of the
/// domain.
pub fn search<D>(domain: &D, src: &D::State, snk: &D::State, heuristic_param: usize) -> Result<Solution<D::Cost>>
where
    D: Domain,
{
    let mut astar = AStar::new(domain);
    astar.heuristic_param = heuristic_param;
    astar.solve(src, snk)
}
