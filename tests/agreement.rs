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

//! Cross-validation of the search algorithms on random instances.

use rs_bihs::domain::pancake::{Pancake, Stack};
use rs_bihs::domain::puzzle::{Board, SlidingTile};
use rs_bihs::search::{astar, gbfhs, mme};
use rs_bihs::Domain;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use std::collections::{HashMap, VecDeque};

/// Compare GBFHS, MMe and A* on one instance and return the common cost.
fn agree<D>(domain: &D, src: &D::State, snk: &D::State, param: usize, seed: u64) -> Option<u32>
where
    D: Domain<Cost = u32>,
{
    let a = astar::search(domain, src, snk, param).unwrap();
    let g = gbfhs::search_with_rng(domain, src, snk, 1, param, StdRng::seed_from_u64(seed)).unwrap();
    let m = mme::search(domain, src, snk, 1, param).unwrap();
    assert_eq!(g.cost, a.cost, "gbfhs vs. astar on {:?} -> {:?}", src, snk);
    assert_eq!(m.cost, a.cost, "mme vs. astar on {:?} -> {:?}", src, snk);
    a.cost
}

/// Distances from `src` to all reachable states by breadth-first search.
fn bfs<D>(domain: &D, src: &D::State) -> HashMap<D::State, u32>
where
    D: Domain,
{
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(src.clone(), 0);
    queue.push_back(src.clone());
    while let Some(u) = queue.pop_front() {
        let d = dist[&u];
        for v in domain.successors(&u) {
            if !dist.contains_key(&v) {
                dist.insert(v.clone(), d + 1);
                queue.push_back(v);
            }
        }
    }
    dist
}

#[test]
fn random_pancakes() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for n in 5..=8 {
        let snk = Stack::sorted(n);
        for i in 0..8 {
            let src = Stack::random(n, &mut rng);
            let param = i % 3;
            let cost = agree(&Pancake, &src, &snk, param, rng.gen());
            assert!(cost.is_some());
        }
    }
}

#[test]
fn random_pancake_targets() {
    // the heuristic is relative to the target, which need not be sorted
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..10 {
        let src = Stack::random(6, &mut rng);
        let snk = Stack::random(6, &mut rng);
        agree(&Pancake, &src, &snk, 0, rng.gen());
    }
}

#[test]
fn pancake_exact() {
    let snk = Stack::sorted(6);
    let dist = bfs(&Pancake, &snk);
    assert_eq!(dist.len(), 720);

    let mut rng = StdRng::seed_from_u64(1);
    let mut states = dist.keys().cloned().collect::<Vec<_>>();
    states.sort_by_key(|s| s.as_slice().to_vec());
    let sample = states.choose_multiple(&mut rng, 40).cloned().collect::<Vec<_>>();
    for src in &sample {
        let cost = agree(&Pancake, src, &snk, 0, rng.gen());
        assert_eq!(cost, Some(dist[src]));
    }
}

#[test]
fn puzzle_exact() {
    let puzzle = SlidingTile::new(2, 3);
    let snk = Board::solved(2, 3);
    let dist = bfs(&puzzle, &snk);
    assert_eq!(dist.len(), 360);

    let mut states = dist.keys().cloned().collect::<Vec<_>>();
    states.sort_by_key(|s| s.tiles().to_vec());
    let mut rng = StdRng::seed_from_u64(2);
    let sample = states.choose_multiple(&mut rng, 40).cloned().collect::<Vec<_>>();
    for src in &sample {
        assert!(puzzle.is_solvable(src, &snk));
        let cost = agree(&puzzle, src, &snk, 0, rng.gen());
        assert_eq!(cost, Some(dist[src]));
    }

    // the other parity class
    let src = Board::new(2, 3, vec![2, 1, 3, 4, 5, 0]).unwrap();
    assert!(!dist.contains_key(&src));
    assert!(!puzzle.is_solvable(&src, &snk));
    assert_eq!(agree(&puzzle, &src, &snk, 0, 3), None);
}

#[test]
fn random_eight_puzzles() {
    let puzzle = SlidingTile::new(3, 3);
    let snk = Board::solved(3, 3);
    let mut rng = StdRng::seed_from_u64(8);
    for steps in (4..=40).step_by(4) {
        let src = puzzle.random_walk(&snk, steps, &mut rng);
        let cost = agree(&puzzle, &src, &snk, steps % 3, rng.gen());
        assert!(cost.map(|c| c as usize <= steps).unwrap_or(false));
    }
}
