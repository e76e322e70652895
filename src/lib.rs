// Copyright (c) 2015-2022, 2024 Frank Fischer <frank-fischer@shadow-soft.de>
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

#![forbid(unsafe_code)]

//! A library for bidirectional heuristic search on implicit state spaces.
//!
//! The crate provides the front-to-end bidirectional search algorithms
//! [GBFHS][search::gbfhs] and [MMe][search::mme] together with a plain
//! [A*-search][search::astar] as reference. State spaces are described by
//! implementing [`Domain`]; the [pancake problem][domain::pancake] and the
//! [sliding-tile puzzle][domain::puzzle] are included.

// # Data structures

pub mod collections;

// # State spaces

pub mod domain;
pub use self::domain::Domain;

// # Algorithms

pub mod search;
pub use self::search::{Direction, Solution};
