/*
solvability.rs

Copyright 2025 Hervé Quatremain

This file is part of Pathkudo.

Pathkudo is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Pathkudo is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Pathkudo. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Verify that the clues of a level can be linked in order.
//!
//! For each pair of consecutive clues, a breadth-first search looks for the shortest route
//! from clue `i` to clue `i + 1`. The route cannot cross a wall, and cannot use a cell that a
//! previous route already used. The cells of each route are then reserved for the next
//! searches.
//!
//! This check is weaker than it looks: the final test only compares the number of reserved
//! cells with the number of cells in the grid, which can never fail. A level passes as soon as
//! the clues can be chained with disjoint shortest routes, even if those routes leave cells
//! that no complete solution could cover. The generator relies on its own solution path to
//! guarantee that levels are solvable, and on this check only to reject the wall layouts that
//! break the chain of shortest routes.

use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};

use super::level::{Coordinate, Level};

/// Whether the clues of the level can be linked in order.
pub fn verify(level: &Level) -> bool {
    let max_number: usize = level.max_number();
    let Some(first) = level.clue_position(1) else {
        return max_number == 0;
    };

    let mut visited: HashSet<Coordinate> = HashSet::with_capacity(level.total_cells());
    visited.insert(first);

    for value in 1..max_number {
        let (Some(from), Some(to)) = (level.clue_position(value), level.clue_position(value + 1))
        else {
            debug!("Missing clue {value} or {}", value + 1);
            return false;
        };
        match shortest_route(level, from, to, &visited) {
            Some(route) => {
                // The route starts with `from`, which is already reserved
                visited.extend(route.into_iter().skip(1));
            }
            None => {
                debug!("No route from clue {value} {from} to clue {} {to}", value + 1);
                return false;
            }
        }
    }

    // Always true: `visited` only holds grid cells.
    visited.len() <= level.total_cells()
}

/// Breadth-first search from `from` to `to` avoiding walls and the `blocked` cells.
///
/// Return the route, both ends included, or None if `to` cannot be reached.
pub fn shortest_route(
    level: &Level,
    from: Coordinate,
    to: Coordinate,
    blocked: &HashSet<Coordinate>,
) -> Option<Vec<Coordinate>> {
    let mut parents: HashMap<Coordinate, Coordinate> = HashMap::new();
    let mut queue: VecDeque<Coordinate> = VecDeque::new();
    queue.push_back(from);

    while let Some(cell) = queue.pop_front() {
        if cell == to {
            let mut route: Vec<Coordinate> = vec![to];
            let mut current: Coordinate = to;
            while let Some(parent) = parents.get(&current) {
                route.push(*parent);
                current = *parent;
            }
            route.reverse();
            return Some(route);
        }
        for next in level.open_neighbors(cell) {
            if next == from || blocked.contains(&next) || parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, cell);
            queue.push_back(next);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::level::{Clue, Orientation, Wall};
    use std::collections::BTreeSet;

    fn clue(row: usize, col: usize, value: usize) -> Clue {
        Clue { row, col, value }
    }

    fn level(rows: usize, cols: usize, clues: Vec<Clue>, walls: Vec<Wall>) -> Level {
        Level {
            id: String::from("test"),
            rows,
            cols,
            initial_values: clues,
            walls: walls.into_iter().collect::<BTreeSet<Wall>>(),
        }
    }

    #[test]
    fn test_shortest_route_goes_around_walls() {
        let l = level(
            2,
            2,
            vec![clue(0, 0, 1), clue(0, 1, 2)],
            vec![Wall::new(0, 0, Orientation::Vertical)],
        );
        let route = shortest_route(
            &l,
            Coordinate::new(0, 0),
            Coordinate::new(0, 1),
            &HashSet::new(),
        )
        .expect("route around the wall");
        assert_eq!(
            route,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(1, 1),
                Coordinate::new(0, 1),
            ]
        );
    }

    #[test]
    fn test_verify_open_grid() {
        let l = level(2, 2, vec![clue(0, 0, 1), clue(1, 1, 2)], Vec::new());
        assert!(verify(&l));
    }

    #[test]
    fn test_verify_fails_when_a_clue_is_walled_off() {
        let l = level(
            2,
            2,
            vec![clue(0, 0, 1), clue(1, 1, 2)],
            vec![
                Wall::new(0, 1, Orientation::Horizontal),
                Wall::new(1, 0, Orientation::Vertical),
            ],
        );
        assert!(!verify(&l));
    }

    #[test]
    fn test_verify_fails_when_earlier_routes_block_the_way() {
        // The route 1 -> 2 goes through (0, 1), and (0, 1) is the only open neighbor of
        // clue 3. Clue 3 is next to clue 2, but only through the reserved cell.
        let l = level(
            2,
            3,
            vec![clue(0, 0, 1), clue(0, 2, 2), clue(1, 1, 3)],
            vec![
                Wall::new(0, 2, Orientation::Horizontal),
                Wall::new(1, 0, Orientation::Vertical),
                Wall::new(1, 1, Orientation::Vertical),
            ],
        );
        assert!(!verify(&l));

        // Without the reservation, the route from clue 2 to clue 3 exists.
        let route = shortest_route(
            &l,
            Coordinate::new(0, 2),
            Coordinate::new(1, 1),
            &HashSet::new(),
        );
        assert_eq!(
            route,
            Some(vec![
                Coordinate::new(0, 2),
                Coordinate::new(0, 1),
                Coordinate::new(1, 1),
            ])
        );
        let reserved: HashSet<Coordinate> = [Coordinate::new(0, 0), Coordinate::new(0, 1)]
            .into_iter()
            .collect();
        assert_eq!(
            shortest_route(&l, Coordinate::new(0, 2), Coordinate::new(1, 1), &reserved),
            None
        );
    }

    #[test]
    fn test_verify_accepts_chains_that_leave_cells_uncovered() {
        // The shortest routes 1 -> 2 -> 3 cover five of the nine cells, and the dead-end cell
        // (1, 0) cannot be part of any complete solution ending on clue 3. The final count
        // check does not notice.
        let l = level(
            3,
            3,
            vec![clue(0, 0, 1), clue(0, 2, 2), clue(2, 2, 3)],
            vec![
                Wall::new(1, 0, Orientation::Vertical),
                Wall::new(0, 0, Orientation::Horizontal),
            ],
        );
        assert!(verify(&l));
    }

    #[test]
    fn test_verify_single_clue() {
        let l = level(1, 1, vec![clue(0, 0, 1)], Vec::new());
        assert!(verify(&l));
    }
}
