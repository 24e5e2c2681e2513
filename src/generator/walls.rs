/*
walls.rs

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

//! Place random walls between adjacent cells.
//!
//! Every internal edge of the grid gets a wall with the given probability, unless the edge is
//! part of the solution path: such a wall would make the puzzle unsolvable by its own
//! solution.

use log::debug;
use rand::Rng;
use std::collections::{BTreeSet, HashSet};

use super::level::{Orientation, Wall};
use super::path::Path;

/// Return all the walls that could be placed in a grid, row by row.
pub fn internal_edges(rows: usize, cols: usize) -> Vec<Wall> {
    let mut edges: Vec<Wall> = Vec::with_capacity(2 * rows * cols);

    for row in 0..rows {
        for col in 0..cols {
            if row + 1 < rows {
                edges.push(Wall::new(row, col, Orientation::Horizontal));
            }
            if col + 1 < cols {
                edges.push(Wall::new(row, col, Orientation::Vertical));
            }
        }
    }
    edges
}

/// Place random walls that do not cut the given path.
pub fn place<R: Rng>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    path: &Path,
    density: f64,
) -> BTreeSet<Wall> {
    let protected: HashSet<Wall> = path.crossed_walls();
    let mut walls: BTreeSet<Wall> = BTreeSet::new();
    let mut rejected: usize = 0;

    for wall in internal_edges(rows, cols) {
        if !rng.random_bool(density) {
            continue;
        }
        if protected.contains(&wall) {
            rejected += 1;
            continue;
        }
        walls.insert(wall);
    }
    debug!(
        "Walls placed = {}  rejected on the path = {rejected}",
        walls.len()
    );
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random_path::{RandomPath, serpentine};
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_internal_edges_count() {
        // Horizontal: (rows - 1) * cols, vertical: rows * (cols - 1)
        assert_eq!(internal_edges(6, 6).len(), 60);
        assert_eq!(internal_edges(2, 3).len(), 7);
        assert!(internal_edges(1, 1).is_empty());
    }

    #[test]
    fn test_walls_never_cut_the_path() {
        let mut rng = Pcg64::seed_from_u64(21);
        let mut builder = RandomPath::new(6, 6);
        for _ in 0..20 {
            let path = builder.generate(&mut rng).expect("path exists");
            let walls = place(&mut rng, 6, 6, &path, 0.5);
            for pair in path.get().windows(2) {
                let wall = Wall::between(pair[0], pair[1]).expect("adjacent cells");
                assert!(!walls.contains(&wall));
            }
        }
    }

    #[test]
    fn test_full_density_walls_every_edge_off_the_path() {
        let mut rng = Pcg64::seed_from_u64(2);
        let path = serpentine(3, 3);
        let walls = place(&mut rng, 3, 3, &path, 1.0);
        // 12 internal edges, 8 used by the path
        assert_eq!(walls.len(), 4);
        assert!(place(&mut rng, 3, 3, &path, 0.0).is_empty());
    }
}
