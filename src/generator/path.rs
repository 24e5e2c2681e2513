/*
path.rs

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

//! Path in the puzzle grid.

use std::collections::HashSet;

use super::level::{Coordinate, Wall};

/// Path object.
#[derive(Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of cells.
    path: Vec<Coordinate>,

    /// Stores the visited status of the cells.
    /// Instead of looking for the cell in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<Coordinate>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(num_cells: usize) -> Self {
        Self {
            path: Vec::with_capacity(num_cells),
            visited: HashSet::with_capacity(num_cells),
        }
    }

    /// Create a [`Path`] object from a list of cells.
    pub fn from_vec(path: &[Coordinate]) -> Self {
        Self {
            path: path.to_vec(),
            visited: path.iter().copied().collect(),
        }
    }

    /// Add a cell to the path.
    pub fn push(&mut self, cell: Coordinate) {
        self.path.push(cell);
        self.visited.insert(cell);
    }

    /// Remove the last cell from the path.
    pub fn pop(&mut self) -> Option<Coordinate> {
        let cell: Option<Coordinate> = self.path.pop();
        if let Some(c) = cell {
            self.visited.remove(&c);
        }
        cell
    }

    /// Keep the first `len` cells and return the removed ones, in path order.
    pub fn truncate(&mut self, len: usize) -> Vec<Coordinate> {
        if len >= self.path.len() {
            return Vec::new();
        }
        let removed: Vec<Coordinate> = self.path.split_off(len);
        for c in &removed {
            self.visited.remove(c);
        }
        removed
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path has no cells.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, cell: Coordinate) -> bool {
        self.visited.contains(&cell)
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &[Coordinate] {
        &self.path
    }

    /// Return the position of the given cell in the path. Add one to the return value to get
    /// the visit order.
    pub fn cell_index(&self, cell: Coordinate) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        self.path.iter().position(|c| *c == cell)
    }

    /// Return the first cell in the path.
    pub fn get_first(&self) -> Option<Coordinate> {
        self.path.first().copied()
    }

    /// Return the last cell in the path.
    pub fn get_last(&self) -> Option<Coordinate> {
        self.path.last().copied()
    }

    /// Return the cell before the last one.
    pub fn get_second_to_last(&self) -> Option<Coordinate> {
        let l: usize = self.path.len();
        if l >= 2 { Some(self.path[l - 2]) } else { None }
    }

    /// Return the walls that would cut the path, one per pair of consecutive cells.
    pub fn crossed_walls(&self) -> HashSet<Wall> {
        self.path
            .windows(2)
            .filter_map(|w| Wall::between(w[0], w[1]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::level::Orientation;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_push_pop_keep_visited_in_sync() {
        let mut path = Path::new(4);
        path.push(c(0, 0));
        path.push(c(0, 1));
        assert!(path.contains(c(0, 1)));
        assert_eq!(path.pop(), Some(c(0, 1)));
        assert!(!path.contains(c(0, 1)));
        assert_eq!(path.len(), 1);
        assert_eq!(path.get_second_to_last(), None);
    }

    #[test]
    fn test_truncate_returns_removed_cells() {
        let mut path = Path::from_vec(&[c(0, 0), c(0, 1), c(1, 1), c(1, 0)]);
        assert_eq!(path.truncate(2), vec![c(1, 1), c(1, 0)]);
        assert_eq!(path.get(), &[c(0, 0), c(0, 1)]);
        assert!(!path.contains(c(1, 1)));
        assert!(path.truncate(5).is_empty());
    }

    #[test]
    fn test_crossed_walls() {
        let path = Path::from_vec(&[c(0, 0), c(0, 1), c(1, 1)]);
        let walls = path.crossed_walls();
        assert_eq!(walls.len(), 2);
        assert!(walls.contains(&Wall::new(0, 0, Orientation::Vertical)));
        assert!(walls.contains(&Wall::new(0, 1, Orientation::Horizontal)));
    }
}
