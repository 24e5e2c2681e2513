/*
random_path.rs

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

//! Generate a random path that visits every cell of the grid exactly once.
//!
//! The search is a randomized depth-first search: from the current cell, the unvisited
//! neighbors are shuffled and tried in turn, and the search backs up on dead ends.
//! Branches that cannot cover the grid anymore are cut early (see
//! [`RandomPath::is_dead_branch`]), which keeps the search fast for the small grids the game
//! uses. The cost is still exponential in the worst case, so each search stops after
//! [`MAX_ITERATIONS`] steps, and callers fall back to [`serpentine`] on large grids.

use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::time::Instant;

use super::level::{Coordinate, grid_neighbors};
use super::path::Path;

/// Default maximum number of steps for one search.
///
/// On a 6x6 grid, a search rarely needs more than a few thousand steps, but on larger grids it
/// can get stuck in a huge dead subtree.
pub const MAX_ITERATIONS: usize = 20_000;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum RandomPathError {
    /// No path covers the grid from the starting cell.
    NoPath,

    /// No path found within [`RandomPath::max_iterations`] steps.
    IterationsExceeded,
}

impl fmt::Display for RandomPathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RandomPathError::NoPath => write!(f, "no path covers the grid from the starting cell"),
            RandomPathError::IterationsExceeded => write!(f, "no path found before the iteration limit"),
        }
    }
}

impl std::error::Error for RandomPathError {}

/// [`RandomPath`] object.
pub struct RandomPath {
    /// Number of rows in the grid.
    pub rows: usize,

    /// Number of columns in the grid.
    pub cols: usize,

    /// Starting cell of the last search.
    /// If [`RandomPath::required_starting_cell`] is provided, then use that value for the
    /// starting cell. Otherwise, a random cell is selected.
    pub starting_cell: Coordinate,

    /// Number of iterations it took to generate the last random path.
    pub iteration: usize,

    /// Duration in seconds it took to generate the last random path.
    pub duration: f32,

    /// Number of steps after which the search gives up.
    pub max_iterations: usize,

    /// Starting cell, if the caller requires one.
    required_starting_cell: Option<Coordinate>,
}

impl RandomPath {
    /// Create the object.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            starting_cell: Coordinate::new(0, 0),
            iteration: 0,
            duration: 0.0,
            max_iterations: MAX_ITERATIONS,
            required_starting_cell: None,
        }
    }

    /// Create the object for paths that must start at the given cell.
    ///
    /// The cell is ignored if it is outside the grid.
    pub fn with_starting_cell(rows: usize, cols: usize, starting_cell: Coordinate) -> Self {
        let mut obj: RandomPath = Self::new(rows, cols);
        if starting_cell.row < rows && starting_cell.col < cols {
            obj.required_starting_cell = Some(starting_cell);
        }
        obj
    }

    /// Number of cells in the grid.
    pub fn num_cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Generate and return a random path.
    ///
    /// # Errors
    ///
    /// The method returns [`RandomPathError::NoPath`] when all the branches from the starting
    /// cell have been explored without covering the grid. Retrying with another starting cell
    /// might succeed.
    ///
    /// The method returns [`RandomPathError::IterationsExceeded`] when the search takes more
    /// than [`RandomPath::max_iterations`] steps.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> Result<Path, RandomPathError> {
        self.iteration = 0;
        self.duration = 0.0;
        if self.num_cells() == 0 {
            return Err(RandomPathError::NoPath);
        }
        let start: Instant = Instant::now();

        self.starting_cell = match self.required_starting_cell {
            Some(c) => c,
            None => Coordinate::new(
                rng.random_range(0..self.rows),
                rng.random_range(0..self.cols),
            ),
        };

        debug!(
            "Starting cell = {}  Grid = {}x{}",
            self.starting_cell, self.rows, self.cols
        );

        let mut path: Path = Path::new(self.num_cells());
        path.push(self.starting_cell);
        let ret: Result<(), RandomPathError> = self.find_path(rng, &mut path);
        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Duration = {}",
            self.iteration, self.duration
        );
        ret.map(|()| path)
    }

    /// Recursively extend the path from its last cell.
    fn find_path<R: Rng>(
        &mut self,
        rng: &mut R,
        path: &mut Path,
    ) -> Result<(), RandomPathError> {
        if path.len() == self.num_cells() {
            return Ok(());
        }
        self.iteration += 1;
        if self.iteration > self.max_iterations {
            return Err(RandomPathError::IterationsExceeded);
        }

        let Some(current) = path.get_last() else {
            return Err(RandomPathError::NoPath);
        };

        if self.is_dead_branch(path, current) {
            trace!("    Back: {current} cannot lead to a complete path");
            return Err(RandomPathError::NoPath);
        }

        // Randomize the order in which to test the neighbors
        let mut next_cells: Vec<Coordinate> = grid_neighbors(self.rows, self.cols, current)
            .into_iter()
            .filter(|c| !path.contains(*c))
            .collect();
        next_cells.shuffle(rng);

        for next in next_cells {
            trace!("    Selecting edge {current}-{next}");
            path.push(next);
            match self.find_path(rng, path) {
                Ok(()) => return Ok(()),
                Err(RandomPathError::IterationsExceeded) => {
                    return Err(RandomPathError::IterationsExceeded);
                }
                Err(RandomPathError::NoPath) => {
                    path.pop();
                }
            }
        }
        Err(RandomPathError::NoPath)
    }

    /// Whether the path cannot be completed anymore.
    ///
    /// The remaining cells must all be reachable from the head of the path, and at most one of
    /// them can be a dead end (a cell with fewer than two free neighbors), because a dead end
    /// can only be the last cell of the path.
    /// Also, the grid is a checkerboard and the path alternates colors, so the remaining cells
    /// must hold exactly one more (or as many) cells of the other color than of the head color.
    fn is_dead_branch(&self, path: &Path, head: Coordinate) -> bool {
        let remaining: usize = self.num_cells() - path.len();
        let head_color: usize = (head.row + head.col) % 2;

        // Flood fill the free cells from the head
        let mut seen: Vec<bool> = vec![false; self.num_cells()];
        let mut stack: Vec<Coordinate> = vec![head];
        let mut reached: usize = 0;
        while let Some(cell) = stack.pop() {
            for n in grid_neighbors(self.rows, self.cols, cell) {
                let idx: usize = n.row * self.cols + n.col;
                if !path.contains(n) && !seen[idx] {
                    seen[idx] = true;
                    reached += 1;
                    stack.push(n);
                }
            }
        }
        if reached < remaining {
            return true;
        }

        let mut dead_ends: usize = 0;
        let mut same_color: usize = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell: Coordinate = Coordinate::new(row, col);
                if path.contains(cell) {
                    continue;
                }
                if (row + col) % 2 == head_color {
                    same_color += 1;
                }
                let free: usize = grid_neighbors(self.rows, self.cols, cell)
                    .into_iter()
                    .filter(|n| *n == head || !path.contains(*n))
                    .count();
                if free <= 1 {
                    dead_ends += 1;
                    if dead_ends > 1 {
                        return true;
                    }
                }
            }
        }
        same_color != remaining / 2
    }
}

/// Return the boustrophedon path: left to right on even rows, right to left on odd rows.
///
/// The path exists for any grid size and is used when the random search keeps failing.
pub fn serpentine(rows: usize, cols: usize) -> Path {
    let mut path: Path = Path::new(rows * cols);
    for row in 0..rows {
        if row % 2 == 0 {
            (0..cols).for_each(|col| path.push(Coordinate::new(row, col)));
        } else {
            (0..cols).rev().for_each(|col| path.push(Coordinate::new(row, col)));
        }
    }
    path
}
