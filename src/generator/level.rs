/*
level.rs

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

//! Puzzle definition: grid coordinates, walls, clues, and the [`Level`] object.
//!
//! A [`Level`] is produced once by the level generator and is never modified afterward.
//! The game state machine reads it to validate the player moves.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt;

/// Grid cell position.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    /// Create a [`Coordinate`] object.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells.
    pub fn distance(&self, other: Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether the two cells share a side.
    pub fn is_adjacent(&self, other: Coordinate) -> bool {
        self.distance(other) == 1
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Wall orientation.
///
/// - A `Horizontal` wall lies under its cell and blocks vertical moves.
/// - A `Vertical` wall lies on the right of its cell and blocks horizontal moves.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Wall between two adjacent cells.
///
/// The wall is anchored to the cell with the lower index: a horizontal wall at `(r, c)`
/// separates `(r, c)` from `(r + 1, c)`, and a vertical wall at `(r, c)` separates `(r, c)` from
/// `(r, c + 1)`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wall {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl Wall {
    /// Create a [`Wall`] object.
    pub fn new(row: usize, col: usize, orientation: Orientation) -> Self {
        Self {
            row,
            col,
            orientation,
        }
    }

    /// Return the wall that would separate the two given cells, or None if the cells are not
    /// adjacent.
    pub fn between(a: Coordinate, b: Coordinate) -> Option<Wall> {
        if !a.is_adjacent(b) {
            return None;
        }
        let first: Coordinate = a.min(b);
        if a.col == b.col {
            Some(Wall::new(first.row, first.col, Orientation::Horizontal))
        } else {
            Some(Wall::new(first.row, first.col, Orientation::Vertical))
        }
    }
}

/// Numbered cell provided from the beginning of the game.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Clue {
    pub row: usize,
    pub col: usize,
    pub value: usize,
}

impl Clue {
    /// Position of the clue in the grid.
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.row, self.col)
    }
}

/// Structural problems in a [`Level`].
///
/// Levels built by the generator never have these problems. Levels read from a file can.
#[derive(Debug, PartialEq)]
pub enum LevelError {
    /// The grid has no cells.
    EmptyGrid,

    /// A clue is outside the grid.
    ClueOutOfBounds(Clue),

    /// Two clues share the same cell.
    DuplicatedPosition(Coordinate),

    /// The clue values do not form the sequence `1..=max`.
    NonContiguousValues,

    /// A wall is outside the grid or on the grid border.
    WallOutOfBounds(Wall),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LevelError::EmptyGrid => write!(f, "the grid has no cells"),
            LevelError::ClueOutOfBounds(c) => {
                write!(f, "clue {} at ({}, {}) is out of the grid", c.value, c.row, c.col)
            }
            LevelError::DuplicatedPosition(pos) => write!(f, "several clues at {pos}"),
            LevelError::NonContiguousValues => {
                write!(f, "clue values do not form a contiguous sequence from 1")
            }
            LevelError::WallOutOfBounds(w) => write!(
                f,
                "{:?} wall at ({}, {}) does not separate two cells",
                w.orientation, w.row, w.col
            ),
        }
    }
}

impl Error for LevelError {}

/// Puzzle definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Level {
    /// Opaque identifier.
    pub id: String,

    /// Number of rows in the grid.
    pub rows: usize,

    /// Number of columns in the grid.
    pub cols: usize,

    /// Clues, sorted by value.
    pub initial_values: Vec<Clue>,

    /// Walls between adjacent cells.
    pub walls: BTreeSet<Wall>,
}

impl Level {
    /// Number of cells in the grid.
    pub fn total_cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Highest clue value, or 0 when the level has no clue.
    pub fn max_number(&self) -> usize {
        self.initial_values
            .iter()
            .map(|c| c.value)
            .max()
            .unwrap_or(0)
    }

    /// Whether the cell is in the grid.
    pub fn in_bounds(&self, cell: Coordinate) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Return the clue at the given cell, if any.
    pub fn clue_at(&self, cell: Coordinate) -> Option<&Clue> {
        self.initial_values.iter().find(|c| c.position() == cell)
    }

    /// Return the position of the clue with the given value.
    pub fn clue_position(&self, value: usize) -> Option<Coordinate> {
        self.initial_values
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.position())
    }

    /// Whether a wall separates the two given adjacent cells.
    pub fn is_blocked(&self, a: Coordinate, b: Coordinate) -> bool {
        match Wall::between(a, b) {
            Some(w) => self.walls.contains(&w),
            None => false,
        }
    }

    /// Return the in-grid cells sharing a side with the given cell, in north, west, east, south
    /// order. Walls are ignored.
    pub fn neighbors(&self, cell: Coordinate) -> Vec<Coordinate> {
        grid_neighbors(self.rows, self.cols, cell)
    }

    /// Return the neighbors that can be reached from the given cell without crossing a wall.
    pub fn open_neighbors(&self, cell: Coordinate) -> Vec<Coordinate> {
        self.neighbors(cell)
            .into_iter()
            .filter(|n| !self.is_blocked(cell, *n))
            .collect()
    }

    /// Verify the structure of the level.
    ///
    /// The generator always produces valid levels, so the game state machine does not call this
    /// method. It is used when a level comes from outside, such as a saved game.
    ///
    /// # Errors
    ///
    /// Return the first problem found.
    pub fn check(&self) -> Result<(), LevelError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LevelError::EmptyGrid);
        }

        let mut positions: HashSet<Coordinate> = HashSet::with_capacity(self.initial_values.len());
        for clue in &self.initial_values {
            if !self.in_bounds(clue.position()) {
                return Err(LevelError::ClueOutOfBounds(*clue));
            }
            if !positions.insert(clue.position()) {
                return Err(LevelError::DuplicatedPosition(clue.position()));
            }
        }

        let mut values: Vec<usize> = self.initial_values.iter().map(|c| c.value).collect();
        values.sort_unstable();
        if values.iter().enumerate().any(|(i, v)| *v != i + 1) {
            return Err(LevelError::NonContiguousValues);
        }

        for wall in &self.walls {
            let valid: bool = match wall.orientation {
                Orientation::Horizontal => wall.row + 1 < self.rows && wall.col < self.cols,
                Orientation::Vertical => wall.row < self.rows && wall.col + 1 < self.cols,
            };
            if !valid {
                return Err(LevelError::WallOutOfBounds(*wall));
            }
        }
        Ok(())
    }
}

/// Return the in-grid cells sharing a side with the given cell.
pub fn grid_neighbors(rows: usize, cols: usize, cell: Coordinate) -> Vec<Coordinate> {
    let mut n: Vec<Coordinate> = Vec::with_capacity(4);

    if cell.row > 0 {
        n.push(Coordinate::new(cell.row - 1, cell.col));
    }
    if cell.col > 0 {
        n.push(Coordinate::new(cell.row, cell.col - 1));
    }
    if cell.col + 1 < cols {
        n.push(Coordinate::new(cell.row, cell.col + 1));
    }
    if cell.row + 1 < rows {
        n.push(Coordinate::new(cell.row + 1, cell.col));
    }
    n
}
