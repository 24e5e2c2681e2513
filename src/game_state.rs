/*
game_state.rs

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

//! Rules of the game: move validation, path rewind, and completion.
//!
//! A [`GameState`] is a snapshot. [`GameState::apply_move`] never modifies the state it is
//! called on, it returns the next snapshot. Previous snapshots can therefore be kept for
//! checkpoints or replays.
//!
//! The state stores the player path twice: as an ordered list of cells, and as the visit
//! order of each grid cell. Only [`GameState::initialize`] and [`GameState::apply_move`]
//! write them, and both keep them in sync.
//!
//! The level is expected to come from the generator: clue values form the sequence
//! `1..=max`, at distinct positions inside the grid. Use [`Level::check`] on levels from
//! other sources before playing them.

use log::debug;
use std::sync::Arc;

use crate::generator::level::{Coordinate, Level};
use crate::generator::path::Path;

/// Status of a grid cell.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Clue number, if the cell holds a clue.
    pub value: Option<usize>,

    /// Whether the cell holds a clue placed by the generator.
    pub is_fixed: bool,

    /// Step (starting at 1) at which the player path reached the cell, or None if the path
    /// does not go through the cell.
    pub visited_order: Option<usize>,
}

/// Game state over one level.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Level being played.
    level: Arc<Level>,

    /// Cell status, indexed by row and then by column.
    grid: Vec<Vec<Cell>>,

    /// Player path.
    current_path: Path,

    /// Highest clue number on the player path, or 0.
    last_visited_number: usize,

    /// Whether the path covers the grid and reaches the last clue.
    is_complete: bool,
}

impl GameState {
    /// Create the initial state for the given level.
    ///
    /// The path starts on clue 1. If the level has no clue 1, then the path is empty and no
    /// move is ever valid.
    pub fn initialize(level: Arc<Level>) -> Self {
        let mut grid: Vec<Vec<Cell>> = vec![vec![Cell::default(); level.cols]; level.rows];
        for clue in &level.initial_values {
            if let Some(cell) = grid.get_mut(clue.row).and_then(|r| r.get_mut(clue.col)) {
                cell.value = Some(clue.value);
                cell.is_fixed = true;
            }
        }

        let mut current_path: Path = Path::new(level.total_cells());
        let mut last_visited_number: usize = 0;
        if let Some(start) = level.clue_position(1)
            && let Some(cell) = grid.get_mut(start.row).and_then(|r| r.get_mut(start.col))
        {
            cell.visited_order = Some(1);
            current_path.push(start);
            last_visited_number = 1;
        }

        let mut state: GameState = Self {
            level,
            grid,
            current_path,
            last_visited_number,
            is_complete: false,
        };
        state.is_complete = state.covers_grid();
        state
    }

    /// Rebuild the state reached by playing the given moves from the initial state.
    pub fn replay(level: Arc<Level>, moves: &[Coordinate]) -> Self {
        moves
            .iter()
            .fold(Self::initialize(level), |state, m| state.apply_move(*m))
    }

    /// Level being played.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Shared handle to the level being played.
    pub fn level_handle(&self) -> Arc<Level> {
        Arc::clone(&self.level)
    }

    /// Grid rows.
    pub fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    /// Return the status of the given cell, or None if the cell is outside the grid.
    pub fn cell(&self, cell: Coordinate) -> Option<&Cell> {
        self.grid.get(cell.row).and_then(|r| r.get(cell.col))
    }

    /// Player path, in visit order.
    pub fn current_path(&self) -> &[Coordinate] {
        self.current_path.get()
    }

    /// Last cell of the player path.
    pub fn head(&self) -> Option<Coordinate> {
        self.current_path.get_last()
    }

    /// Highest clue number reached by the player path, or 0.
    pub fn last_visited_number(&self) -> usize {
        self.last_visited_number
    }

    /// Whether the puzzle is solved.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Whether the player path can move to the target cell.
    ///
    /// A cell already on the path is only accepted when it is the cell just before the head:
    /// moving there rewinds the path by one step.
    /// Any other cell must share a side with the head, must not be separated from it by a
    /// wall, must not be visited yet, and, if it holds a clue, must hold the next clue number.
    pub fn is_valid_move(&self, target: Coordinate) -> bool {
        let Some(head) = self.current_path.get_last() else {
            return false;
        };
        let Some(cell) = self.cell(target) else {
            return false;
        };

        if self.current_path.contains(target) {
            return self.current_path.get_second_to_last() == Some(target);
        }

        if !head.is_adjacent(target) || cell.visited_order.is_some() {
            return false;
        }
        if self.level.is_blocked(head, target) {
            return false;
        }
        match cell.value {
            Some(v) if cell.is_fixed => v == self.last_visited_number + 1,
            _ => true,
        }
    }

    /// Move the path to the target cell and return the new state.
    ///
    /// Invalid moves, and any move after the puzzle is solved, return an identical state.
    pub fn apply_move(&self, target: Coordinate) -> GameState {
        if self.is_complete {
            debug!("Move to {target} ignored: the puzzle is solved");
            return self.clone();
        }
        if self.current_path.get_second_to_last() == Some(target) {
            return self.rewind();
        }
        if !self.is_valid_move(target) {
            debug!("Move to {target} rejected");
            return self.clone();
        }

        let mut next: GameState = self.clone();
        next.current_path.push(target);
        let order: usize = next.current_path.len();
        let cell: &mut Cell = &mut next.grid[target.row][target.col];
        cell.visited_order = Some(order);
        if cell.is_fixed
            && let Some(v) = cell.value
        {
            next.last_visited_number = v;
        }
        next.is_complete = next.covers_grid();
        if next.is_complete {
            debug!("Puzzle solved in {order} steps");
        }
        next
    }

    /// Remove the head of the path.
    fn rewind(&self) -> GameState {
        let mut next: GameState = self.clone();
        let keep: usize = next.current_path.len().saturating_sub(1);
        for removed in next.current_path.truncate(keep) {
            debug!("Rewind: {removed} removed from the path");
            next.grid[removed.row][removed.col].visited_order = None;
        }
        next.last_visited_number = next
            .current_path
            .get()
            .iter()
            .filter_map(|c| {
                let cell: &Cell = &next.grid[c.row][c.col];
                if cell.is_fixed { cell.value } else { None }
            })
            .max()
            .unwrap_or(0);
        next.is_complete = false;
        next
    }

    /// Whether the path covers every cell and ends the clue sequence.
    fn covers_grid(&self) -> bool {
        self.current_path.len() == self.level.total_cells()
            && self.last_visited_number == self.level.max_number()
    }
}
