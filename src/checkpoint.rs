/*
checkpoint.rs

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

//! Game checkpoint.
//!
//! Players can take checkpoints when drawing the path so that they can revert back to a
//! well-known state if need be.
//! A checkpoint saves the game state snapshot and the number of moves the player made so far.
//!
//! See [`crate::game`] where the checkpoints are organized as a stack: a player can create several
//! checkpoints, and can revert back to the last checkpoint, which is then deleted.

use crate::game::Game;
use crate::game_state::GameState;

/// Checkpoint representation.
#[derive(Debug, Clone)]
pub struct CheckPoint {
    /// Game state at the time of the checkpoint.
    pub state: GameState,

    /// Number of accepted moves at the time of the checkpoint.
    pub moves: usize,
}

impl CheckPoint {
    /// Create a [`CheckPoint`] object for the provided [`Game`] object.
    pub fn new(game: &Game) -> Self {
        Self {
            state: game.state().clone(),
            moves: game.moves().len(),
        }
    }
}
