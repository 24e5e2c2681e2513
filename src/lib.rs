/*
lib.rs

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

//! Path puzzles on a rectangular grid.
//!
//! The player draws a single path, from cell to adjacent cell, that visits every cell exactly
//! once. Some cells hold numbered clues that the path must reach in increasing order, and walls
//! between some cells block the path.
//!
//! * [`generator`] builds random levels that are guaranteed to have a solution.
//! * [`game_state`] implements the rules: move validation, one-step rewind, and completion.
//! * [`game`] wraps a game state into a timed session with checkpoints and high scores.

pub mod application;
pub mod checkpoint;
pub mod cli_options;
pub mod draw;
pub mod game;
pub mod game_state;
pub mod generator;
pub mod highscores;
pub mod saver;
