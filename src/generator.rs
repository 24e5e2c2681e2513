/*
generator.rs

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

//! Generate random puzzles.
//!
//! A puzzle is described by a [`level::Level`] object: the grid size, the numbered clues, and
//! the walls between cells.
//!
//! To play, a random level must be created with a [`level_generator::LevelGenerator`] object
//! and its [`level_generator::LevelGenerator::generate`] method.
//! The generator chains these steps:
//!
//! * A random path that visits every cell exactly once, represented by a [`path::Path`] object.
//!   You create this object by creating a [`random_path::RandomPath`] object and by using its
//!   [`random_path::RandomPath::generate`] method.
//!   If no path exists from the random starting cell, or if the search takes too many steps,
//!   then the method returns an error and the generator tries again.
//!
//! * The clues, which are cells along the path that get their path order number.
//!   See [`clues::place`].
//!   The number of clues depends on the [`difficulty::Difficulty`] level.
//!
//! * The walls, which are placed at random but never on the path. See [`walls::place`].
//!
//! * The verification that the clues can still be linked in order.
//!   See [`solvability::verify`].
//!   If the verification fails too many times, then the generator returns a level without
//!   walls.

pub mod clues;
pub mod difficulty;
pub mod level;
pub mod level_generator;
pub mod path;
pub mod random_path;
pub mod solvability;
pub mod walls;
