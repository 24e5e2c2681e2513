/*
difficulty.rs

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

//! Puzzle difficulty level and the generation parameters that derive from it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Puzzle difficulty level.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Display,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All the difficulty levels, from the easiest.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Fraction of the grid cells that get a clue.
    pub fn clue_fraction(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.0 / 3.0,
            Difficulty::Medium => 1.0 / 4.0,
            Difficulty::Hard => 1.0 / 5.0,
        }
    }

    /// Probability for each internal edge of the grid to receive a wall.
    pub fn wall_density(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.03,
            Difficulty::Medium => 0.05,
            Difficulty::Hard => 0.08,
        }
    }
}
