/*
clues.rs

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

//! Select the path positions that become numbered clues.
//!
//! The first and the last cells of the path are always clues, so that the player knows where
//! to start and where to finish. The other clues are spread randomly along the path and are
//! numbered in path order.

use log::debug;
use rand::Rng;
use std::collections::BTreeSet;

use super::level::Clue;
use super::path::Path;

/// Return the number of clues for a grid of `num_cells` cells.
///
/// The count is at least two (the path ends), and at most the number of cells.
pub fn clue_count(num_cells: usize, fraction: f64) -> usize {
    let k: usize = (num_cells as f64 * fraction).floor() as usize;
    k.max(2).min(num_cells)
}

/// Select the clue positions on the path.
///
/// Return a list of `(path_index, value)` pairs sorted by path index. Values run from 1 to
/// the number of clues: value 1 is always the path start and the highest value is always
/// the path end.
pub fn place<R: Rng>(rng: &mut R, path: &Path, fraction: f64) -> Vec<(usize, usize)> {
    let len: usize = path.len();
    if len == 0 {
        return Vec::new();
    }
    let k: usize = clue_count(len, fraction);

    let mut indices: BTreeSet<usize> = BTreeSet::new();
    indices.insert(0);
    indices.insert(len - 1);
    while indices.len() < k {
        indices.insert(rng.random_range(0..len));
    }
    debug!("Clue path indices = {indices:?}");

    indices
        .into_iter()
        .enumerate()
        .map(|(i, index)| (index, i + 1))
        .collect()
}

/// Convert the `(path_index, value)` pairs into clues on the grid.
pub fn to_clues(path: &Path, placements: &[(usize, usize)]) -> Vec<Clue> {
    placements
        .iter()
        .filter_map(|(index, value)| {
            path.get().get(*index).map(|c| Clue {
                row: c.row,
                col: c.col,
                value: *value,
            })
        })
        .collect()
}
