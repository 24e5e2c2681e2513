/*
level_generator.rs

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

//! Build complete levels.
//!
//! Each attempt builds a random path, places the clues and the walls, and verifies the
//! result. After [`MAX_ATTEMPTS`] failed attempts, the generator gives up on walls and
//! returns a level without any, which the generating path always solves.
//!
//! On large grids the path search can hit its iteration limit. After [`MAX_OVERRUNS`] such
//! searches, the generator goes straight to the wall-free level, and uses the serpentine path
//! if the search overruns once more.

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::collections::BTreeSet;
use std::time::Instant;

use super::clues;
use super::difficulty::Difficulty;
use super::level::{Level, Wall};
use super::path::Path;
use super::random_path::{self, RandomPath, RandomPathError};
use super::solvability;
use super::walls;

/// Maximum number of attempts before falling back to a level without walls.
pub const MAX_ATTEMPTS: usize = 50;

/// Maximum number of path searches that can hit the iteration limit before falling back.
pub const MAX_OVERRUNS: usize = 3;

/// Statistics about the last generated level.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GenerationStats {
    /// Number of attempts, including the successful one.
    pub attempts: usize,

    /// Number of attempts for which no path was found from the random starting cell.
    pub path_failures: usize,

    /// Number of path searches stopped by the iteration limit, fallback included.
    pub overruns: usize,

    /// Number of attempts rejected by the solvability verification.
    pub verify_failures: usize,

    /// Whether the level is the wall-free fallback.
    pub fallback: bool,

    /// Whether the fallback had to use the serpentine path.
    pub serpentine: bool,

    /// Duration in seconds it took to generate the level.
    pub duration: f32,
}

/// Level generator.
///
/// The generator owns its random source, so that a seeded generator always produces the
/// same sequence of levels.
pub struct LevelGenerator<R: Rng> {
    /// Random source.
    rng: R,

    /// Statistics about the last generated level.
    pub stats: GenerationStats,
}

impl LevelGenerator<Pcg64> {
    /// Create a generator that produces the same levels for the same seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Pcg64::seed_from_u64(seed))
    }

    /// Create a generator seeded from the thread random source.
    pub fn from_entropy() -> Self {
        Self::new(Pcg64::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> LevelGenerator<R> {
    /// Create a [`LevelGenerator`] object.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            stats: GenerationStats::default(),
        }
    }

    /// Generate a level.
    ///
    /// `rows` and `cols` must be at least 1.
    pub fn generate(&mut self, rows: usize, cols: usize, difficulty: Difficulty) -> Level {
        self.generate_with_solution(rows, cols, difficulty).0
    }

    /// Generate a level and return it with the path that was used to build it.
    ///
    /// The path is a solution of the level: it visits every cell, reaches the clues in order,
    /// and crosses no wall.
    pub fn generate_with_solution(
        &mut self,
        rows: usize,
        cols: usize,
        difficulty: Difficulty,
    ) -> (Level, Path) {
        let start: Instant = Instant::now();
        self.stats = GenerationStats::default();
        let mut builder: RandomPath = RandomPath::new(rows, cols);

        while self.stats.attempts < MAX_ATTEMPTS {
            self.stats.attempts += 1;
            debug!("Attempt {}", self.stats.attempts);

            let path: Path = match builder.generate(&mut self.rng) {
                Ok(p) => p,
                Err(RandomPathError::NoPath) => {
                    debug!("Attempt {}: no path", self.stats.attempts);
                    self.stats.path_failures += 1;
                    continue;
                }
                Err(RandomPathError::IterationsExceeded) => {
                    debug!(
                        "Attempt {}: stopped after {} iterations",
                        self.stats.attempts, builder.iteration
                    );
                    self.stats.overruns += 1;
                    if self.stats.overruns >= MAX_OVERRUNS {
                        break;
                    }
                    continue;
                }
            };
            let placements: Vec<(usize, usize)> =
                clues::place(&mut self.rng, &path, difficulty.clue_fraction());
            let walls: BTreeSet<Wall> = walls::place(
                &mut self.rng,
                rows,
                cols,
                &path,
                difficulty.wall_density(),
            );
            let level: Level = self.build_level(rows, cols, difficulty, &path, &placements, walls);

            if solvability::verify(&level) {
                self.stats.duration = start.elapsed().as_secs_f32();
                info!(
                    "Level {} generated in {} attempt(s) ({}s)",
                    level.id, self.stats.attempts, self.stats.duration
                );
                return (level, path);
            }
            debug!("Attempt {}: verification failed", self.stats.attempts);
            self.stats.verify_failures += 1;
        }

        warn!(
            "No level after {} attempt(s): falling back to a level without walls",
            self.stats.attempts
        );
        let (level, path) = self.fallback(difficulty, &mut builder);
        self.stats.duration = start.elapsed().as_secs_f32();
        (level, path)
    }

    /// Build a level without walls.
    ///
    /// The generating path crosses no wall, so the level needs no verification.
    fn fallback(&mut self, difficulty: Difficulty, builder: &mut RandomPath) -> (Level, Path) {
        self.stats.fallback = true;
        let path: Path = self.fallback_path(builder);
        let placements: Vec<(usize, usize)> =
            clues::place(&mut self.rng, &path, difficulty.clue_fraction());
        let level: Level = self.build_level(
            builder.rows,
            builder.cols,
            difficulty,
            &path,
            &placements,
            BTreeSet::new(),
        );
        (level, path)
    }

    /// Return a fresh random path, or the serpentine path if the random search keeps failing
    /// or hits its iteration limit.
    fn fallback_path(&mut self, builder: &mut RandomPath) -> Path {
        for _ in 0..MAX_ATTEMPTS {
            match builder.generate(&mut self.rng) {
                Ok(p) => return p,
                Err(RandomPathError::NoPath) => (),
                Err(RandomPathError::IterationsExceeded) => {
                    self.stats.overruns += 1;
                    break;
                }
            }
        }
        warn!("No random path found: using the serpentine path");
        self.stats.serpentine = true;
        random_path::serpentine(builder.rows, builder.cols)
    }

    /// Assemble the level from the clues placed along the path and the walls.
    fn build_level(
        &mut self,
        rows: usize,
        cols: usize,
        difficulty: Difficulty,
        path: &Path,
        placements: &[(usize, usize)],
        walls: BTreeSet<Wall>,
    ) -> Level {
        Level {
            id: format!(
                "{difficulty}-{rows}x{cols}-{:016x}",
                self.rng.random::<u64>()
            ),
            rows,
            cols,
            initial_values: clues::to_clues(path, placements),
            walls,
        }
    }
}
