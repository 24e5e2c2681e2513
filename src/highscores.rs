/*
highscores.rs

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

//! Manage high scores.
//!
//! The game session reports the solving times through the [`ScoreLedger`] trait.
//! The main implementation, [`HighScores`], maintains a list of high scores for each difficulty
//! level.
//! This object is saved when the player solves a puzzle and makes it to the scoreboard, and
//! is restored when Pathkudo starts.
//! See the [`crate::saver::highscores`] module that saves and restores the [`HighScores`] object.

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::generator::difficulty::Difficulty;

/// Number of entries per scoreboard (number of top scores to keep).
pub const BOARD_SIZE: usize = 10;

/// Store that receives the solving times.
pub trait ScoreLedger {
    /// Record a solving time and return the position in the scoreboard, or None if the time
    /// does not make it to the board.
    ///
    /// The returned position starts at 1 (top score).
    fn record(
        &mut self,
        difficulty: Difficulty,
        time: Duration,
        player_name: &str,
    ) -> Option<usize>;

    /// Return the best time for the difficulty level, or None if no time was recorded.
    fn best_time(&self, difficulty: Difficulty) -> Option<Duration>;
}

/// Object that represent a score.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Score {
    /// How long did it take for solving the puzzle.
    pub time: Duration,

    /// Name of the player.
    pub player_name: String,

    /// Completion timestamp, which is used to display the date and time in the scoreboard.
    pub when: DateTime<Local>,
}

/// Sorted list of the top scores for a difficulty level.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
struct HighScoreBoard {
    /// Sorted list of the top scores.
    /// The number of scores in this list is controlled by the [`BOARD_SIZE`] constant.
    top: Vec<Score>,
}

impl HighScoreBoard {
    /// Add a score to the scoreboard and return the position in the board, or None if the
    /// score does not make it to the board.
    ///
    /// Equal times keep their arrival order: the new score goes after the existing ones.
    fn add_score(&mut self, time: Duration, player_name: &str) -> Option<usize> {
        let position: usize = self.top.partition_point(|s| s.time <= time);
        if position >= BOARD_SIZE {
            return None;
        }
        self.top.insert(
            position,
            Score {
                time,
                player_name: player_name.to_string(),
                when: Local::now(),
            },
        );
        self.top.truncate(BOARD_SIZE);
        Some(position + 1)
    }
}

/// List of the scoreboards.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HighScores {
    /// Map of the [`HighScoreBoard`] scoreboards indexed by the difficulty name.
    board: HashMap<String, HighScoreBoard>,
}

impl HighScores {
    /// Create a [`HighScores`] object.
    pub fn new() -> Self {
        Self {
            board: HashMap::new(),
        }
    }

    /// Return the list of [`Score`] for the given difficulty level.
    ///
    /// Return None when the scoreboard is empty.
    pub fn get_score(&self, difficulty: Difficulty) -> Option<&Vec<Score>> {
        self.board.get(&difficulty.to_string()).map(|b| &b.top)
    }

    /// Return whether the list of scoreboard is empty (no scoreboard for any difficulty)
    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }
}

impl ScoreLedger for HighScores {
    fn record(
        &mut self,
        difficulty: Difficulty,
        time: Duration,
        player_name: &str,
    ) -> Option<usize> {
        self.board
            .entry(difficulty.to_string())
            .or_default()
            .add_score(time, player_name)
    }

    fn best_time(&self, difficulty: Difficulty) -> Option<Duration> {
        self.get_score(difficulty)
            .and_then(|top| top.first())
            .map(|s| s.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_positions() {
        let mut scores = HighScores::new();
        assert!(scores.is_empty());
        assert_eq!(scores.record(Difficulty::Easy, secs(50), "ann"), Some(1));
        assert_eq!(scores.record(Difficulty::Easy, secs(40), "bob"), Some(1));
        assert_eq!(scores.record(Difficulty::Easy, secs(45), "cy"), Some(2));
        // Ties go after the existing score
        assert_eq!(scores.record(Difficulty::Easy, secs(40), "dee"), Some(2));

        let names: Vec<&str> = scores
            .get_score(Difficulty::Easy)
            .expect("easy board")
            .iter()
            .map(|s| s.player_name.as_str())
            .collect();
        assert_eq!(names, vec!["bob", "dee", "cy", "ann"]);
        assert_eq!(scores.best_time(Difficulty::Easy), Some(secs(40)));
    }

    #[test]
    fn test_boards_are_per_difficulty() {
        let mut scores = HighScores::new();
        scores.record(Difficulty::Hard, secs(300), "ann");
        assert_eq!(scores.best_time(Difficulty::Hard), Some(secs(300)));
        assert_eq!(scores.best_time(Difficulty::Medium), None);
        assert!(scores.get_score(Difficulty::Easy).is_none());
    }

    #[test]
    fn test_board_keeps_the_best_ten() {
        let mut scores = HighScores::new();
        for i in 1..=BOARD_SIZE as u64 {
            assert_eq!(
                scores.record(Difficulty::Medium, secs(i * 10), "p"),
                Some(i as usize)
            );
        }
        // Slower than every entry of a full board
        assert_eq!(scores.record(Difficulty::Medium, secs(500), "slow"), None);
        // Faster than the last entry, which drops off
        assert_eq!(scores.record(Difficulty::Medium, secs(15), "fast"), Some(2));

        let top = scores.get_score(Difficulty::Medium).expect("medium board");
        assert_eq!(top.len(), BOARD_SIZE);
        assert_eq!(top.last().map(|s| s.time), Some(secs(90)));
    }
}
