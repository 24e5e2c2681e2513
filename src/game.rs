/*
game.rs

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

//! Manage the status of a game in progress.

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::checkpoint::CheckPoint;
use crate::game_state::GameState;
use crate::generator::difficulty::Difficulty;
use crate::generator::level::{Coordinate, Level, LevelError};
use crate::highscores::ScoreLedger;

/// Manage the status of the game in progress.
#[derive(Debug)]
pub struct Game {
    /// Current game state.
    state: GameState,

    /// Difficulty level of the puzzle, used for the scoreboard.
    difficulty: Difficulty,

    /// Moves that changed the game state, in the order the player made them.
    /// Replaying them from the initial state gives the current state.
    moves: Vec<Coordinate>,

    /// Whether the player paused the game. In that case, moves are ignored.
    pub paused: bool,

    /// Time when the game started. Used to compute game duration.
    start_time: Instant,

    /// The elapsed time when the player paused the game.
    pause_duration: Option<Duration>,

    /// The elapsed time when the player solved the puzzle.
    solved_duration: Option<Duration>,

    /// Whether the solving time was already sent to a scoreboard.
    score_recorded: bool,

    /// List of checkpoints set by the player.
    checkpoints: Vec<CheckPoint>,
}

impl Game {
    /// Create a [`Game`] object for the given level.
    pub fn new(level: Level, difficulty: Difficulty) -> Self {
        let state: GameState = GameState::initialize(Arc::new(level));
        let solved_duration: Option<Duration> = state.is_complete().then_some(Duration::ZERO);
        Self {
            state,
            difficulty,
            moves: Vec::new(),
            paused: false,
            start_time: Instant::now(),
            pause_duration: None,
            solved_duration,
            score_recorded: false,
            checkpoints: Vec::new(),
        }
    }

    /// Rebuild a game from a saved level and its moves.
    ///
    /// The moves that do not change the game state are dropped.
    ///
    /// # Errors
    ///
    /// The method returns a [`LevelError`] if the level is malformed.
    pub fn restore(
        level: Level,
        difficulty: Difficulty,
        moves: &[Coordinate],
        elapsed: Duration,
    ) -> Result<Self, LevelError> {
        level.check()?;
        let mut game: Game = Self::new(level, difficulty);
        for m in moves {
            game.play(*m);
        }
        if game.moves.len() != moves.len() {
            debug!(
                "Restore: {} of {} saved moves dropped",
                moves.len() - game.moves.len(),
                moves.len()
            );
        }
        game.start_time = match Instant::now().checked_sub(elapsed) {
            Some(t) => t,
            None => {
                warn!("Restore: saved time {elapsed:?} out of the clock range, timer restarted");
                Instant::now()
            }
        };
        if game.solved_duration.is_some() {
            game.solved_duration = Some(elapsed);
        }
        Ok(game)
    }

    /// Start a new level. The timer and the checkpoints are reset.
    pub fn new_game(&mut self, level: Level, difficulty: Difficulty) {
        info!("New game: level {} ({difficulty})", level.id);
        *self = Self::new(level, difficulty);
    }

    /// Restart the game status (path and checkpoints), but keep the level and the timer.
    ///
    /// If the puzzle was solved, then the timer restarts.
    pub fn reset(&mut self) {
        self.state = GameState::initialize(self.state.level_handle());
        self.moves.clear();
        self.checkpoints.clear();
        self.resume();
        if self.solved_duration.is_some() {
            self.start_time = Instant::now();
            self.solved_duration = self.state.is_complete().then_some(Duration::ZERO);
            self.score_recorded = false;
        }
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Level being played.
    pub fn level(&self) -> &Level {
        self.state.level()
    }

    /// Difficulty level of the puzzle.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Moves that changed the game state.
    pub fn moves(&self) -> &[Coordinate] {
        &self.moves
    }

    /// Move the path to the target cell. Return whether the move was accepted.
    ///
    /// Moves are ignored while the game is paused or once the puzzle is solved.
    pub fn play(&mut self, target: Coordinate) -> bool {
        if self.paused {
            debug!("Move to {target} ignored: the game is paused");
            return false;
        }
        if self.state.is_complete() || !self.state.is_valid_move(target) {
            return false;
        }

        self.state = self.state.apply_move(target);
        self.moves.push(target);
        if self.state.is_complete() {
            let duration: Duration = self.start_time.elapsed();
            info!(
                "Level {} solved in {}s",
                self.level().id,
                duration.as_secs()
            );
            self.solved_duration = Some(duration);
        }
        true
    }

    /// Whether the puzzle is successfully solved.
    pub fn is_solved(&self) -> bool {
        self.state.is_complete()
    }

    /// Send the solving time to the scoreboard and return the position in the scoreboard.
    ///
    /// Return None if the puzzle is not solved, if the time was already sent, or if the time
    /// does not make it to the board.
    pub fn record_score<L: ScoreLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        player_name: &str,
    ) -> Option<usize> {
        let time: Duration = self.solved_duration?;
        if self.score_recorded {
            debug!("Score already recorded");
            return None;
        }
        self.score_recorded = true;
        ledger.record(self.difficulty, time, player_name)
    }

    /// Return the number of checkpoints that the player created.
    pub fn checkpoints_len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Set a checkpoint.
    pub fn set_checkpoint(&mut self) {
        self.checkpoints.push(CheckPoint::new(self));
    }

    /// Revert back to the last checkpoint. Return whether there was a checkpoint.
    pub fn undo_checkpoint(&mut self) -> bool {
        if self.state.is_complete() {
            return false;
        }
        // The checkpoint is removed
        match self.checkpoints.pop() {
            Some(c) => {
                self.state = c.state;
                self.moves.truncate(c.moves);
                true
            }
            None => false,
        }
    }

    /// Pause the game.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        // Store the played time so far, so that the pause time can be deduced when the
        // player resumes the game.
        self.pause_duration = Some(self.start_time.elapsed());
        self.paused = true;
    }

    /// Resume the game.
    pub fn resume(&mut self) {
        // Refresh the game elapsed time by removing the pause time.
        if let Some(d) = self.pause_duration {
            self.start_time += self.start_time.elapsed().saturating_sub(d);
            self.pause_duration = None;
        }
        self.paused = false;
    }

    /// Return the game duration.
    ///
    /// The duration stops when the game is paused and when the puzzle is solved.
    pub fn duration(&self) -> Duration {
        self.solved_duration
            .or(self.pause_duration)
            .unwrap_or_else(|| self.start_time.elapsed())
    }

    /// Return the game duration in hours, minutes, and seconds
    pub fn duration_hms(&self) -> (u64, u64, u64) {
        let duration: u64 = self.duration().as_secs();
        (
            duration / 3600,
            (duration % 3600) / 60,
            (duration % 3600) % 60,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::level::Clue;
    use crate::highscores::HighScores;
    use std::collections::BTreeSet;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn level_2x2() -> Level {
        Level {
            id: String::from("easy-2x2-test"),
            rows: 2,
            cols: 2,
            initial_values: vec![
                Clue {
                    row: 0,
                    col: 0,
                    value: 1,
                },
                Clue {
                    row: 1,
                    col: 0,
                    value: 2,
                },
            ],
            walls: BTreeSet::new(),
        }
    }

    fn solve(game: &mut Game) {
        for m in [c(0, 1), c(1, 1), c(1, 0)] {
            assert!(game.play(m));
        }
    }

    #[test]
    fn test_play_records_accepted_moves_only() {
        let mut game = Game::new(level_2x2(), Difficulty::Easy);
        assert!(!game.play(c(1, 1)));
        assert!(!game.play(c(0, 0)));
        assert!(game.play(c(0, 1)));
        // Rewind
        assert!(game.play(c(0, 0)));
        assert_eq!(game.moves(), &[c(0, 1), c(0, 0)]);
        assert_eq!(game.state().current_path(), &[c(0, 0)]);
    }

    #[test]
    fn test_solve_and_record_score_once() {
        let mut game = Game::new(level_2x2(), Difficulty::Easy);
        let mut scores = HighScores::new();
        assert_eq!(game.record_score(&mut scores, "ann"), None);

        solve(&mut game);
        assert!(game.is_solved());
        assert!(!game.play(c(1, 1)));
        let solved_in: Duration = game.duration();
        assert_eq!(game.duration(), solved_in);

        assert_eq!(game.record_score(&mut scores, "ann"), Some(1));
        assert_eq!(game.record_score(&mut scores, "ann"), None);
        assert_eq!(scores.best_time(Difficulty::Easy), Some(solved_in));
    }

    #[test]
    fn test_paused_game_ignores_moves() {
        let mut game = Game::new(level_2x2(), Difficulty::Easy);
        game.pause();
        assert!(game.paused);
        assert_eq!(game.duration(), game.duration());
        assert!(!game.play(c(0, 1)));
        game.resume();
        assert!(!game.paused);
        assert!(game.play(c(0, 1)));
    }

    #[test]
    fn test_checkpoints() {
        let mut game = Game::new(level_2x2(), Difficulty::Easy);
        assert!(!game.undo_checkpoint());
        game.play(c(0, 1));
        game.set_checkpoint();
        game.play(c(1, 1));
        assert_eq!(game.checkpoints_len(), 1);

        assert!(game.undo_checkpoint());
        assert_eq!(game.checkpoints_len(), 0);
        assert_eq!(game.moves(), &[c(0, 1)]);
        assert_eq!(game.state().current_path(), &[c(0, 0), c(0, 1)]);
    }

    #[test]
    fn test_reset_after_solving_allows_a_new_score() {
        let mut game = Game::new(level_2x2(), Difficulty::Easy);
        let mut scores = HighScores::new();
        solve(&mut game);
        game.set_checkpoint();
        assert!(game.record_score(&mut scores, "ann").is_some());

        game.reset();
        assert!(!game.is_solved());
        assert!(game.moves().is_empty());
        assert_eq!(game.checkpoints_len(), 0);
        assert_eq!(game.state().current_path(), &[c(0, 0)]);

        solve(&mut game);
        assert_eq!(game.record_score(&mut scores, "bob").map(|_| ()), Some(()));
    }

    #[test]
    fn test_restore_replays_moves() {
        let moves = [c(0, 1), c(1, 0), c(1, 1)];
        let game = Game::restore(level_2x2(), Difficulty::Easy, &moves, Duration::from_secs(5))
            .expect("valid level");
        // (1, 0) holds clue 2 and is not adjacent to (0, 1): dropped
        assert_eq!(game.moves(), &[c(0, 1), c(1, 1)]);
        assert!(game.duration() >= Duration::from_secs(5));
    }

    #[test]
    fn test_restore_with_out_of_range_time_restarts_the_timer() {
        let game = Game::restore(level_2x2(), Difficulty::Easy, &[c(0, 1)], Duration::MAX)
            .expect("valid level");
        assert_eq!(game.moves(), &[c(0, 1)]);
        assert!(game.duration() < Duration::from_secs(60));
    }

    #[test]
    fn test_restore_rejects_malformed_levels() {
        let mut level = level_2x2();
        level.initial_values[1].value = 3;
        assert_eq!(
            Game::restore(level, Difficulty::Easy, &[], Duration::ZERO).map(|_| ()),
            Err(LevelError::NonContiguousValues)
        );
    }

    #[test]
    fn test_new_game_replaces_the_level() {
        let mut game = Game::new(level_2x2(), Difficulty::Easy);
        solve(&mut game);
        let mut level = level_2x2();
        level.id = String::from("other");
        game.new_game(level, Difficulty::Hard);
        assert_eq!(game.level().id, "other");
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert!(!game.is_solved());
    }
}
