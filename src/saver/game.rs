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

//! Save and restore the game in progress when quitting or starting Pathkudo.
//!
//! When a game is in progress and the player quits Pathkudo, the game status is saved in the
//! `savegame.json` file.
//! When Pathkudo is restarted with the `--resume` option, the saved game is loaded, and the
//! player can continue the puzzle.
//!
//! Only the level, the difficulty, the moves, and the elapsed time are saved.
//! The game state is rebuilt by replaying the moves, after the level is verified.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::game::Game;
use crate::generator::difficulty::Difficulty;
use crate::generator::level::{Coordinate, Level};

/// Serialized form of a game in progress.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedGame {
    /// Level being played.
    pub level: Level,

    /// Difficulty level of the puzzle.
    pub difficulty: Difficulty,

    /// Moves that the player made.
    pub moves: Vec<Coordinate>,

    /// Time played so far.
    pub elapsed: Duration,
}

impl From<&Game> for SavedGame {
    fn from(game: &Game) -> Self {
        Self {
            level: game.level().clone(),
            difficulty: game.difficulty(),
            moves: game.moves().to_vec(),
            elapsed: game.duration(),
        }
    }
}

/// Object to save and restore a puzzle in progress.
pub struct SaverGame {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverGame {
    /// Create a [`SaverGame`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the puzzle must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("savegame.json");
        debug!("Save game file: {data_dir:?}");
        SaverGame {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`Game`] object for the saved puzzle.
    ///
    /// Return the [`Game`] object or None if there is no saved puzzle.
    /// Return an error if the file cannot be read or if the saved level is malformed.
    pub fn get_game(&self) -> Result<Option<Game>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(Box::new(error)),
        };
        let reader: BufReader<File> = BufReader::new(file);
        let saved: SavedGame = serde_json::from_reader(reader)?;
        debug!(
            "Restoring level {} with {} moves",
            saved.level.id,
            saved.moves.len()
        );
        let game: Game =
            Game::restore(saved.level, saved.difficulty, &saved.moves, saved.elapsed)?;
        Ok(Some(game))
    }

    /// Save the provided [`Game`] object.
    pub fn save_game(&self, game: &Game) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, &SavedGame::from(game))?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved game.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::level_generator::LevelGenerator;

    #[test]
    fn test_save_and_restore_game_in_progress() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let saver = SaverGame::new(dir.path().to_path_buf());
        assert!(saver.get_game().expect("no error").is_none());

        let (level, solution) =
            LevelGenerator::from_seed(5).generate_with_solution(4, 4, Difficulty::Medium);
        let mut game = Game::new(level, Difficulty::Medium);
        for cell in &solution.get()[1..6] {
            assert!(game.play(*cell));
        }
        saver.save_game(&game).expect("saved");

        let restored = saver.get_game().expect("no error").expect("saved game");
        assert_eq!(restored.level(), game.level());
        assert_eq!(restored.difficulty(), Difficulty::Medium);
        assert_eq!(restored.moves(), game.moves());
        assert_eq!(restored.state(), game.state());

        saver.delete_save();
        assert!(saver.get_game().expect("no error").is_none());
    }

    #[test]
    fn test_malformed_level_is_rejected() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let saver = SaverGame::new(dir.path().to_path_buf());
        let mut level = LevelGenerator::from_seed(5).generate(3, 3, Difficulty::Easy);
        level.rows = 0;
        let saved = SavedGame {
            level,
            difficulty: Difficulty::Easy,
            moves: Vec::new(),
            elapsed: Duration::ZERO,
        };
        std::fs::write(
            dir.path().join("savegame.json"),
            serde_json::to_string(&saved).expect("serialized"),
        )
        .expect("written");
        assert!(saver.get_game().is_err());
    }
}
