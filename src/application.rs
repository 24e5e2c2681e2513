/*
application.rs

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

//! Interactive game loop.
//!
//! The player types one command per line. A command is either the coordinates of the target
//! cell (`row col` or `row,col`) or one of the words listed by [`HELP`].
//!
//! When the player quits or the input ends, an unsolved game is saved so that it can be
//! resumed later.

use clap::ValueEnum;
use log::{debug, warn};
use rand_pcg::Pcg64;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::draw::Draw;
use crate::game::Game;
use crate::generator::difficulty::Difficulty;
use crate::generator::level::{Coordinate, Level};
use crate::generator::level_generator::LevelGenerator;
use crate::highscores::{HighScores, Score};
use crate::saver::game::SaverGame;
use crate::saver::highscores::SaverHighScores;

/// Commands summary.
pub const HELP: &str = "Commands:
  <row> <col>       move the path to the cell (moving to the previous cell steps back)
  reset             restart the puzzle
  new [difficulty]  play a new puzzle (easy, medium, hard)
  checkpoint        set a checkpoint
  back              revert to the last checkpoint
  pause | resume    pause or resume the game
  scores            show the high scores
  help              show this message
  quit              save the game and quit";

/// Type of errors when parsing a command.
#[derive(Debug, PartialEq)]
pub enum CommandError {
    /// The line is empty.
    Empty,

    /// The command is not known.
    Unknown(String),

    /// The coordinates cannot be parsed.
    BadCoordinate(String),

    /// The difficulty level is not known.
    UnknownDifficulty(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Type a command, or help"),
            CommandError::Unknown(c) => write!(f, "Unknown command: {c}"),
            CommandError::BadCoordinate(c) => write!(f, "Wrong coordinates: {c}"),
            CommandError::UnknownDifficulty(d) => write!(f, "Unknown difficulty level: {d}"),
        }
    }
}

impl Error for CommandError {}

/// Player command.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Move the path to the cell.
    Move(Coordinate),
    Reset,

    /// Start a new puzzle, optionally with another difficulty level.
    New(Option<Difficulty>),
    Checkpoint,
    Back,
    Pause,
    Resume,
    Scores,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|w| !w.is_empty())
            .collect();
        let Some(first) = words.first() else {
            return Err(CommandError::Empty);
        };

        if first.starts_with(|c: char| c.is_ascii_digit()) {
            return match words.as_slice() {
                [row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
                    (Ok(row), Ok(col)) => Ok(Command::Move(Coordinate::new(row, col))),
                    _ => Err(CommandError::BadCoordinate(line.trim().to_string())),
                },
                _ => Err(CommandError::BadCoordinate(line.trim().to_string())),
            };
        }

        match (first.to_lowercase().as_str(), words.get(1)) {
            ("reset", None) => Ok(Command::Reset),
            ("new", None) => Ok(Command::New(None)),
            ("new", Some(d)) => <Difficulty as ValueEnum>::from_str(d, true)
                .map(|d| Command::New(Some(d)))
                .map_err(|_| CommandError::UnknownDifficulty(d.to_string())),
            ("checkpoint" | "cp", None) => Ok(Command::Checkpoint),
            ("back" | "undo", None) => Ok(Command::Back),
            ("pause", None) => Ok(Command::Pause),
            ("resume", None) => Ok(Command::Resume),
            ("scores", None) => Ok(Command::Scores),
            ("help" | "?", None) => Ok(Command::Help),
            ("quit" | "q" | "exit", None) => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(line.trim().to_string())),
        }
    }
}

/// Parameters of the interactive session.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Grid size for the new puzzles.
    pub rows: usize,
    pub cols: usize,

    /// Difficulty level for the new puzzles.
    pub difficulty: Difficulty,

    /// Seed for the level generator. A random seed is used when None.
    pub seed: Option<u64>,

    /// Name recorded in the high scores.
    pub player_name: String,

    /// Directory for the saved game and the high scores.
    pub data_dir: PathBuf,

    /// Whether to continue the saved game instead of starting a new one.
    pub resume: bool,
}

/// Format a duration in hours, minutes, and seconds.
pub fn format_hms((h, m, s): (u64, u64, u64)) -> String {
    format!("{h:02}:{m:02}:{s:02}")
}

/// Print the scoreboard of the given difficulty level.
pub fn write_scores<W: Write>(
    out: &mut W,
    highscores: &HighScores,
    difficulty: Difficulty,
) -> std::io::Result<()> {
    writeln!(out, "High scores ({difficulty}):")?;
    let Some(top) = highscores.get_score(difficulty) else {
        return writeln!(out, "  no score yet");
    };
    for (i, score) in top.iter().enumerate() {
        let Score {
            time,
            player_name,
            when,
        } = score;
        let secs: u64 = time.as_secs();
        writeln!(
            out,
            "  {:>2}. {}  {player_name}  {}",
            i + 1,
            format_hms((secs / 3600, (secs % 3600) / 60, secs % 60)),
            when.format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

/// Interactive session.
pub struct Application {
    /// Session parameters.
    settings: Settings,

    /// Game in progress.
    game: Game,

    /// Source of the new puzzles.
    generator: LevelGenerator<Pcg64>,

    /// Scoreboards.
    highscores: HighScores,

    /// Save and restore the game in progress.
    saver_game: SaverGame,

    /// Save and restore the scoreboards.
    saver_highscores: SaverHighScores,
}

impl Application {
    /// Create an [`Application`] object: load the high scores, and restore the saved game or
    /// generate a new puzzle.
    pub fn new(settings: Settings) -> Result<Self, Box<dyn Error>> {
        fs::create_dir_all(&settings.data_dir)?;
        let saver_game: SaverGame = SaverGame::new(settings.data_dir.clone());
        let saver_highscores: SaverHighScores = SaverHighScores::new(settings.data_dir.clone());
        let highscores: HighScores = saver_highscores.load_or_default()?;
        let mut generator: LevelGenerator<Pcg64> = match settings.seed {
            Some(seed) => LevelGenerator::from_seed(seed),
            None => LevelGenerator::from_entropy(),
        };

        let mut restored: Option<Game> = None;
        if settings.resume {
            debug!("Getting the saved game");
            match saver_game.get_game() {
                Ok(Some(g)) => restored = Some(g),
                Ok(None) => debug!("No saved game"),
                Err(error) => {
                    warn!("Error getting the saved game: {error}");
                    // Delete the file in error for trying to resolve the issue for the next start
                    saver_game.delete_save();
                }
            }
        }
        let game: Game = match restored {
            Some(g) => g,
            None => {
                let level: Level =
                    generator.generate(settings.rows, settings.cols, settings.difficulty);
                Game::new(level, settings.difficulty)
            }
        };

        Ok(Self {
            settings,
            game,
            generator,
            highscores,
            saver_game,
            saver_highscores,
        })
    }

    /// Game in progress.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Read the commands from `input` until the player quits or the input ends.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut out: W,
    ) -> Result<(), Box<dyn Error>> {
        self.write_board(&mut out)?;

        for line in input.lines() {
            let line: String = line?;
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command, &mut out)?,
                Err(CommandError::Empty) => continue,
                Err(error) => writeln!(out, "{error}")?,
            }
        }
        self.quit(&mut out)
    }

    /// Run a command.
    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<(), Box<dyn Error>> {
        debug!("Command: {command:?}");
        match command {
            Command::Move(target) => {
                if self.game.paused {
                    writeln!(out, "The game is paused: type resume to continue")?;
                } else if self.game.is_solved() {
                    writeln!(out, "The puzzle is solved: type new or reset")?;
                } else if self.game.play(target) {
                    self.write_board(out)?;
                    if self.game.is_solved() {
                        self.solved(out)?;
                    }
                } else {
                    writeln!(out, "Cannot move to {target}")?;
                }
            }
            Command::Reset => {
                self.game.reset();
                self.write_board(out)?;
            }
            Command::New(difficulty) => {
                if let Some(d) = difficulty {
                    self.settings.difficulty = d;
                }
                let level: Level = self.generator.generate(
                    self.settings.rows,
                    self.settings.cols,
                    self.settings.difficulty,
                );
                self.game.new_game(level, self.settings.difficulty);
                self.saver_game.delete_save();
                self.write_board(out)?;
            }
            Command::Checkpoint => {
                self.game.set_checkpoint();
                writeln!(out, "Checkpoint {} set", self.game.checkpoints_len())?;
            }
            Command::Back => {
                if self.game.undo_checkpoint() {
                    self.write_board(out)?;
                } else {
                    writeln!(out, "No checkpoint")?;
                }
            }
            Command::Pause => {
                self.game.pause();
                writeln!(out, "Paused at {}", format_hms(self.game.duration_hms()))?;
            }
            Command::Resume => {
                self.game.resume();
                self.write_board(out)?;
            }
            Command::Scores => write_scores(out, &self.highscores, self.game.difficulty())?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => (),
        }
        Ok(())
    }

    /// Print the board, unless the game is paused.
    fn write_board<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if self.game.paused {
            return Ok(());
        }
        let draw: Draw = Draw::new(self.game.level());
        write!(out, "{}", draw.state(self.game.state()))?;
        writeln!(
            out,
            "Level {} ({})  next clue: {}/{}  time: {}",
            self.game.level().id,
            self.game.difficulty(),
            self.game.state().last_visited_number() + 1,
            self.game.level().max_number(),
            format_hms(self.game.duration_hms())
        )
    }

    /// Record the score of a solved puzzle.
    fn solved<W: Write>(&mut self, out: &mut W) -> Result<(), Box<dyn Error>> {
        writeln!(out, "Solved in {}!", format_hms(self.game.duration_hms()))?;
        if let Some(position) = self
            .game
            .record_score(&mut self.highscores, &self.settings.player_name)
        {
            writeln!(out, "New high score: position {position}")?;
            self.saver_highscores.save_highscores(&self.highscores)?;
        }
        self.saver_game.delete_save();
        Ok(())
    }

    /// Save the game in progress.
    fn quit<W: Write>(&mut self, out: &mut W) -> Result<(), Box<dyn Error>> {
        if self.game.is_solved() || self.game.moves().is_empty() {
            return Ok(());
        }
        self.saver_game.save_game(&self.game)?;
        writeln!(out, "Game saved")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::path::Path;
    use std::io::Cursor;

    fn settings(dir: &tempfile::TempDir, resume: bool) -> Settings {
        Settings {
            rows: 4,
            cols: 4,
            difficulty: Difficulty::Easy,
            seed: Some(12),
            player_name: String::from("ann"),
            data_dir: dir.path().to_path_buf(),
            resume,
        }
    }

    fn solution() -> Path {
        LevelGenerator::from_seed(12)
            .generate_with_solution(4, 4, Difficulty::Easy)
            .1
    }

    fn moves(path: &[Coordinate]) -> String {
        path.iter()
            .map(|c| format!("{} {}\n", c.row, c.col))
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "2 3".parse::<Command>(),
            Ok(Command::Move(Coordinate::new(2, 3)))
        );
        assert_eq!(
            " 2,3 ".parse::<Command>(),
            Ok(Command::Move(Coordinate::new(2, 3)))
        );
        assert_eq!(
            "NEW hard".parse::<Command>(),
            Ok(Command::New(Some(Difficulty::Hard)))
        );
        assert_eq!("cp".parse::<Command>(), Ok(Command::Checkpoint));
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "2".parse::<Command>(),
            Err(CommandError::BadCoordinate(String::from("2")))
        );
        assert_eq!(
            "new extreme".parse::<Command>(),
            Err(CommandError::UnknownDifficulty(String::from("extreme")))
        );
        assert_eq!(
            "fly".parse::<Command>(),
            Err(CommandError::Unknown(String::from("fly")))
        );
    }

    #[test]
    fn test_solve_records_the_score() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let mut app = Application::new(settings(&dir, false)).expect("application");
        let mut out: Vec<u8> = Vec::new();
        let input = format!("{}scores\n", moves(&solution().get()[1..]));
        app.run(Cursor::new(input), &mut out).expect("run");

        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("Solved in"));
        assert!(text.contains("New high score: position 1"));
        assert!(text.contains("ann"));
        assert!(app.game().is_solved());

        let scores = SaverHighScores::new(dir.path().to_path_buf())
            .get_highscores()
            .expect("no error")
            .expect("scores saved");
        assert_eq!(scores.get_score(Difficulty::Easy).map(Vec::len), Some(1));
        assert!(!dir.path().join("savegame.json").exists());
    }

    #[test]
    fn test_quit_saves_and_resume_restores() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = solution();
        let mut app = Application::new(settings(&dir, false)).expect("application");
        let input = format!("{}9 9\nquit\n1 1\n", moves(&path.get()[1..4]));
        let mut out: Vec<u8> = Vec::new();
        app.run(Cursor::new(input), &mut out).expect("run");

        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("Cannot move to (9, 9)"));
        assert!(text.contains("Game saved"));
        assert_eq!(app.game().moves(), &path.get()[1..4]);

        let resumed = Application::new(settings(&dir, true)).expect("application");
        assert_eq!(resumed.game().moves(), &path.get()[1..4]);
        assert_eq!(resumed.game().level(), app.game().level());
    }

    #[test]
    fn test_corrupted_save_is_deleted() {
        let dir = tempfile::tempdir().expect("temporary directory");
        fs::write(dir.path().join("savegame.json"), "[]").expect("written");
        let app = Application::new(settings(&dir, true)).expect("application");
        assert!(app.game().moves().is_empty());
        assert!(!dir.path().join("savegame.json").exists());
    }

    #[test]
    fn test_paused_game_hides_the_board_and_ignores_moves() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = solution();
        let mut app = Application::new(settings(&dir, false)).expect("application");
        let input = format!("pause\n{}", moves(&path.get()[1..2]));
        let mut out: Vec<u8> = Vec::new();
        app.run(Cursor::new(input), &mut out).expect("run");

        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("The game is paused"));
        assert!(app.game().moves().is_empty());
    }
}
