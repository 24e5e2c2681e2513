/*
cli_options.rs

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

//! Process command-line options.
//!
//! Without the `--play` or `--resume` options, Pathkudo generates levels and prints them.
//!
//! # Examples
//!
//! Generate a 4x5 level at the hard difficulty level, with the solution:
//!
//! ```text
//! $ pathkudo -r 4 --cols 5 -f hard --seed 7 --solution
//! ```
//!
//! Generate 100 levels and print some statistics:
//!
//! ```text
//! $ pathkudo -c 100 -s > /dev/null
//! ```
//!
//! Play:
//!
//! ```text
//! $ pathkudo --play --name ann
//! ```

use clap::Parser;
use log::debug;
use serde::Serialize;
use std::env;
use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::application::{self, Application, Settings};
use crate::draw::Draw;
use crate::generator::difficulty::Difficulty;
use crate::generator::level::{Coordinate, Level};
use crate::generator::level_generator::LevelGenerator;
use crate::generator::path::Path;
use crate::saver::highscores::SaverHighScores;

/// Largest grid side.
///
/// Beyond that size, the random path search often hits its iteration limit, and most levels
/// end up as the serpentine path without walls.
const MAX_SIDE: u16 = 8;

/// Generate and play path puzzles.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
struct Args {
    /// Number of rows in the grid
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u16).range(1..=MAX_SIDE as i64))]
    rows: u16,

    /// Number of columns in the grid
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u16).range(1..=MAX_SIDE as i64))]
    cols: u16,

    /// Difficulty level for the puzzle
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Number of levels to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Seed for the random generator, to reproduce levels
    #[arg(long)]
    seed: Option<u64>,

    /// Print the levels in JSON format
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Also print the path that was used to build each level
    #[arg(long, default_value_t = false)]
    solution: bool,

    /// Print some statistics after generating the levels
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Play interactively
    #[arg(short, long, default_value_t = false)]
    play: bool,

    /// Continue the saved game
    #[arg(long, default_value_t = false)]
    resume: bool,

    /// Player name for the high scores
    #[arg(short, long, default_value = "player")]
    name: String,

    /// Show the high scores
    #[arg(long, default_value_t = false)]
    scores: bool,

    /// Directory for the saved game and the high scores
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Level printed in JSON format, with its solution if requested.
#[derive(Serialize)]
struct JsonLevel<'a> {
    #[serde(flatten)]
    level: &'a Level,

    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<&'a [Coordinate]>,
}

/// Return the default directory for the saved game and the high scores.
fn default_data_dir() -> PathBuf {
    let mut dir: PathBuf = match env::var_os("XDG_DATA_HOME") {
        Some(d) => PathBuf::from(d),
        None => match env::var_os("HOME") {
            Some(h) => [h.as_os_str(), ".local".as_ref(), "share".as_ref()]
                .iter()
                .collect(),
            None => PathBuf::from("."),
        },
    };
    dir.push("pathkudo");
    dir
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();
    debug!("{args:?}");

    let ret: Result<(), Box<dyn Error>> = if args.scores {
        print_scores(&args)
    } else if args.play || args.resume {
        play(args)
    } else {
        generate(&args)
    };
    match ret {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Error: {error}");
            1
        }
    }
}

/// Print the scoreboards.
fn print_scores(args: &Args) -> Result<(), Box<dyn Error>> {
    let data_dir: PathBuf = args.data_dir.clone().unwrap_or_else(default_data_dir);
    let saver: SaverHighScores = SaverHighScores::new(data_dir);
    let highscores = saver.load_or_default()?;
    let mut out = io::stdout().lock();
    for difficulty in Difficulty::ALL {
        application::write_scores(&mut out, &highscores, difficulty)?;
    }
    Ok(())
}

/// Start the interactive session.
fn play(args: Args) -> Result<(), Box<dyn Error>> {
    let settings: Settings = Settings {
        rows: args.rows.into(),
        cols: args.cols.into(),
        difficulty: args.difficulty,
        seed: args.seed,
        player_name: args.name,
        data_dir: args.data_dir.unwrap_or_else(default_data_dir),
        resume: args.resume,
    };
    let mut app: Application = Application::new(settings)?;
    app.run(io::stdin().lock(), io::stdout().lock())
}

/// Generate the levels and print them.
fn generate(args: &Args) -> Result<(), Box<dyn Error>> {
    let rows: usize = args.rows.into();
    let cols: usize = args.cols.into();
    let mut generator: LevelGenerator<_> = match args.seed {
        Some(seed) => LevelGenerator::from_seed(seed),
        None => LevelGenerator::from_entropy(),
    };
    let mut out: BufWriter<io::StdoutLock> = BufWriter::new(io::stdout().lock());

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut attempts: usize = 0;
    let mut fallbacks: usize = 0;
    let mut serpentines: usize = 0;
    for i in 0..args.count {
        debug!("Level {i}");
        let (level, path): (Level, Path) =
            generator.generate_with_solution(rows, cols, args.difficulty);
        total += generator.stats.duration;
        max = max.max(generator.stats.duration);
        attempts += generator.stats.attempts;
        if generator.stats.fallback {
            fallbacks += 1;
        }
        if generator.stats.serpentine {
            serpentines += 1;
        }

        if args.json {
            let printed: JsonLevel = JsonLevel {
                level: &level,
                solution: args.solution.then_some(path.get()),
            };
            serde_json::to_writer(&mut out, &printed)?;
            writeln!(out)?;
        } else {
            let draw: Draw = Draw::new(&level);
            writeln!(
                out,
                "{} ({} clues, {} walls)",
                level.id,
                level.max_number(),
                level.walls.len()
            )?;
            write!(out, "{}", draw.level(&level))?;
            if args.solution {
                write!(out, "{}", draw.path(&level, &path))?;
            }
            writeln!(out)?;
        }
    }
    out.flush()?;

    // Print some stats
    if args.summary && args.count > 0 {
        eprintln!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}
         fallbacks = {}
serpentine fallbacks = {}",
            total,
            total / args.count as f32,
            max,
            attempts as f32 / args.count as f32,
            fallbacks,
            serpentines
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::level_generator::MAX_OVERRUNS;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let args = Args::try_parse_from([
            "pathkudo", "-r", "4", "--cols", "5", "-f", "hard", "-j",
        ])
        .expect("valid arguments");
        assert_eq!((args.rows, args.cols), (4, 5));
        assert_eq!(args.difficulty, Difficulty::Hard);
        assert!(args.json);
        assert!(!args.play);
        assert_eq!(args.name, "player");
    }

    #[test]
    fn test_grid_size_is_bounded() {
        assert!(Args::try_parse_from(["pathkudo", "-r", "0"]).is_err());
        assert!(Args::try_parse_from(["pathkudo", "--cols", "9"]).is_err());
        assert!(Args::try_parse_from(["pathkudo", "-r", "8", "--cols", "8"]).is_ok());
    }

    #[test]
    fn test_largest_grid_is_generated_in_bounded_time() {
        let side: usize = MAX_SIDE.into();
        for seed in [0, 1, 4] {
            let mut generator = LevelGenerator::from_seed(seed);
            let (level, path) = generator.generate_with_solution(side, side, Difficulty::Hard);
            assert_eq!(level.check(), Ok(()));
            assert_eq!(path.len(), side * side);
            assert!(generator.stats.overruns <= MAX_OVERRUNS + 1);
            assert!(
                generator.stats.duration < 60.0,
                "seed {seed}: {}s",
                generator.stats.duration
            );
        }
    }

    #[test]
    fn test_json_level_with_solution() {
        let (level, path) =
            LevelGenerator::from_seed(3).generate_with_solution(2, 2, Difficulty::Easy);
        let printed = JsonLevel {
            level: &level,
            solution: Some(path.get()),
        };
        let value: serde_json::Value = serde_json::to_value(&printed).expect("serialized");
        assert_eq!(value["rows"], 2);
        assert_eq!(value["id"], level.id.as_str());
        assert_eq!(value["solution"].as_array().map(Vec::len), Some(4));

        let without = JsonLevel {
            level: &level,
            solution: None,
        };
        let value: serde_json::Value = serde_json::to_value(&without).expect("serialized");
        assert!(value.get("solution").is_none());
    }
}
