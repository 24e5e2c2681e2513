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

//! Persist the scoreboards.
//!
//! The ledger holds one board per difficulty level and is stored as `highscores.json` in the
//! data directory. A save writes a temporary file first and then renames it over the ledger,
//! so that an interrupted save leaves the previous boards in place.

use log::{debug, info};
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::highscores::HighScores;

/// Ledger file and its temporary copy.
pub struct SaverHighScores {
    /// Absolute path to the ledger.
    save_file: PathBuf,

    /// File written during a save, before it replaces the ledger.
    tmp_file: PathBuf,
}

impl SaverHighScores {
    /// Create a [`SaverHighScores`] object for the ledger in the `data_dir` directory.
    pub fn new(data_dir: PathBuf) -> Self {
        let save_file: PathBuf = data_dir.join("highscores.json");
        let tmp_file: PathBuf = data_dir.join("highscores.json.tmp");
        debug!("High scores file: {save_file:?}");
        Self {
            save_file,
            tmp_file,
        }
    }

    /// Read the scoreboards.
    ///
    /// Return None if no score was ever saved.
    pub fn get_highscores(&self) -> Result<Option<HighScores>, Box<dyn Error>> {
        let reader: BufReader<File> = match File::open(&self.save_file) {
            Ok(f) => BufReader::new(f),
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(Box::new(error)),
        };
        Ok(Some(serde_json::from_reader(reader)?))
    }

    /// Read the scoreboards, or return empty boards if no score was ever saved.
    pub fn load_or_default(&self) -> Result<HighScores, Box<dyn Error>> {
        Ok(self.get_highscores()?.unwrap_or_default())
    }

    /// Replace the ledger with the given scoreboards.
    pub fn save_highscores(&self, highscores: &HighScores) -> Result<(), Box<dyn Error>> {
        let mut writer: BufWriter<File> = BufWriter::new(File::create(&self.tmp_file)?);
        serde_json::to_writer(&mut writer, highscores)?;
        writer.flush()?;
        drop(writer);
        fs::rename(&self.tmp_file, &self.save_file)?;
        debug!("High scores saved to {:?}", self.save_file);
        Ok(())
    }

    /// Delete the ledger and any leftover temporary file.
    pub fn delete_save(&self) {
        if fs::remove_file(&self.save_file).is_ok() {
            info!("High scores deleted");
        }
        let _ = fs::remove_file(&self.tmp_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::Difficulty;
    use crate::highscores::ScoreLedger;
    use std::time::Duration;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let saver = SaverHighScores::new(dir.path().to_path_buf());
        assert!(saver.get_highscores().expect("no error").is_none());
        assert!(saver.load_or_default().expect("no error").is_empty());
    }

    #[test]
    fn test_save_and_restore() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let saver = SaverHighScores::new(dir.path().to_path_buf());
        let mut scores = HighScores::new();
        scores.record(Difficulty::Hard, Duration::from_millis(61_250), "ann");
        saver.save_highscores(&scores).expect("saved");

        let restored = saver.get_highscores().expect("no error").expect("file exists");
        assert_eq!(
            restored.get_score(Difficulty::Hard),
            scores.get_score(Difficulty::Hard)
        );

        saver.delete_save();
        assert!(saver.get_highscores().expect("no error").is_none());
    }

    #[test]
    fn test_save_replaces_the_previous_ledger() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let saver = SaverHighScores::new(dir.path().to_path_buf());
        let mut scores = HighScores::new();
        scores.record(Difficulty::Easy, Duration::from_secs(90), "ann");
        saver.save_highscores(&scores).expect("saved");
        scores.record(Difficulty::Easy, Duration::from_secs(45), "bob");
        saver.save_highscores(&scores).expect("saved");

        assert!(!dir.path().join("highscores.json.tmp").exists());
        let restored = saver.load_or_default().expect("no error");
        assert_eq!(restored.best_time(Difficulty::Easy), Some(Duration::from_secs(45)));
        assert_eq!(restored.get_score(Difficulty::Easy).map(|b| b.len()), Some(2));

        // A leftover from an interrupted save does not hide the ledger
        std::fs::write(dir.path().join("highscores.json.tmp"), "{trunc").expect("written");
        assert!(saver.get_highscores().expect("no error").is_some());
        saver.delete_save();
        assert!(!dir.path().join("highscores.json.tmp").exists());
        assert!(saver.get_highscores().expect("no error").is_none());
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temporary directory");
        std::fs::write(dir.path().join("highscores.json"), "{not json").expect("written");
        let saver = SaverHighScores::new(dir.path().to_path_buf());
        assert!(saver.get_highscores().is_err());
    }
}
