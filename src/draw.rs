/*
draw.rs

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

//! Draw puzzle components as text.
//!
//! The grid is framed with `+`, `-`, and `|` characters. A wall is drawn as a border between
//! the two cells it separates. Row and column numbers are printed around the grid so that the
//! player can type the coordinates of the cells.
//!
//! In game states:
//!
//! * `.` is a cell that the path does not visit.
//! * `o` is a cell that the path visits and `@` is the head of the path.
//! * A clue prints its number, followed by `*` once the path visits it, or preceded by `@` if it
//!   is the head of the path.

use log::trace;
use std::fmt::Write;

use crate::game_state::GameState;
use crate::generator::level::{Coordinate, Level, Orientation, Wall};
use crate::generator::path::Path;

/// Draw object that is used to draw the puzzle components.
#[derive(Debug)]
pub struct Draw {
    /// Number of characters inside a cell.
    cell_width: usize,

    /// Number of characters for the row numbers.
    label_width: usize,
}

/// Number of decimal digits of the given number.
fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

impl Draw {
    /// Create a [`Draw`] object for the given level.
    pub fn new(level: &Level) -> Self {
        Self {
            // The widest content is a number with a marker, plus a space on each side
            cell_width: digits(level.total_cells()) + 2,
            label_width: digits(level.rows.saturating_sub(1)),
        }
    }

    /// Draw the grid, asking `content` for the text of each cell.
    fn grid<F>(&self, level: &Level, content: F) -> String
    where
        F: Fn(Coordinate) -> String,
    {
        let w: usize = self.cell_width;
        let lw: usize = self.label_width;
        let mut out: String = String::new();

        // Column numbers
        let mut line: String = format!("{:lw$} ", "");
        for col in 0..level.cols {
            let _ = write!(line, "{col:^w$} ");
        }
        out.push_str(line.trim_end());
        out.push('\n');

        let segment: String = format!("{}+", "-".repeat(w));
        let border: String = format!("{:lw$}+{}", "", segment.repeat(level.cols));
        out.push_str(&border);
        out.push('\n');

        for row in 0..level.rows {
            let mut line: String = format!("{row:>lw$}|");
            for col in 0..level.cols {
                let _ = write!(line, "{:^w$}", content(Coordinate::new(row, col)));
                let closed: bool = col + 1 == level.cols
                    || level
                        .walls
                        .contains(&Wall::new(row, col, Orientation::Vertical));
                line.push(if closed { '|' } else { ' ' });
            }
            out.push_str(line.trim_end());
            out.push('\n');

            if row + 1 == level.rows {
                break;
            }
            let mut line: String = format!("{:lw$}+", "");
            for col in 0..level.cols {
                let side: &str = if level
                    .walls
                    .contains(&Wall::new(row, col, Orientation::Horizontal))
                {
                    "-"
                } else {
                    " "
                };
                let _ = write!(line, "{}+", side.repeat(w));
            }
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&border);
        out.push('\n');
        trace!("Grid drawn:\n{out}");
        out
    }

    /// Draw the level with its clues and walls.
    pub fn level(&self, level: &Level) -> String {
        self.grid(level, |cell| match level.clue_at(cell) {
            Some(clue) => clue.value.to_string(),
            None => String::from("."),
        })
    }

    /// Draw the level with the player path.
    pub fn state(&self, state: &GameState) -> String {
        let head: Option<Coordinate> = state.head();
        self.grid(state.level(), |cell| {
            let Some(status) = state.cell(cell) else {
                return String::new();
            };
            let is_head: bool = head == Some(cell);
            match (status.value, status.visited_order.is_some()) {
                (Some(v), _) if is_head => format!("@{v}"),
                (Some(v), true) => format!("{v}*"),
                (Some(v), false) => v.to_string(),
                (None, _) if is_head => String::from("@"),
                (None, true) => String::from("o"),
                (None, false) => String::from("."),
            }
        })
    }

    /// Draw the order in which the given path visits the cells.
    pub fn path(&self, level: &Level, path: &Path) -> String {
        self.grid(level, |cell| match path.cell_index(cell) {
            Some(i) => (i + 1).to_string(),
            None => String::from("."),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::level::Clue;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn level_2x2() -> Level {
        Level {
            id: String::from("test"),
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
                    col: 1,
                    value: 2,
                },
            ],
            walls: BTreeSet::from([Wall::new(0, 0, Orientation::Vertical)]),
        }
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(144), 3);
    }

    #[test]
    fn test_draw_level() {
        let level = level_2x2();
        let expected = "   0   1
 +---+---+
0| 1 | . |
 +   +   +
1| .   2 |
 +---+---+
";
        assert_eq!(Draw::new(&level).level(&level), expected);
    }

    #[test]
    fn test_draw_state() {
        let level = level_2x2();
        let draw = Draw::new(&level);
        let state = GameState::initialize(Arc::new(level)).apply_move(Coordinate::new(1, 0));
        let expected = "   0   1
 +---+---+
0|1* | . |
 +   +   +
1| @   2 |
 +---+---+
";
        assert_eq!(draw.state(&state), expected);
    }

    #[test]
    fn test_draw_path() {
        let mut level = level_2x2();
        level.walls.clear();
        level.walls.insert(Wall::new(0, 1, Orientation::Horizontal));
        let path = Path::from_vec(&[
            Coordinate::new(0, 1),
            Coordinate::new(0, 0),
            Coordinate::new(1, 0),
            Coordinate::new(1, 1),
        ]);
        let expected = "   0   1
 +---+---+
0| 2   1 |
 +   +---+
1| 3   4 |
 +---+---+
";
        assert_eq!(Draw::new(&level).path(&level, &path), expected);
    }
}
