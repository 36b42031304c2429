//! Board representation and the pure win/draw evaluation.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Number of cells on the 3x3 board.
pub const CELL_COUNT: usize = 9;

/// Every line that wins the game: diagonals, then columns, then rows.
pub const LINES: [[usize; 3]; 8] = [
    [0, 4, 8],
    [2, 4, 6],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
];

/// Mark placed by a side on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Mark {
    /// The side that opens the game.
    #[serde(rename = "x")]
    X,
    /// The side that always answers `x`.
    #[serde(rename = "0")]
    Zero,
}

impl Mark {
    /// Wire representation used in board maps and request payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Mark::X => "x",
            Mark::Zero => "0",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is neither `x` nor `0`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type {0}")]
pub struct InvalidMark(pub String);

impl FromStr for Mark {
    type Err = InvalidMark;

    /// Parse a mark, ignoring case so `X` is accepted as `x`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "x" => Ok(Mark::X),
            "0" => Ok(Mark::Zero),
            _ => Err(InvalidMark(value.to_owned())),
        }
    }
}

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Moves are still possible and nobody has won.
    InProgress,
    /// The game is over; `winner` is `None` on a draw.
    Finished {
        /// Side that completed a line, if any.
        winner: Option<Mark>,
    },
}

/// Errors raised while decoding the string map stored for a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardDecodeError {
    /// The map does not hold one entry per cell.
    #[error("board must have exactly {CELL_COUNT} cells (got {0})")]
    CellCount(usize),
    /// A key is not a cell index.
    #[error("unknown board cell `{0}`")]
    UnknownCell(String),
    /// A cell holds something other than `""`, `x` or `0`.
    #[error("invalid mark `{value}` in cell {cell}")]
    InvalidMark {
        /// Offending cell index.
        cell: usize,
        /// Raw stored value.
        value: String,
    },
}

/// Fixed 3x3 board, indexed row by row from 0 to 8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Mark>; CELL_COUNT],
}

impl Board {
    /// Board with every cell empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mark stored at `position`, or `None` for an empty cell or an index off the board.
    pub fn get(&self, position: usize) -> Option<Mark> {
        self.cells.get(position).copied().flatten()
    }

    /// Whether `position` is on the board and holds a mark.
    pub fn is_occupied(&self, position: usize) -> bool {
        self.get(position).is_some()
    }

    /// Place `mark` on `position`. Callers check occupancy and bounds first.
    pub fn place(&mut self, position: usize, mark: Mark) {
        if let Some(cell) = self.cells.get_mut(position) {
            *cell = Some(mark);
        }
    }

    /// True when no mark has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// True when all nine cells hold a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Evaluate the board: the first complete line wins, a full board without one is a draw.
    pub fn evaluate(&self) -> Outcome {
        for line in LINES {
            let Some(first) = self.cells[line[0]] else {
                continue;
            };
            if line.iter().all(|&index| self.cells[index] == Some(first)) {
                return Outcome::Finished {
                    winner: Some(first),
                };
            }
        }

        if self.is_full() {
            Outcome::Finished { winner: None }
        } else {
            Outcome::InProgress
        }
    }

    /// Encode the board as the `"0".."8" -> "" | "x" | "0"` map used on the wire and in storage.
    pub fn to_info(&self) -> BTreeMap<String, String> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let value = cell.map(Mark::as_str).unwrap_or_default();
                (index.to_string(), value.to_owned())
            })
            .collect()
    }

    /// Decode the string map back into a board, rejecting anything but the nine known cells.
    pub fn from_info(info: &BTreeMap<String, String>) -> Result<Self, BoardDecodeError> {
        if info.len() != CELL_COUNT {
            return Err(BoardDecodeError::CellCount(info.len()));
        }

        let mut board = Self::empty();
        for (key, value) in info {
            let cell = key
                .parse::<usize>()
                .ok()
                .filter(|cell| *cell < CELL_COUNT)
                .ok_or_else(|| BoardDecodeError::UnknownCell(key.clone()))?;

            if value.is_empty() {
                continue;
            }

            let mark = match value.as_str() {
                "x" => Mark::X,
                "0" => Mark::Zero,
                _ => {
                    return Err(BoardDecodeError::InvalidMark {
                        cell,
                        value: value.clone(),
                    });
                }
            };
            board.cells[cell] = Some(mark);
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(layout: &str) -> Board {
        let mut board = Board::empty();
        for (index, c) in layout.chars().filter(|c| !c.is_whitespace()).enumerate() {
            match c {
                'x' => board.place(index, Mark::X),
                'o' => board.place(index, Mark::Zero),
                _ => {}
            }
        }
        board
    }

    #[test]
    fn empty_board_is_in_progress() {
        assert_eq!(Board::empty().evaluate(), Outcome::InProgress);
    }

    #[test]
    fn every_line_wins_for_either_mark() {
        for mark in [Mark::X, Mark::Zero] {
            for line in LINES {
                let mut board = Board::empty();
                for index in line {
                    board.place(index, mark);
                }
                assert_eq!(
                    board.evaluate(),
                    Outcome::Finished { winner: Some(mark) },
                    "line {line:?} for {mark}"
                );
            }
        }
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let board = board(
            "x o x
             x o o
             o x x",
        );
        assert_eq!(board.evaluate(), Outcome::Finished { winner: None });
    }

    #[test]
    fn full_board_with_line_reports_winner() {
        let board = board(
            "x o x
             o x o
             o x x",
        );
        assert_eq!(
            board.evaluate(),
            Outcome::Finished {
                winner: Some(Mark::X)
            }
        );
    }

    #[test]
    fn mixed_line_does_not_win() {
        let board = board(
            "x x o
             . . .
             . . .",
        );
        assert_eq!(board.evaluate(), Outcome::InProgress);
    }

    #[test]
    fn info_map_has_nine_string_keys() {
        let mut board = Board::empty();
        board.place(4, Mark::X);
        board.place(8, Mark::Zero);

        let info = board.to_info();
        assert_eq!(info.len(), CELL_COUNT);
        assert_eq!(info["0"], "");
        assert_eq!(info["4"], "x");
        assert_eq!(info["8"], "0");
        assert_eq!(Board::from_info(&info), Ok(board));
    }

    #[test]
    fn from_info_rejects_malformed_maps() {
        let mut info = Board::empty().to_info();
        info.remove("3");
        assert_eq!(Board::from_info(&info), Err(BoardDecodeError::CellCount(8)));

        let mut info = Board::empty().to_info();
        info.remove("3");
        info.insert("9".into(), String::new());
        assert_eq!(
            Board::from_info(&info),
            Err(BoardDecodeError::UnknownCell("9".into()))
        );

        let mut info = Board::empty().to_info();
        info.insert("2".into(), "y".into());
        assert_eq!(
            Board::from_info(&info),
            Err(BoardDecodeError::InvalidMark {
                cell: 2,
                value: "y".into()
            })
        );
    }

    #[test]
    fn mark_parsing_ignores_case() {
        assert_eq!("X".parse::<Mark>(), Ok(Mark::X));
        assert_eq!("x".parse::<Mark>(), Ok(Mark::X));
        assert_eq!("0".parse::<Mark>(), Ok(Mark::Zero));
        assert_eq!("o".parse::<Mark>(), Err(InvalidMark("o".into())));
    }
}
