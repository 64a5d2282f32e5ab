//! Plain-text notation for ladder diagrams.
//!
//! One rung per line, cells separated by whitespace. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! # Y0 = X0 AND NOT X1
//! L  NO0  NC1  OUT0  R
//! ```
//!
//! | Token | Cell |
//! |-------|------|
//! | `.` | empty |
//! | `-` | horizontal wire |
//! | `\|` | vertical wire |
//! | `+` | junction |
//! | `L` / `R` | left / right rail |
//! | `NO<n>` / `NC<n>` | normally-open / normally-closed contact on input `n` |
//! | `OUT<n>` | coil driving output `n` |
//! | `SET<n>` / `RST<n>` | latch / unlatch coil for output `n` |
//!
//! Indices are decimal `u8`. Values at or past [`MAX_IO`](crate::MAX_IO)
//! parse fine and stay inert in the engine.
//!
//! A diagram with no rows or no columns formats as empty text, which parses
//! back as [`NotationError::Empty`]. Every other diagram round-trips.

use std::fmt;
use std::str::FromStr;

use crate::cell::{Cell, IoIndex};
use crate::diagram::Diagram;

/// Errors from parsing diagram notation. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// A token matched no cell kind.
    UnknownToken {
        line: usize,
        column: usize,
        token: String,
    },
    /// A contact/coil token carried a missing or non-`u8` index.
    InvalidIndex {
        line: usize,
        column: usize,
        token: String,
    },
    /// A rung had a different number of cells than the first rung.
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// More rungs or columns than a diagram can hold.
    TooLarge,
    /// No rungs at all.
    Empty,
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownToken {
                line,
                column,
                token,
            } => write!(f, "{line}:{column}: unknown cell '{token}'"),
            Self::InvalidIndex {
                line,
                column,
                token,
            } => write!(f, "{line}:{column}: invalid I/O index in '{token}'"),
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(f, "{line}: expected {expected} cells, found {found}"),
            Self::TooLarge => write!(f, "diagram exceeds {} rows or columns", u16::MAX),
            Self::Empty => write!(f, "diagram has no rungs"),
        }
    }
}

impl std::error::Error for NotationError {}

const INDEXED: [(&str, fn(IoIndex) -> Cell); 5] = [
    ("OUT", Cell::Coil),
    ("SET", Cell::CoilLatch),
    ("RST", Cell::CoilUnlatch),
    ("NO", Cell::ContactNo),
    ("NC", Cell::ContactNc),
];

/// Parse a single cell token.
pub fn parse_cell(token: &str) -> Result<Cell, NotationError> {
    parse_token(token, 1, 1)
}

fn parse_token(token: &str, line: usize, column: usize) -> Result<Cell, NotationError> {
    let fixed = match token {
        "." => Some(Cell::Empty),
        "-" => Some(Cell::WireH),
        "|" => Some(Cell::WireV),
        "+" => Some(Cell::Junction),
        "L" => Some(Cell::RailLeft),
        "R" => Some(Cell::RailRight),
        _ => None,
    };
    if let Some(cell) = fixed {
        return Ok(cell);
    }

    for (prefix, make) in INDEXED {
        if let Some(digits) = token.strip_prefix(prefix) {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(NotationError::InvalidIndex {
                    line,
                    column,
                    token: token.to_string(),
                });
            }
            return digits
                .parse::<IoIndex>()
                .map(make)
                .map_err(|_| NotationError::InvalidIndex {
                    line,
                    column,
                    token: token.to_string(),
                });
        }
    }

    Err(NotationError::UnknownToken {
        line,
        column,
        token: token.to_string(),
    })
}

/// Token for a cell; the inverse of [`parse_cell`].
#[must_use]
pub fn cell_token(cell: Cell) -> String {
    match cell {
        Cell::Empty => ".".to_string(),
        Cell::WireH => "-".to_string(),
        Cell::WireV => "|".to_string(),
        Cell::Junction => "+".to_string(),
        Cell::RailLeft => "L".to_string(),
        Cell::RailRight => "R".to_string(),
        Cell::ContactNo(i) => format!("NO{i}"),
        Cell::ContactNc(i) => format!("NC{i}"),
        Cell::Coil(i) => format!("OUT{i}"),
        Cell::CoilLatch(i) => format!("SET{i}"),
        Cell::CoilUnlatch(i) => format!("RST{i}"),
    }
}

/// Parse a whole diagram.
pub fn parse(text: &str) -> Result<Diagram, NotationError> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut width: Option<usize> = None;

    for (line_idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line_no = line_idx + 1;
        let row = trimmed
            .split_whitespace()
            .enumerate()
            .map(|(col, token)| parse_token(token, line_no, col + 1))
            .collect::<Result<Vec<_>, _>>()?;

        match width {
            None => width = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(NotationError::RaggedRow {
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(NotationError::Empty);
    }
    Diagram::from_rows(rows).ok_or(NotationError::TooLarge)
}

/// Render a diagram in notation form, one rung per line.
#[must_use]
pub fn format(diagram: &Diagram) -> String {
    diagram.to_string()
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width() == 0 || self.height() == 0 {
            return Ok(());
        }
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(&cell_token(*cell))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Diagram {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
