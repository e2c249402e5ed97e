use thiserror::Error;

use crate::point::Point;

/// Failures a puzzle unit can report. Every one of them aborts the unit.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("input is empty")]
    EmptyInput,

    /// `line` is one-based.
    #[error("malformed input on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("unexpected cell {cell:?} at {at}")]
    UnexpectedCell { cell: char, at: Point },

    #[error("goal is unreachable")]
    NoPath,

    #[error("impossible state: {0}")]
    Impossible(String),
}

impl PuzzleError {
    pub fn malformed(line_index: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line: line_index + 1,
            reason: reason.into(),
        }
    }
}
