//! Error types for `distmat`.
//!
//! Every failure of a conversion is fatal: the first error aborts the run and
//! nothing is written to the output path.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for `distmat` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting, saving or loading a record.
///
/// Error codes follow the pattern `DISTMAT-XXX`.
#[derive(Error, Debug)]
pub enum Error {
    /// Input file missing or unreadable (DISTMAT-001).
    #[error("[DISTMAT-001] Cannot open input '{}': {source}", .path.display())]
    InputOpen {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Read failure after the input was opened (DISTMAT-002).
    #[error("[DISTMAT-002] Failed to read input '{}': {source}", .path.display())]
    Read {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O error (includes invalid UTF-8).
        #[source]
        source: std::io::Error,
    },

    /// A line violates the `int int float` contract (DISTMAT-003).
    #[error("[DISTMAT-003] Malformed line {line} ({content:?}): {fault}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// Raw line text, without the line terminator.
        content: String,
        /// What is wrong with the line.
        fault: LineFault,
    },

    /// Output path not writable (DISTMAT-004).
    #[error("[DISTMAT-004] Cannot write output '{}': {source}", .path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding failure (DISTMAT-005).
    #[error("[DISTMAT-005] Serialization error: {0}")]
    Serialization(String),

    /// Loaded bytes are not a valid record (DISTMAT-006).
    #[error("[DISTMAT-006] Corrupted record: {0}")]
    CorruptedRecord(String),

    /// Record columns of unequal length (DISTMAT-007).
    #[error(
        "[DISTMAT-007] Misaligned columns: {rows} row indices, {cols} column indices, {distances} distances"
    )]
    MisalignedColumns {
        /// Length of the row index column.
        rows: usize,
        /// Length of the column index column.
        cols: usize,
        /// Length of the distance column.
        distances: usize,
    },

    /// Configuration error (DISTMAT-008).
    #[error("[DISTMAT-008] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "DISTMAT-003").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InputOpen { .. } => "DISTMAT-001",
            Self::Read { .. } => "DISTMAT-002",
            Self::MalformedLine { .. } => "DISTMAT-003",
            Self::Write { .. } => "DISTMAT-004",
            Self::Serialization(_) => "DISTMAT-005",
            Self::CorruptedRecord(_) => "DISTMAT-006",
            Self::MisalignedColumns { .. } => "DISTMAT-007",
            Self::Config(_) => "DISTMAT-008",
        }
    }

    /// Returns the line fault if this is a [`Error::MalformedLine`].
    #[must_use]
    pub fn line_fault(&self) -> Option<&LineFault> {
        match self {
            Self::MalformedLine { fault, .. } => Some(fault),
            _ => None,
        }
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Reason a single input line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineFault {
    /// Fewer than three fields.
    #[error("expected 3 space-separated fields, found {found}")]
    MissingFields {
        /// Number of fields present.
        found: usize,
    },

    /// More than three fields while strict field counting is on.
    #[error("expected exactly 3 fields, found {found}")]
    ExtraFields {
        /// Number of fields present.
        found: usize,
    },

    /// Field 0 is not an integer.
    #[error("invalid row index: {0}")]
    InvalidRowIndex(ParseIntError),

    /// Field 1 is not an integer.
    #[error("invalid column index: {0}")]
    InvalidColIndex(ParseIntError),

    /// Field 2 is not a floating-point number.
    #[error("invalid distance: {0}")]
    InvalidDistance(ParseFloatError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
