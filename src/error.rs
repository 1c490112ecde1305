//! Error types for testreport

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for testreport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for testreport
#[derive(Error, Debug)]
pub enum Error {
    /// An input line could not be decoded as a test event.
    #[error("Failed to decode event on line {line}: {source}")]
    Decode {
        /// 1-based number of the offending input line.
        line: usize,
        /// Underlying JSON decode error.
        source: serde_json::Error,
    },

    /// The event sequence was empty, so no report can be produced.
    #[error("No test events in input")]
    EmptyInput,

    /// The page layout template could not be obtained.
    #[error("Layout template unavailable at {path}: {reason}")]
    LayoutUnavailable {
        /// Path the layout was expected at.
        path: PathBuf,
        /// Why the layout could not be read.
        reason: String,
    },

    /// Substituting report data into the layout failed.
    #[error("Template error: {0}")]
    Template(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
