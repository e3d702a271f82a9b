//! Error types for the amalgamation domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Every variant is fatal:
//! nothing is recovered and no partial document is ever emitted.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all amalgamation operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Input files ---
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    // --- Manifest configuration ---
    #[error("Guard identifier {guard} derived from both '{first}' and '{second}'")]
    GuardCollision {
        guard: String,
        first: String,
        second: String,
    },

    // --- Include rules ---
    #[error("Include rule '{pattern}' matched but capture group {group} is absent in line: {line}")]
    MalformedRule {
        pattern: String,
        group: usize,
        line: String,
    },

    #[error("Invalid include rule '{pattern}': {reason}")]
    InvalidRule { pattern: String, reason: String },

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Output ---
    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O failure on an input file.
    pub fn read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
