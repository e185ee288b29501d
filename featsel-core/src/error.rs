//! Error types for the featsel-core crate.
//!
//! Search and evaluation are infallible once a [`Dataset`](crate::Dataset)
//! exists; everything that touches the filesystem or user input returns a
//! [`SelectionError`].

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for feature selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Malformed dataset at line {line}: {reason}")]
    MalformedDataset { line: usize, reason: String },

    #[error("Ragged row at line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Dataset contains no instances")]
    EmptyDataset,

    #[error("Failed to open dataset {path}: {source}")]
    DatasetOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SelectionError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDataset {
            line,
            reason: reason.into(),
        }
    }

    pub fn invalid_choice(msg: impl Into<String>) -> Self {
        Self::InvalidChoice(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SelectionError>;
