//! Common error types for the LLM calculator

use thiserror::Error;

/// Common result type for LLM calculator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the library and the leaderboard service
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error (cache file, benchmark CSVs)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON payload could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input data (e.g. a CSV without a required column)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required data source was not available
    #[error("Missing source: {0}")]
    MissingSource(String),
}
