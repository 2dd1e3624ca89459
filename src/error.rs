//! Error types for randr-toggle
//!
//! Parsing the display tool's output never fails, so this stays small.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Display query failed: {0}")]
    QueryFailed(String),

    #[error("Underlying I/O error")]
    IOError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unable to set up logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
