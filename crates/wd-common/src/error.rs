//! Error types for Defender Check.

use thiserror::Error;

/// Result type alias for Defender Check operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Defender Check.
///
/// Inside the evaluator nothing is fatal: missing fields and unparseable
/// values degrade to per-field `unknown` findings. These variants cover the
/// edges only (parameter loading, input I/O, serialization).
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid check parameters: {0}")]
    InvalidParams(String),

    // Section errors (20-29)
    #[error("agent section error: {0}")]
    Section(String),

    #[error("agent produced no data")]
    NoData,

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidParams(_) => 11,
            Error::Section(_) => 20,
            Error::NoData => 21,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}
