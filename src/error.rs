//! Error types for the bonsai club API.

use thiserror::Error;

/// Common error type for the bonsai club API.
#[derive(Error, Debug)]
pub enum BonsaiError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input or configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Mail transport setup error.
    #[error("mail error: {0}")]
    Mail(String),
}

/// Result type alias for bonsai club API operations.
pub type Result<T> = std::result::Result<T, BonsaiError>;
