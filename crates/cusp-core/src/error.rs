//! Error types for cusp

use thiserror::Error;

/// The main error type for cusp operations
#[derive(Debug, Error)]
pub enum CuspError {
    #[error("Tooth not found: {0}")]
    ToothNotFound(String),

    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for cusp operations
pub type Result<T> = std::result::Result<T, CuspError>;

