//! Error types shared across cardpush crates

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, CommonError>;

/// Errors raised by the common utilities
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),
}
