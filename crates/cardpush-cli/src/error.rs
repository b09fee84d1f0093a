//! Error types for the cardpush CLI
//!
//! Every variant is user-facing: messages name what failed and, where it
//! helps, how to resume.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for an import run
#[derive(Error, Debug)]
pub enum CliError {
    /// Two input records map to the same identifier
    #[error("Identifier collision: records #{first} and #{second} both map to '{id}'. Remove the duplicate record from the input file and run again.")]
    Collision {
        id: String,
        first: usize,
        second: usize,
    },

    /// The server answered something other than 201 Created
    #[error("Upload of contact #{order} of {total} was rejected with HTTP {status}: {body}. Re-run with --start-index {resume} after fixing the cause.", resume = .order - 1)]
    UploadRejected {
        order: usize,
        total: usize,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connect error, timeout, ...)
    #[error("Upload of contact #{order} of {total} failed: {source}. Re-run with --start-index {resume} once the server is reachable.", resume = .order - 1)]
    UploadTransport {
        order: usize,
        total: usize,
        #[source]
        source: reqwest::Error,
    },

    /// File system operation failed
    #[error("File operation failed: {0}. Check that the file exists and is readable.")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your command-line flags and CARDPUSH_* environment variables.")]
    Config(String),

    /// The run was interrupted during a cooldown
    #[error("Import cancelled")]
    Cancelled,
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 1-based position of the failing contact, for upload failures
    pub fn order(&self) -> Option<usize> {
        match self {
            Self::UploadRejected { order, .. } | Self::UploadTransport { order, .. } => Some(*order),
            _ => None,
        }
    }
}
