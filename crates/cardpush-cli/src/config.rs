//! Configuration for an import run
//!
//! Values are resolved in three layers: built-in defaults, then `CARDPUSH_*`
//! environment variables, then command-line flags.

use crate::error::{CliError, Result};
use crate::selection::UploadSelection;
use crate::upload::pacer::{DEFAULT_BATCH_SIZE, DEFAULT_BATCH_TIMEOUT_SECS};
use crate::upload::UploadOptions;
use cardpush_common::digest::DigestAlgorithm;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Per-request HTTP timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// CardDAV server used when neither `--server` nor `CARDPUSH_SERVER` is set
pub const DEFAULT_SERVER: &str = "localhost";

/// Tunables of an import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Uploads between two cooldowns
    pub batch_size: usize,

    /// Cooldown length in seconds
    pub batch_timeout_secs: f64,

    /// 0-based index of the first item to upload
    pub start_index: usize,

    pub selection: UploadSelection,

    /// Digest behind the contact identifiers
    pub digest: DigestAlgorithm,

    pub http_timeout_secs: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_timeout_secs: DEFAULT_BATCH_TIMEOUT_SECS,
            start_index: 0,
            selection: UploadSelection::default(),
            digest: DigestAlgorithm::default(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl ImportConfig {
    /// Defaults overridden by environment variables
    ///
    /// Environment variables:
    /// - `CARDPUSH_BATCH_SIZE`
    /// - `CARDPUSH_BATCH_TIMEOUT` (seconds, fractions allowed)
    /// - `CARDPUSH_START_INDEX`
    /// - `CARDPUSH_SELECT` (all, complete, with-email)
    /// - `CARDPUSH_DIGEST` (sha256, sha512, blake3)
    /// - `CARDPUSH_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = env_var("CARDPUSH_BATCH_SIZE")? {
            config.batch_size = v;
        }
        if let Some(v) = env_var("CARDPUSH_BATCH_TIMEOUT")? {
            config.batch_timeout_secs = v;
        }
        if let Some(v) = env_var("CARDPUSH_START_INDEX")? {
            config.start_index = v;
        }
        if let Some(v) = env_var("CARDPUSH_SELECT")? {
            config.selection = v;
        }
        if let Some(v) = env_var("CARDPUSH_DIGEST")? {
            config.digest = v;
        }
        if let Some(v) = env_var("CARDPUSH_TIMEOUT_SECS")? {
            config.http_timeout_secs = v;
        }

        Ok(config)
    }

    /// Validated pacing options
    pub fn upload_options(&self) -> Result<UploadOptions> {
        UploadOptions::new(self.batch_size, self.batch_timeout_secs, self.start_index)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn env_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| CliError::config(format!("invalid {}='{}': {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}
