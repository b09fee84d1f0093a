//! cardpush CLI library
//!
//! Bulk-imports a vCard file into a CardDAV address book, one `PUT` per
//! contact.
//!
//! # Pipeline
//!
//! - **Extraction** ([`vcard`]): cut the file at every `END:VCARD`
//! - **Identifiers** ([`ids`]): content-addressed id per record, collisions are fatal
//! - **Selection** ([`selection`]): choose which records are uploaded
//! - **Upload** ([`upload`]): sequential, batched, fail-fast loop
//! - **Remote writer** ([`carddav`]): one authenticated `PUT` per record

pub mod carddav;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod observer;
pub mod progress;
pub mod selection;
pub mod upload;
pub mod vcard;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use ids::Item;

use cardpush_common::digest::DigestAlgorithm;
use clap::Parser;
use config::ImportConfig;
use selection::UploadSelection;
use std::path::PathBuf;

/// cardpush - import a vCard file into a CardDAV address book
#[derive(Parser, Debug)]
#[command(name = "cardpush")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Account email; also the address-book path segment
    #[arg(short, long, env = "CARDPUSH_EMAIL")]
    pub email: String,

    /// Account password
    #[arg(short, long, env = "CARDPUSH_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// vCard file to import
    #[arg(short, long)]
    pub file: PathBuf,

    /// CardDAV server, as a host name or http(s) URL
    #[arg(short, long, env = "CARDPUSH_SERVER", default_value = config::DEFAULT_SERVER)]
    pub server: String,

    /// Uploads per batch [default: 1000]
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Cooldown between batches, in seconds [default: 0]
    #[arg(long, value_name = "SECONDS")]
    pub batch_timeout: Option<f64>,

    /// 0-based index of the first contact to upload, to resume a failed run
    #[arg(long)]
    pub start_index: Option<usize>,

    /// Which records to upload [default: complete]
    #[arg(long, value_enum)]
    pub select: Option<UploadSelection>,

    /// Digest used for contact identifiers (sha256, sha512, blake3) [default: sha256]
    #[arg(long)]
    pub digest: Option<DigestAlgorithm>,

    /// Per-request HTTP timeout, in seconds [default: 30]
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// List the planned uploads without contacting the server
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Overlay the flags that were given on top of `config`
    pub fn apply_to(&self, config: &mut ImportConfig) {
        if let Some(v) = self.batch_size {
            config.batch_size = v;
        }
        if let Some(v) = self.batch_timeout {
            config.batch_timeout_secs = v;
        }
        if let Some(v) = self.start_index {
            config.start_index = v;
        }
        if let Some(v) = self.select {
            config.selection = v;
        }
        if let Some(v) = self.digest {
            config.digest = v;
        }
        if let Some(v) = self.timeout {
            config.http_timeout_secs = v;
        }
    }
}
