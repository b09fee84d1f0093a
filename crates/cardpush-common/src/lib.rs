//! cardpush common library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared utilities for the cardpush workspace.
//!
//! - **Logging**: subscriber setup driven by [`logging::LogConfig`]
//! - **Digests**: stable hex digests used for content-addressed identifiers
//!
//! # Example
//!
//! ```
//! use cardpush_common::digest::{digest_bytes, DigestAlgorithm};
//!
//! let hex = digest_bytes(b"BEGIN:VCARD\r\nEND:VCARD", DigestAlgorithm::Sha256);
//! assert_eq!(hex.len(), 64);
//! ```

pub mod digest;
pub mod error;
pub mod logging;

pub use error::{CommonError, Result};
