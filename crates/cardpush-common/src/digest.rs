//! Content digests
//!
//! Hashes text or byte content into lowercase hex strings. Used to derive
//! content-addressed identifiers, so output must be stable across runs and
//! platforms.

use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha512,
    Blake3,
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
            DigestAlgorithm::Sha512 => write!(f, "sha512"),
            DigestAlgorithm::Blake3 => write!(f, "blake3"),
        }
    }
}

impl std::str::FromStr for DigestAlgorithm {
    type Err = CommonError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "sha512" | "sha-512" => Ok(DigestAlgorithm::Sha512),
            "blake3" => Ok(DigestAlgorithm::Blake3),
            other => Err(CommonError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Hex digest of an in-memory buffer
pub fn digest_bytes(data: &[u8], algorithm: DigestAlgorithm) -> String {
    match algorithm {
        DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
        DigestAlgorithm::Sha512 => hex::encode(Sha512::digest(data)),
        DigestAlgorithm::Blake3 => blake3::hash(data).to_hex().to_string(),
    }
}
