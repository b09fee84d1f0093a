//! Content-addressed contact identifiers
//!
//! An identifier is a fixed prefix plus the hex digest of the record text.
//! Identical text always maps to the same identifier, so re-running an
//! interrupted import overwrites the same remote resources instead of
//! creating duplicates.

use crate::error::{CliError, Result};
use crate::observer::ImportObserver;
use cardpush_common::digest::{digest_bytes, DigestAlgorithm};
use std::collections::HashMap;

/// Prefix of every generated identifier
pub const ID_PREFIX: &str = "vcard-";

/// A record ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Path-safe identifier, unique within one run
    pub id: String,
    /// Raw record text, sent as the request body
    pub text: String,
}

/// Identifier for `text` using SHA-256
pub fn generate_id(text: &str) -> String {
    generate_id_with(DigestAlgorithm::Sha256, text)
}

/// Identifier for `text` using the given digest
///
/// `=` never survives into the identifier; it is replaced by `-` so the
/// value is always usable as a URL path segment.
pub fn generate_id_with(algorithm: DigestAlgorithm, text: &str) -> String {
    format!("{}{}", ID_PREFIX, digest_bytes(text.as_bytes(), algorithm)).replace('=', "-")
}

/// Assign identifiers to all blocks, failing on the first collision
pub fn generate_all(blocks: Vec<String>, observer: &dyn ImportObserver) -> Result<Vec<Item>> {
    generate_all_with(blocks, DigestAlgorithm::Sha256, observer)
}

/// [`generate_all`] with an explicit digest algorithm
pub fn generate_all_with(
    blocks: Vec<String>,
    algorithm: DigestAlgorithm,
    observer: &dyn ImportObserver,
) -> Result<Vec<Item>> {
    observer.records_found(blocks.len());

    // id -> 1-based position of the block that produced it
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(blocks.len());
    let mut items = Vec::with_capacity(blocks.len());

    for (index, text) in blocks.into_iter().enumerate() {
        let id = generate_id_with(algorithm, &text);

        if let Some(&first) = seen.get(&id) {
            return Err(CliError::Collision {
                id,
                first,
                second: index + 1,
            });
        }

        seen.insert(id.clone(), index + 1);
        items.push(Item { id, text });
    }

    Ok(items)
}
