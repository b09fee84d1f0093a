//! CardDAV remote writer
//!
//! One `PUT` per contact, authenticated with HTTP Basic auth. The only
//! accepted answer is `201 Created`.

pub mod auth;
pub mod client;
pub mod endpoints;

pub use auth::Credentials;
pub use client::CardDavClient;

use crate::error::Result;
use crate::ids::Item;
use async_trait::async_trait;

/// Writes a single contact to the address book
///
/// `index` is the 0-based position of `item` in the run and `count` the
/// number of items in the run; both only feed error reporting.
#[async_trait]
pub trait ContactWriter: Send + Sync {
    async fn upload(&self, item: &Item, credentials: &Credentials, index: usize, count: usize) -> Result<()>;
}
