//! Which generated items are uploaded
//!
//! Identifiers are generated, and collisions checked, for every record block
//! in the file. The selection policy then decides which of those items go to
//! the server.

use crate::error::CliError;
use crate::ids::Item;
use crate::vcard;
use serde::{Deserialize, Serialize};

/// Upload selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UploadSelection {
    /// Every extracted block, including a trailing partial one
    All,
    /// Blocks that contain `BEGIN:VCARD`
    #[default]
    Complete,
    /// Complete blocks that carry an `EMAIL` property
    WithEmail,
}

impl UploadSelection {
    /// Whether a record with this text is uploaded
    pub fn accepts(self, text: &str) -> bool {
        match self {
            UploadSelection::All => true,
            UploadSelection::Complete => vcard::is_complete(text),
            UploadSelection::WithEmail => vcard::is_complete(text) && vcard::has_email(text),
        }
    }

    /// Keep the accepted items, in order
    pub fn apply(self, items: Vec<Item>) -> Vec<Item> {
        items.into_iter().filter(|item| self.accepts(&item.text)).collect()
    }
}

impl std::str::FromStr for UploadSelection {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(UploadSelection::All),
            "complete" => Ok(UploadSelection::Complete),
            "with-email" | "with_email" | "email" => Ok(UploadSelection::WithEmail),
            other => Err(CliError::config(format!(
                "unknown selection '{}' (expected all, complete or with-email)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for UploadSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadSelection::All => write!(f, "all"),
            UploadSelection::Complete => write!(f, "complete"),
            UploadSelection::WithEmail => write!(f, "with-email"),
        }
    }
}
