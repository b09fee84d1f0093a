//! `cardpush` import command
//!
//! Reads a vCard file, derives an identifier per record, and uploads the
//! selected records one by one.

use crate::carddav::{CardDavClient, ContactWriter, Credentials};
use crate::config::ImportConfig;
use crate::error::{CliError, Result};
use crate::ids::{self, Item};
use crate::observer::ImportObserver;
use crate::upload::{Cooldown, Pacer, RunState, UploadSummary};
use crate::vcard;
use colored::Colorize;
use std::path::PathBuf;

/// Everything one import run needs
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub file: PathBuf,
    /// Bare host or base URL of the CardDAV server
    pub server: String,
    pub credentials: Credentials,
    pub config: ImportConfig,
    /// Stop after identifier generation and list the planned uploads
    pub dry_run: bool,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Uploaded(UploadSummary),
    /// Dry run; holds the items that would have been uploaded
    Planned(Vec<Item>),
}

/// Extract, identify and select items from file text
///
/// Identifiers and collisions cover every block; the selection policy is
/// applied afterwards.
pub fn prepare(text: &str, config: &ImportConfig, observer: &dyn ImportObserver) -> Result<Vec<Item>> {
    let blocks = vcard::split_records(text);
    let found = blocks.len();
    let with_email = blocks.iter().filter(|b| vcard::has_email(b)).count();

    observer.state_changed(&RunState::GeneratingIds);
    let items = match ids::generate_all_with(blocks, config.digest, observer) {
        Ok(items) => items,
        Err(err) => {
            if let CliError::Collision { second, .. } = &err {
                observer.state_changed(&RunState::Failed(second - 1));
            }
            return Err(err);
        },
    };

    let selected = config.selection.apply(items);
    observer.records_selected(selected.len(), with_email, found);
    Ok(selected)
}

/// Run an import against the server named in the request
pub async fn run(
    request: &ImportRequest,
    cooldown: &dyn Cooldown,
    observer: &dyn ImportObserver,
) -> Result<ImportOutcome> {
    let client = CardDavClient::new(&request.server, request.config.http_timeout())?;
    run_with_writer(request, &client, cooldown, observer).await
}

/// [`run`] with an explicit writer
pub async fn run_with_writer(
    request: &ImportRequest,
    writer: &dyn ContactWriter,
    cooldown: &dyn Cooldown,
    observer: &dyn ImportObserver,
) -> Result<ImportOutcome> {
    // Bad options fail before the file is touched.
    let options = request.config.upload_options()?;

    observer.state_changed(&RunState::NotStarted);
    observer.state_changed(&RunState::Extracting);
    let text = tokio::fs::read_to_string(&request.file).await?;
    let items = prepare(&text, &request.config, observer)?;

    if request.dry_run {
        print_plan(&items, options.start_index());
        return Ok(ImportOutcome::Planned(items));
    }

    let summary = Pacer::new(writer, cooldown, observer)
        .run(&items, &request.credentials, &options)
        .await?;

    println!(
        "{} {} contact(s) uploaded ({} skipped, {} cooldown(s))",
        "✓".green().bold(),
        summary.uploaded,
        summary.start_index.min(summary.total),
        summary.cooldowns
    );

    Ok(ImportOutcome::Uploaded(summary))
}

fn print_plan(items: &[Item], start_index: usize) {
    for (index, item) in items.iter().enumerate().skip(start_index) {
        println!("{}\t{}", index + 1, item.id);
    }
    println!(
        "{} {} contact(s) would be uploaded",
        "→".cyan(),
        items.len().saturating_sub(start_index)
    );
}
