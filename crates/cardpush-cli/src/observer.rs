//! Import progress reporting
//!
//! Core components never log progress themselves. They report to an
//! [`ImportObserver`] handed in by the caller, which decides whether the
//! events become log lines, a progress bar, or nothing at all.

use crate::error::CliError;
use crate::progress;
use crate::upload::{RunState, UploadSummary};
use indicatif::ProgressBar;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Receives progress events from an import run
///
/// Every method defaults to doing nothing. Indices are 0-based.
pub trait ImportObserver: Send + Sync {
    fn state_changed(&self, _state: &RunState) {}

    /// Record blocks found in the input file
    fn records_found(&self, _count: usize) {}

    /// Informational counts after the selection policy ran
    fn records_selected(&self, _selected: usize, _with_email: usize, _found: usize) {}

    fn upload_started(&self, _index: usize, _total: usize) {}

    fn upload_succeeded(&self, _index: usize, _total: usize) {}

    /// A batch boundary was reached before uploading `_next_index`
    fn cooldown_started(&self, _duration: Duration, _next_index: usize) {}

    fn upload_failed(&self, _index: usize, _total: usize, _error: &CliError) {}

    /// Every item was uploaded
    fn finished(&self, _summary: &UploadSummary) {}
}

/// Ignores every event
pub struct NoopObserver;

impl ImportObserver for NoopObserver {}

/// Turns events into `tracing` records
pub struct TracingObserver;

impl ImportObserver for TracingObserver {
    fn state_changed(&self, state: &RunState) {
        trace!(%state, "Import state changed");
    }

    fn records_found(&self, count: usize) {
        info!(count, "Found contact records");
    }

    fn records_selected(&self, selected: usize, with_email: usize, found: usize) {
        info!(selected, with_email, found, "Selected contacts for upload");
    }

    fn upload_started(&self, index: usize, total: usize) {
        info!("Uploading {} of {}", index + 1, total);
    }

    fn upload_succeeded(&self, index: usize, total: usize) {
        debug!(order = index + 1, total, "Contact created");
    }

    fn cooldown_started(&self, duration: Duration, next_index: usize) {
        info!(
            next = next_index + 1,
            cooldown = %progress::format_duration(duration),
            "Batch complete, cooling down"
        );
    }

    fn upload_failed(&self, index: usize, total: usize, error: &CliError) {
        warn!(order = index + 1, total, error = %error, "Upload aborted");
    }

    fn finished(&self, summary: &UploadSummary) {
        info!(uploaded = summary.uploaded, cooldowns = summary.cooldowns, "All done");
    }
}

/// Draws an upload progress bar and forwards events to [`TracingObserver`]
#[derive(Default)]
pub struct ProgressObserver {
    spinner: OnceLock<ProgressBar>,
    bar: OnceLock<ProgressBar>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_spinner(&self) {
        if let Some(spinner) = self.spinner.get().filter(|s| !s.is_finished()) {
            spinner.finish_and_clear();
        }
    }

    fn bar(&self, index: usize, total: usize) -> &ProgressBar {
        self.bar.get_or_init(|| {
            let pb = progress::create_upload_progress(total as u64, "Uploading contacts");
            pb.set_position(index as u64);
            pb
        })
    }
}

impl ImportObserver for ProgressObserver {
    fn state_changed(&self, state: &RunState) {
        match state {
            RunState::Extracting | RunState::GeneratingIds => {
                self.spinner
                    .get_or_init(|| progress::create_spinner("Reading contacts..."))
                    .set_message(format!("{}...", state));
            },
            state if state.is_terminal() => {
                self.clear_spinner();
                // `Done` is followed by `finished`, which closes the bar itself.
                if let RunState::Failed(_) = state {
                    if let Some(pb) = self.bar.get().filter(|pb| !pb.is_finished()) {
                        pb.abandon();
                    }
                }
            },
            _ => self.clear_spinner(),
        }
        TracingObserver.state_changed(state);
    }

    fn records_found(&self, count: usize) {
        TracingObserver.records_found(count);
    }

    fn records_selected(&self, selected: usize, with_email: usize, found: usize) {
        self.clear_spinner();
        TracingObserver.records_selected(selected, with_email, found);
    }

    fn upload_started(&self, index: usize, total: usize) {
        self.bar(index, total).set_message(format!("Uploading {} of {}", index + 1, total));
    }

    fn upload_succeeded(&self, index: usize, total: usize) {
        self.bar(index, total).set_position(index as u64 + 1);
    }

    fn cooldown_started(&self, duration: Duration, next_index: usize) {
        if let Some(pb) = self.bar.get() {
            pb.set_message(format!(
                "Cooling down for {} before #{}",
                progress::format_duration(duration),
                next_index + 1
            ));
        }
        TracingObserver.cooldown_started(duration, next_index);
    }

    fn upload_failed(&self, index: usize, total: usize, error: &CliError) {
        if let Some(pb) = self.bar.get() {
            pb.abandon_with_message(format!("Failed at {} of {}", index + 1, total));
        }
        TracingObserver.upload_failed(index, total, error);
    }

    fn finished(&self, summary: &UploadSummary) {
        if let Some(pb) = self.bar.get() {
            pb.finish_with_message("All done");
        }
        TracingObserver.finished(summary);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_observer_tracks_position() {
        let observer = ProgressObserver::new();
        observer.upload_started(4, 10);
        observer.upload_succeeded(4, 10);
        observer.upload_started(5, 10);
        observer.upload_succeeded(5, 10);

        let pb = observer.bar.get().unwrap();
        assert_eq!(pb.length(), Some(10));
        assert_eq!(pb.position(), 6);

        observer.finished(&UploadSummary {
            total: 10,
            start_index: 4,
            uploaded: 2,
            cooldowns: 0,
        });
        assert!(pb.is_finished());
    }

    #[test]
    fn test_spinner_cleared_once_uploads_start() {
        let observer = ProgressObserver::new();
        observer.state_changed(&RunState::Extracting);
        observer.state_changed(&RunState::GeneratingIds);
        assert!(!observer.spinner.get().unwrap().is_finished());

        observer.state_changed(&RunState::Uploading(0));
        assert!(observer.spinner.get().unwrap().is_finished());
    }

    #[test]
    fn test_spinner_cleared_when_records_selected() {
        let observer = ProgressObserver::new();
        observer.state_changed(&RunState::Extracting);
        observer.records_selected(2, 1, 3);
        assert!(observer.spinner.get().unwrap().is_finished());
        assert!(observer.bar.get().is_none());
    }

    #[test]
    fn test_failed_state_stops_spinner_and_bar() {
        let observer = ProgressObserver::new();
        observer.state_changed(&RunState::GeneratingIds);
        observer.state_changed(&RunState::Failed(2));
        assert!(observer.spinner.get().unwrap().is_finished());

        let observer = ProgressObserver::new();
        observer.upload_started(0, 3);
        observer.state_changed(&RunState::Failed(0));
        assert!(observer.bar.get().unwrap().is_finished());
    }

    #[test]
    fn test_progress_observer_without_uploads_has_no_bar() {
        let observer = ProgressObserver::new();
        observer.finished(&UploadSummary::default());
        assert!(observer.bar.get().is_none());
    }
}
