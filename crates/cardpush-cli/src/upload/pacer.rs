//! Batching upload loop

use crate::carddav::{ContactWriter, Credentials};
use crate::error::{CliError, Result};
use crate::ids::Item;
use crate::observer::ImportObserver;
use crate::upload::{Cooldown, RunState};
use std::time::Duration;

/// Uploads per batch when nothing else is configured
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Seconds of cooldown between batches when nothing else is configured
pub const DEFAULT_BATCH_TIMEOUT_SECS: f64 = 0.0;

/// Pacing options for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadOptions {
    batch_size: usize,
    batch_timeout: Duration,
    start_index: usize,
}

impl UploadOptions {
    /// Validate and build options
    ///
    /// `batch_size` must be positive and `batch_timeout_secs` a finite,
    /// non-negative number of seconds.
    pub fn new(batch_size: usize, batch_timeout_secs: f64, start_index: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(CliError::config("batch size must be greater than zero"));
        }
        let batch_timeout = Duration::try_from_secs_f64(batch_timeout_secs).map_err(|_| {
            CliError::config(format!(
                "batch timeout must be a non-negative number of seconds, got {}",
                batch_timeout_secs
            ))
        })?;

        Ok(Self {
            batch_size,
            batch_timeout,
            start_index,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn batch_timeout(&self) -> Duration {
        self.batch_timeout
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_timeout: Duration::ZERO,
            start_index: 0,
        }
    }
}

/// Outcome of a fully successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadSummary {
    /// Items in the list, including skipped leading ones
    pub total: usize,
    pub start_index: usize,
    pub uploaded: usize,
    /// Batch boundaries crossed
    pub cooldowns: usize,
}

/// Sequential, fail-fast upload loop
pub struct Pacer<'a> {
    writer: &'a dyn ContactWriter,
    cooldown: &'a dyn Cooldown,
    observer: &'a dyn ImportObserver,
}

impl<'a> Pacer<'a> {
    pub fn new(
        writer: &'a dyn ContactWriter,
        cooldown: &'a dyn Cooldown,
        observer: &'a dyn ImportObserver,
    ) -> Self {
        Self {
            writer,
            cooldown,
            observer,
        }
    }

    /// Upload `items[start_index..]` in order
    ///
    /// After every `batch_size` uploads the next upload is preceded by a
    /// cooldown. The first error is returned as is and nothing after the
    /// failing item is attempted.
    pub async fn run(
        &self,
        items: &[Item],
        credentials: &Credentials,
        options: &UploadOptions,
    ) -> Result<UploadSummary> {
        let total = items.len();
        let mut summary = UploadSummary {
            total,
            start_index: options.start_index(),
            ..UploadSummary::default()
        };
        let mut since_pause = 0usize;
        let mut state = RunState::Uploading(options.start_index());

        while let RunState::Uploading(index) = state {
            self.observer.state_changed(&state);

            if index >= total {
                state = RunState::Done;
                break;
            }

            if let Err(err) = self
                .upload_one(items, index, credentials, options, &mut since_pause, &mut summary)
                .await
            {
                state = RunState::Failed(index);
                self.observer.state_changed(&state);
                self.observer.upload_failed(index, total, &err);
                return Err(err);
            }

            state = RunState::Uploading(index + 1);
        }

        self.observer.state_changed(&state);
        self.observer.finished(&summary);
        Ok(summary)
    }

    async fn upload_one(
        &self,
        items: &[Item],
        index: usize,
        credentials: &Credentials,
        options: &UploadOptions,
        since_pause: &mut usize,
        summary: &mut UploadSummary,
    ) -> Result<()> {
        if self.cooldown.is_cancelled() {
            return Err(CliError::Cancelled);
        }

        if *since_pause == options.batch_size() {
            self.observer.cooldown_started(options.batch_timeout(), index);
            self.cooldown.wait(options.batch_timeout()).await?;
            summary.cooldowns += 1;
            *since_pause = 0;
        }

        let total = items.len();
        self.observer.upload_started(index, total);
        self.writer
            .upload(&items[index], credentials, index, total)
            .await?;

        *since_pause += 1;
        summary.uploaded += 1;
        self.observer.upload_succeeded(index, total);
        Ok(())
    }
}
