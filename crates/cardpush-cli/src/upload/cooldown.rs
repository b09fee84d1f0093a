//! Cooldown between batches
//!
//! The pacer only talks to the [`Cooldown`] trait so tests can swap the
//! wall-clock timer for a recording fake.

use crate::error::{CliError, Result};
use async_trait::async_trait;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::warn;

/// Pause between batches
#[async_trait]
pub trait Cooldown: Send + Sync {
    /// Wait for `duration`; a zero duration returns immediately
    async fn wait(&self, duration: Duration) -> Result<()>;

    /// Whether the run should stop before its next upload
    fn is_cancelled(&self) -> bool {
        false
    }
}

#[derive(Default)]
struct Shared {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Tokio timer that can be cancelled from another task
#[derive(Default)]
pub struct TimerCooldown {
    shared: Arc<Shared>,
}

/// Cancels a [`TimerCooldown`]
#[derive(Clone)]
pub struct CooldownHandle {
    shared: Arc<Shared>,
}

impl TimerCooldown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> CooldownHandle {
        CooldownHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl CooldownHandle {
    /// Stop any running wait and every later one
    pub fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::SeqCst);
        self.shared.notify.notify_waiters();
    }
}

/// Cancel the run on the first interrupt and return on the second
///
/// Returns `true` once a second interrupt arrives, telling the caller to
/// exit without waiting for the request in flight. Returns `false` if the
/// signal source fails.
pub async fn watch_interrupts<S, F>(handle: CooldownHandle, mut next_interrupt: S) -> bool
where
    S: FnMut() -> F,
    F: Future<Output = std::io::Result<()>>,
{
    if next_interrupt().await.is_err() {
        return false;
    }
    warn!("Interrupted, stopping before the next upload (press Ctrl-C again to exit now)");
    handle.cancel();

    if next_interrupt().await.is_err() {
        return false;
    }
    warn!("Interrupted again, exiting");
    true
}

#[async_trait]
impl Cooldown for TimerCooldown {
    async fn wait(&self, duration: Duration) -> Result<()> {
        let notified = self.shared.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent cancel is not lost.
        notified.as_mut().enable();

        if self.is_cancelled() {
            return Err(CliError::Cancelled);
        }
        if duration.is_zero() {
            return Ok(());
        }

        tokio::select! {
            _ = tokio::time::sleep(duration) => Ok(()),
            _ = notified => Err(CliError::Cancelled),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::SeqCst)
    }
}
