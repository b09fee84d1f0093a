//! Paced, sequential upload of generated items
//!
//! Items go out strictly one at a time, in index order. Every `batch_size`
//! uploads the loop pauses for the configured cooldown. The first failure
//! ends the run.

pub mod cooldown;
pub mod pacer;
pub mod state;

pub use cooldown::{watch_interrupts, Cooldown, CooldownHandle, TimerCooldown};
pub use pacer::{Pacer, UploadOptions, UploadSummary};
pub use state::RunState;
