//! Navigation event classification.
//!
//! # Responsibility
//! - Model the host event feed (file creation, active pane changes, clicks,
//!   command execution).
//! - Decide which cue, if any, one active-view change should produce.
//! - Expire short-lived cause flags through cancellable delayed tasks.
//!
//! # Invariants
//! - All state is owned by one classifier instance and mutated from one thread.
//! - Consuming or re-arming a flag cancels its pending expiry.

pub mod classifier;
pub mod events;
pub mod timer;
