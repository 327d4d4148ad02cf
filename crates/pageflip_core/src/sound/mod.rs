//! Sound pools, custom sound loading and playback.
//!
//! # Responsibility
//! - Resolve a category to one concrete playable resource.
//! - Load user-supplied sound sets from a vault folder.
//! - Hand resolved resources to a platform audio sink.
//!
//! # Invariants
//! - A non-empty custom pool always wins over the built-in pool.
//! - Playback failures never propagate to callers.

pub mod builtin;
pub mod loader;
pub mod player;
pub mod resource;
pub mod store;
