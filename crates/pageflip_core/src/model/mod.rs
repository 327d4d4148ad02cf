//! Domain model for notification cues.
//!
//! # Responsibility
//! - Define the fixed sound categories and their stable string ids.
//! - Define the flat settings record owned by the host persistence layer.
//!
//! # Invariants
//! - Category ids double as custom-sound subfolder names.
//! - Settings defaults are applied field-by-field when a record is partial.

pub mod category;
pub mod settings;
