//! Notification sounds for note navigation.
//!
//! Classifies host navigation events (tab switches, opened notes, followed
//! links, daily-note jumps, created notes, checkbox toggles) and plays a short
//! cue from a built-in or user-supplied sound pool.

pub mod host;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod plugin;
pub mod sound;

pub use host::{CollectingNotifier, LogNotifier, Notifier};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{parse_category, CategoryParseError, SoundCategory};
pub use model::settings::{clamp_volume, Settings, SettingsError};
pub use navigation::classifier::{is_daily_note_command, NavigationCause, NavigationClassifier};
pub use navigation::events::{
    ActiveLeafChange, ClickEvent, ElementInfo, FileCreated, HostEvent, LeafId,
};
pub use navigation::timer::{Clock, ManualClock, SystemClock, TimerId, TimerQueue};
pub use plugin::{Cue, CueTrigger, PageFlipSounds};
pub use sound::builtin::BuiltinPools;
pub use sound::loader::{
    load_custom_sounds, FsVault, LoadOutcome, SoundVault, VaultEntry, VaultError,
};
pub use sound::player::{AudioSink, NullSink, PlaybackError, SoundPlayer};
#[cfg(feature = "rodio-output")]
pub use sound::player::RodioSink;
pub use sound::resource::{ResourceError, SoundResource};
pub use sound::store::{CustomSoundSet, SelectionPolicy, SoundStore};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
