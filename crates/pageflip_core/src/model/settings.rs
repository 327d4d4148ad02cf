//! Flat settings record for notification cues.
//!
//! # Responsibility
//! - Mirror the persisted settings object field-for-field (camelCase JSON).
//! - Fill absent fields with defaults on load.
//! - Read/write the record as pretty JSON for hosts without their own store.
//!
//! # Invariants
//! - Deserialization never fails because a field is missing.
//! - `volume` may be stored out of range; consumers use `clamped_volume`.
//! - An empty `custom_sounds_folder` means custom sounds are disabled.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default playback volume.
pub const DEFAULT_VOLUME: f32 = 0.5;

/// User-facing settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Master toggle for every cue.
    pub enabled: bool,
    /// Global volume in `[0, 1]`.
    pub volume: f32,
    pub on_open_note: bool,
    pub on_create_note: bool,
    pub on_switch_tab: bool,
    pub on_internal_link: bool,
    pub on_daily_note: bool,
    pub on_checkbox: bool,
    /// Vault-relative folder holding `page-flip/`, `new-note/`, `checkbox/`.
    pub custom_sounds_folder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: DEFAULT_VOLUME,
            on_open_note: true,
            on_create_note: true,
            on_switch_tab: true,
            on_internal_link: true,
            on_daily_note: true,
            on_checkbox: true,
            custom_sounds_folder: String::new(),
        }
    }
}

impl Settings {
    /// Parses a settings object, defaulting every absent field.
    pub fn from_json_str(raw: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(raw).map_err(SettingsError::Parse)
    }

    /// Loads settings from disk. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_json_str(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source: err,
            }),
        }
    }

    /// Persists settings as pretty JSON.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        let raw = serde_json::to_string_pretty(self).map_err(SettingsError::Parse)?;
        std::fs::write(path, raw).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Volume clamped to `[0, 1]`; NaN collapses to silence.
    pub fn clamped_volume(&self) -> f32 {
        clamp_volume(self.volume)
    }

    /// Trimmed custom folder, `None` when custom sounds are disabled.
    pub fn custom_folder(&self) -> Option<&str> {
        let trimmed = self.custom_sounds_folder.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Clamps a volume scalar into `[0, 1]`.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Settings load/save errors.
#[derive(Debug)]
pub enum SettingsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "settings file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid settings json: {err}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_volume, Settings, SettingsError};

    #[test]
    fn partial_record_takes_defaults_for_missing_fields() {
        let settings = Settings::from_json_str(r#"{"volume":0.8,"onSwitchTab":false}"#)
            .expect("partial settings parse");
        assert!(settings.enabled);
        assert_eq!(settings.volume, 0.8);
        assert!(!settings.on_switch_tab);
        assert!(settings.on_open_note);
        assert_eq!(settings.custom_sounds_folder, "");
    }

    #[test]
    fn empty_object_equals_defaults() {
        let settings = Settings::from_json_str("{}").expect("empty object parses");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let settings =
            Settings::from_json_str(r#"{"legacyField":1,"enabled":false}"#).expect("parse");
        assert!(!settings.enabled);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Settings::from_json_str("{not json").expect_err("must fail");
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(Settings::default()).expect("serialize");
        assert_eq!(json["customSoundsFolder"], "");
        assert_eq!(json["onDailyNote"], true);
        assert_eq!(json["onCheckbox"], true);
    }

    #[test]
    fn volume_is_clamped() {
        assert_eq!(clamp_volume(-0.3), 0.0);
        assert_eq!(clamp_volume(1.7), 1.0);
        assert_eq!(clamp_volume(0.25), 0.25);
        assert_eq!(clamp_volume(f32::NAN), 0.0);
    }

    #[test]
    fn custom_folder_is_trimmed_and_blank_means_disabled() {
        let mut settings = Settings::default();
        settings.custom_sounds_folder = "   ".to_string();
        assert_eq!(settings.custom_folder(), None);
        settings.custom_sounds_folder = " assets/sounds ".to_string();
        assert_eq!(settings.custom_folder(), Some("assets/sounds"));
    }

    #[test]
    fn load_missing_file_yields_defaults_and_save_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.json");
        assert_eq!(
            Settings::load_from_path(&path).expect("missing file"),
            Settings::default()
        );

        let mut settings = Settings::default();
        settings.volume = 0.3;
        settings.custom_sounds_folder = "sounds".to_string();
        settings.save_to_path(&path).expect("save");
        assert_eq!(Settings::load_from_path(&path).expect("reload"), settings);
    }
}
