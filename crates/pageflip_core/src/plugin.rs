//! Plugin facade: lifecycle, event routing and settings.
//!
//! # Responsibility
//! - Own the single navigation classifier, sound store and player.
//! - Gate every cue on the master toggle and the per-trigger toggle.
//! - Reload or clear custom sounds when the folder setting changes.
//!
//! # Invariants
//! - With `enabled == false`, view changes do not update pane/file tracking
//!   and clicks/commands arm no flags.
//! - Previews ignore every toggle.
//! - `unload` leaves no pending timers and no custom set behind.

use crate::host::Notifier;
use crate::model::category::SoundCategory;
use crate::model::settings::Settings;
use crate::navigation::classifier::{NavigationCause, NavigationClassifier};
use crate::navigation::events::{ActiveLeafChange, ClickEvent, FileCreated, HostEvent};
use crate::navigation::timer::Clock;
use crate::sound::loader::{load_custom_sounds, LoadOutcome, SoundVault};
use crate::sound::player::{AudioSink, SoundPlayer};
use crate::sound::resource::SoundResource;
use crate::sound::store::SoundStore;
use log::{debug, info};

/// What triggered one cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueTrigger {
    Navigation(NavigationCause),
    Checkbox,
}

/// One cue that passed its gates and was sent to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    pub category: SoundCategory,
    pub trigger: CueTrigger,
}

/// Notification-sound plugin instance.
pub struct PageFlipSounds {
    settings: Settings,
    store: SoundStore,
    player: SoundPlayer,
    classifier: NavigationClassifier,
    vault: Box<dyn SoundVault>,
    notifier: Box<dyn Notifier>,
}

impl PageFlipSounds {
    /// Creates an instance with bundled sounds and the system clock.
    pub fn new(
        settings: Settings,
        vault: Box<dyn SoundVault>,
        sink: Box<dyn AudioSink>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            store: SoundStore::default(),
            player: SoundPlayer::new(sink),
            classifier: NavigationClassifier::default(),
            vault,
            notifier,
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.classifier = NavigationClassifier::new(clock);
        self
    }

    pub fn with_store(mut self, store: SoundStore) -> Self {
        self.store = store;
        self
    }

    /// Starts the plugin: loads custom sounds when a folder is configured.
    pub fn load(&mut self) -> Option<LoadOutcome> {
        info!(
            "event=plugin_load module=plugin status=ok enabled={} custom_folder={}",
            self.settings.enabled,
            self.settings.custom_folder().is_some()
        );
        let folder = self.settings.custom_folder()?.to_string();
        Some(self.load_custom(&folder))
    }

    /// Stops the plugin: cancels timers, forgets navigation state and drops
    /// the custom set.
    pub fn unload(&mut self) {
        self.classifier.reset();
        self.store.clear_custom();
        info!("event=plugin_unload module=plugin status=ok");
    }

    /// Routes one host event.
    pub fn handle_event(&mut self, event: &HostEvent) -> Option<Cue> {
        match event {
            HostEvent::FileCreated(created) => {
                self.handle_file_created(created);
                None
            }
            HostEvent::ActiveLeafChange(change) => self.handle_active_leaf_change(change),
            HostEvent::Click(click) => self.handle_click(click),
            HostEvent::Command { command_id } => {
                self.handle_command(command_id);
                None
            }
            HostEvent::CheckboxToggled => self.handle_checkbox_toggled(),
        }
    }

    /// Tracks created markdown files for the new-note cue.
    pub fn handle_file_created(&mut self, event: &FileCreated) {
        if self.classifier.note_file_created(event) {
            debug!("event=file_created module=plugin status=ok path={}", event.path);
        }
    }

    pub fn handle_active_leaf_change(&mut self, change: &ActiveLeafChange) -> Option<Cue> {
        if !self.settings.enabled {
            return None;
        }
        let cause = self
            .classifier
            .classify_with(change, self.settings.on_switch_tab)?;
        if !cause_enabled(&self.settings, cause) {
            debug!(
                "event=cue module=plugin status=skip reason=toggle_off cause={}",
                cause.as_str()
            );
            return None;
        }
        Some(self.fire(cause.category(), CueTrigger::Navigation(cause)))
    }

    /// Capture-phase click: arms the internal-link flag or plays the
    /// checkbox cue.
    pub fn handle_click(&mut self, click: &ClickEvent) -> Option<Cue> {
        if !self.settings.enabled {
            return None;
        }
        if click.hits_internal_link() {
            self.classifier.arm_internal_link();
            return None;
        }
        if click.hits_task_checkbox() {
            return self.handle_checkbox_toggled();
        }
        None
    }

    /// Observes one executed command.
    pub fn handle_command(&mut self, command_id: &str) {
        if self.settings.enabled && self.classifier.note_command(command_id) {
            debug!("event=command module=plugin status=ok command_id={command_id}");
        }
    }

    pub fn handle_checkbox_toggled(&mut self) -> Option<Cue> {
        if !self.settings.enabled || !self.settings.on_checkbox {
            return None;
        }
        Some(self.fire(SoundCategory::Checkbox, CueTrigger::Checkbox))
    }

    /// Expires due flags; hosts call this from their event loop.
    pub fn tick(&mut self) {
        self.classifier.tick();
    }

    /// Plays one sound from `category` regardless of toggles.
    pub fn preview(&mut self, category: SoundCategory) -> Option<SoundResource> {
        self.player
            .play(&mut self.store, category, self.settings.volume)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Applies edited settings. The custom folder is trimmed, then loaded,
    /// served from cache, or cleared.
    pub fn update_settings(&mut self, mut settings: Settings) -> LoadOutcome {
        settings.custom_sounds_folder = settings.custom_sounds_folder.trim().to_string();
        self.settings = settings;
        let folder = self.settings.custom_sounds_folder.clone();
        self.load_custom(&folder)
    }

    /// Restores defaults and invalidates the custom set.
    pub fn reset_settings(&mut self) {
        self.settings = Settings::default();
        self.store.clear_custom();
        info!("event=settings_reset module=plugin status=ok");
    }

    pub fn store(&self) -> &SoundStore {
        &self.store
    }

    pub fn classifier(&self) -> &NavigationClassifier {
        &self.classifier
    }

    fn load_custom(&mut self, folder: &str) -> LoadOutcome {
        load_custom_sounds(
            self.vault.as_ref(),
            &mut self.store,
            folder,
            self.notifier.as_ref(),
        )
    }

    fn fire(&mut self, category: SoundCategory, trigger: CueTrigger) -> Cue {
        let played = self
            .player
            .play(&mut self.store, category, self.settings.volume)
            .is_some();
        debug!("event=cue module=plugin status=ok category={category} played={played}");
        Cue { category, trigger }
    }
}

fn cause_enabled(settings: &Settings, cause: NavigationCause) -> bool {
    match cause {
        NavigationCause::CreatedNote => settings.on_create_note,
        NavigationCause::DailyNote => settings.on_daily_note,
        NavigationCause::InternalLink => settings.on_internal_link,
        NavigationCause::TabSwitch => settings.on_switch_tab,
        NavigationCause::OpenNote => settings.on_open_note,
    }
}

#[cfg(test)]
mod tests {
    use super::cause_enabled;
    use crate::model::settings::Settings;
    use crate::navigation::classifier::NavigationCause;

    #[test]
    fn each_cause_has_its_own_toggle() {
        let mut settings = Settings::default();
        settings.on_switch_tab = false;
        settings.on_daily_note = false;
        assert!(!cause_enabled(&settings, NavigationCause::TabSwitch));
        assert!(!cause_enabled(&settings, NavigationCause::DailyNote));
        assert!(cause_enabled(&settings, NavigationCause::OpenNote));
        assert!(cause_enabled(&settings, NavigationCause::InternalLink));
        assert!(cause_enabled(&settings, NavigationCause::CreatedNote));
    }
}
