//! Active-view change classifier.
//!
//! # Responsibility
//! - Track the last focused pane and file.
//! - Hold the short-lived cause flags (created file, daily-note command,
//!   internal-link click) and expire them on schedule.
//! - Turn one active-view change into at most one navigation cause.
//!
//! # Invariants
//! - Cause priority: created note > daily note > internal link > tab switch >
//!   open note.
//! - A consumed flag has no pending expiry; re-arming replaces the old expiry.
//! - Expired state is dropped before any event is classified.

use crate::model::category::SoundCategory;
use crate::navigation::events::{ActiveLeafChange, FileCreated, LeafId};
use crate::navigation::timer::{Clock, SystemClock, TimerId, TimerQueue};
use log::debug;
use std::collections::HashMap;
use std::time::Duration;

/// How long a created file waits for its first view before being forgotten.
pub const CREATED_FILE_TTL: Duration = Duration::from_millis(1_000);
/// How long an internal-link click waits for the navigation it caused.
pub const INTERNAL_LINK_TTL: Duration = Duration::from_millis(200);
/// How long a daily-note command waits for the navigation it caused.
pub const DAILY_NOTE_TTL: Duration = Duration::from_millis(100);

/// Command ids (matched as substrings) that navigate between daily notes.
pub const DAILY_NOTE_COMMAND_IDS: &[&str] = &[
    "daily-notes:goto-next",
    "daily-notes:goto-prev",
    "daily-notes",
];

/// Returns whether `command_id` is a daily-note navigation command.
pub fn is_daily_note_command(command_id: &str) -> bool {
    DAILY_NOTE_COMMAND_IDS
        .iter()
        .any(|id| command_id.contains(id))
}

/// Why a view change produced a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCause {
    CreatedNote,
    DailyNote,
    InternalLink,
    TabSwitch,
    OpenNote,
}

impl NavigationCause {
    pub fn category(self) -> SoundCategory {
        match self {
            Self::CreatedNote => SoundCategory::NewNote,
            _ => SoundCategory::PageFlip,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedNote => "created_note",
            Self::DailyNote => "daily_note",
            Self::InternalLink => "internal_link",
            Self::TabSwitch => "tab_switch",
            Self::OpenNote => "open_note",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expiry {
    InternalLink,
    DailyNote,
    CreatedFile(String),
}

/// Single-owner navigation state machine.
pub struct NavigationClassifier {
    clock: Box<dyn Clock>,
    timers: TimerQueue<Expiry>,
    last_leaf: Option<LeafId>,
    last_file_path: Option<String>,
    recently_created: HashMap<String, TimerId>,
    internal_link: Option<TimerId>,
    daily_note: Option<TimerId>,
}

impl Default for NavigationClassifier {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

impl NavigationClassifier {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            timers: TimerQueue::new(),
            last_leaf: None,
            last_file_path: None,
            recently_created: HashMap::new(),
            internal_link: None,
            daily_note: None,
        }
    }

    /// Runs every expiry that is due now.
    pub fn tick(&mut self) {
        for expiry in self.timers.take_due(self.clock.now()) {
            match expiry {
                Expiry::InternalLink => self.internal_link = None,
                Expiry::DailyNote => self.daily_note = None,
                Expiry::CreatedFile(path) => {
                    self.recently_created.remove(&path);
                }
            }
        }
    }

    /// Records a created markdown file. Non-markdown files are ignored.
    pub fn note_file_created(&mut self, event: &FileCreated) -> bool {
        self.tick();
        if !event.is_markdown() {
            return false;
        }
        let deadline = self.clock.now() + CREATED_FILE_TTL;
        let timer = self
            .timers
            .schedule(deadline, Expiry::CreatedFile(event.path.clone()));
        if let Some(previous) = self.recently_created.insert(event.path.clone(), timer) {
            self.timers.cancel(previous);
        }
        true
    }

    /// Arms the internal-link flag after a link click.
    pub fn arm_internal_link(&mut self) {
        self.tick();
        let deadline = self.clock.now() + INTERNAL_LINK_TTL;
        let timer = self.timers.schedule(deadline, Expiry::InternalLink);
        if let Some(previous) = self.internal_link.replace(timer) {
            self.timers.cancel(previous);
        }
    }

    /// Arms the daily-note flag after a daily-note command.
    pub fn arm_daily_note(&mut self) {
        self.tick();
        let deadline = self.clock.now() + DAILY_NOTE_TTL;
        let timer = self.timers.schedule(deadline, Expiry::DailyNote);
        if let Some(previous) = self.daily_note.replace(timer) {
            self.timers.cancel(previous);
        }
    }

    /// Observes one executed command; arms the daily-note flag on a match.
    pub fn note_command(&mut self, command_id: &str) -> bool {
        if !is_daily_note_command(command_id) {
            return false;
        }
        self.arm_daily_note();
        true
    }

    /// Classifies one active-view change.
    ///
    /// Returns the cause of the navigation, or `None` when the event is a
    /// duplicate, the delayed file resolution of an earlier pane activation,
    /// or carries no pane at all.
    pub fn classify(&mut self, change: &ActiveLeafChange) -> Option<NavigationCause> {
        self.classify_with(change, true)
    }

    /// Same as `classify`, but with the tab-switch cue turned off a pane
    /// change that also shows a different file is reported as `OpenNote`.
    pub fn classify_with(
        &mut self,
        change: &ActiveLeafChange,
        tab_switch_enabled: bool,
    ) -> Option<NavigationCause> {
        self.tick();
        let leaf = change.leaf?;
        let file_path = change.file_path.clone();

        let is_new_leaf = self.last_leaf != Some(leaf);
        let is_new_file = file_path != self.last_file_path;
        let prev_file_path = self.last_file_path.take();
        self.last_leaf = Some(leaf);
        self.last_file_path = file_path.clone();

        if !is_new_leaf && !is_new_file {
            return None;
        }
        if !is_new_leaf && prev_file_path.is_none() {
            debug!("event=classify module=navigation status=skip reason=file_resolved");
            return None;
        }

        if let Some(path) = file_path.as_deref() {
            if let Some(timer) = self.recently_created.remove(path) {
                self.timers.cancel(timer);
                return Some(NavigationCause::CreatedNote);
            }
        }
        if let Some(timer) = self.daily_note.take() {
            self.timers.cancel(timer);
            return Some(NavigationCause::DailyNote);
        }
        if let Some(timer) = self.internal_link.take() {
            self.timers.cancel(timer);
            return Some(NavigationCause::InternalLink);
        }
        if is_new_leaf && (tab_switch_enabled || !is_new_file) {
            Some(NavigationCause::TabSwitch)
        } else {
            Some(NavigationCause::OpenNote)
        }
    }

    pub fn is_internal_link_armed(&self) -> bool {
        self.internal_link.is_some()
    }

    pub fn is_daily_note_armed(&self) -> bool {
        self.daily_note.is_some()
    }

    pub fn is_pending_creation(&self, path: &str) -> bool {
        self.recently_created.contains_key(path)
    }

    pub fn last_leaf(&self) -> Option<LeafId> {
        self.last_leaf
    }

    pub fn last_file_path(&self) -> Option<&str> {
        self.last_file_path.as_deref()
    }

    /// Number of expiry tasks still scheduled.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Forgets all tracking state and cancels every pending expiry.
    pub fn reset(&mut self) {
        self.timers.clear();
        self.last_leaf = None;
        self.last_file_path = None;
        self.recently_created.clear();
        self.internal_link = None;
        self.daily_note = None;
    }
}
