//! Host event payloads consumed by the classifier.
//!
//! # Responsibility
//! - Describe the host's workspace, vault, DOM and command events as plain data.
//! - Match click targets against link and checkbox selectors.
//!
//! # Invariants
//! - Click paths are ordered target-first, then ancestors outward.
//! - Event payloads are serde-friendly so hosts can forward them as JSON.

use serde::{Deserialize, Serialize};

/// Class marking an internal (wiki) link anchor.
pub const INTERNAL_LINK_CLASS: &str = "internal-link";
/// Class marking a task-list checkbox in reading view.
pub const TASK_CHECKBOX_CLASS: &str = "task-list-item-checkbox";
/// Extension of notes that count as "created notes".
pub const MARKDOWN_EXTENSION: &str = "md";

/// Identity of one workspace pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeafId(pub u64);

/// A file was created in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCreated {
    pub path: String,
    pub extension: String,
}

impl FileCreated {
    pub fn is_markdown(&self) -> bool {
        self.extension == MARKDOWN_EXTENSION
    }
}

/// The focused pane changed or its file resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveLeafChange {
    /// `None` when the host reports a change with no pane.
    pub leaf: Option<LeafId>,
    /// Markdown file shown in the pane; may lag pane activation.
    pub file_path: Option<String>,
}

/// One element on a click's propagation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ElementInfo {
    pub fn new(tag: &str, classes: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            classes: classes.iter().map(|class| class.to_string()).collect(),
        }
    }

    /// Selector match for `tag.class`.
    pub fn matches(&self, tag: &str, class: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag) && self.classes.iter().any(|c| c == class)
    }
}

/// A click observed in the capture phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Target first, then ancestors.
    pub path: Vec<ElementInfo>,
}

impl ClickEvent {
    /// `closest(tag.class)` over the target and its ancestors.
    pub fn closest(&self, tag: &str, class: &str) -> Option<&ElementInfo> {
        self.path.iter().find(|element| element.matches(tag, class))
    }

    pub fn hits_internal_link(&self) -> bool {
        self.closest("a", INTERNAL_LINK_CLASS).is_some()
    }

    /// Only the target itself counts; labels around checkboxes do not.
    pub fn hits_task_checkbox(&self) -> bool {
        self.path
            .first()
            .is_some_and(|target| target.matches("input", TASK_CHECKBOX_CLASS))
    }
}

/// Every event the host forwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    FileCreated(FileCreated),
    ActiveLeafChange(ActiveLeafChange),
    Click(ClickEvent),
    Command { command_id: String },
    CheckboxToggled,
}

#[cfg(test)]
mod tests {
    use super::{ActiveLeafChange, ClickEvent, ElementInfo, FileCreated, HostEvent, LeafId};

    #[test]
    fn closest_walks_ancestors() {
        let click = ClickEvent {
            path: vec![
                ElementInfo::new("span", &["cm-link"]),
                ElementInfo::new("a", &["internal-link"]),
                ElementInfo::new("div", &["markdown-preview-view"]),
            ],
        };
        assert!(click.hits_internal_link());
        assert!(!click.hits_task_checkbox());
    }

    #[test]
    fn external_links_are_not_internal() {
        let click = ClickEvent {
            path: vec![ElementInfo::new("a", &["external-link"])],
        };
        assert!(!click.hits_internal_link());
    }

    #[test]
    fn checkbox_must_be_the_target() {
        let direct = ClickEvent {
            path: vec![ElementInfo::new("input", &["task-list-item-checkbox"])],
        };
        let nested = ClickEvent {
            path: vec![
                ElementInfo::new("span", &[]),
                ElementInfo::new("input", &["task-list-item-checkbox"]),
            ],
        };
        assert!(direct.hits_task_checkbox());
        assert!(!nested.hits_task_checkbox());
    }

    #[test]
    fn markdown_detection_uses_extension() {
        let note = FileCreated {
            path: "a.md".to_string(),
            extension: "md".to_string(),
        };
        let canvas = FileCreated {
            path: "b.canvas".to_string(),
            extension: "canvas".to_string(),
        };
        assert!(note.is_markdown());
        assert!(!canvas.is_markdown());
    }

    #[test]
    fn host_events_use_tagged_json() {
        let event: HostEvent = serde_json::from_value(serde_json::json!({
            "type": "active_leaf_change",
            "leaf": 7,
            "file_path": "notes/x.md"
        }))
        .expect("event parses");
        assert_eq!(
            event,
            HostEvent::ActiveLeafChange(ActiveLeafChange {
                leaf: Some(LeafId(7)),
                file_path: Some("notes/x.md".to_string()),
            })
        );

        let command: HostEvent = serde_json::from_value(serde_json::json!({
            "type": "command",
            "command_id": "daily-notes:goto-next"
        }))
        .expect("command parses");
        assert!(matches!(command, HostEvent::Command { .. }));
    }
}
