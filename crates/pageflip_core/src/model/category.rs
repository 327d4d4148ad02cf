//! Sound category tags.
//!
//! # Responsibility
//! - Enumerate the notification triggers that own a sound pool.
//! - Map categories to stable ids used in folders, settings and logs.
//!
//! # Invariants
//! - `as_str` values are lowercase kebab-case and never change.
//! - `SoundCategory::ALL` order is the order custom folders are scanned in.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Notification category with its own sound pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundCategory {
    /// Navigation between notes (open, tab switch, link, daily note).
    PageFlip,
    /// Opening a note that was just created.
    NewNote,
    /// Toggling a task-list checkbox.
    Checkbox,
}

/// Stable id for the page-flip category.
pub const CATEGORY_PAGE_FLIP: &str = "page-flip";
/// Stable id for the new-note category.
pub const CATEGORY_NEW_NOTE: &str = "new-note";
/// Stable id for the checkbox category.
pub const CATEGORY_CHECKBOX: &str = "checkbox";

impl SoundCategory {
    /// Every category, in scan order.
    pub const ALL: [SoundCategory; 3] = [Self::PageFlip, Self::NewNote, Self::Checkbox];

    /// Stable string id, also the custom-sound subfolder name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PageFlip => CATEGORY_PAGE_FLIP,
            Self::NewNote => CATEGORY_NEW_NOTE,
            Self::Checkbox => CATEGORY_CHECKBOX,
        }
    }

    /// Dense index for per-category arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            Self::PageFlip => 0,
            Self::NewNote => 1,
            Self::Checkbox => 2,
        }
    }
}

impl Display for SoundCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one category from its stable id.
pub fn parse_category(value: &str) -> Result<SoundCategory, CategoryParseError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(CategoryParseError::Empty);
    }
    match normalized {
        CATEGORY_PAGE_FLIP => Ok(SoundCategory::PageFlip),
        CATEGORY_NEW_NOTE => Ok(SoundCategory::NewNote),
        CATEGORY_CHECKBOX => Ok(SoundCategory::Checkbox),
        other => Err(CategoryParseError::Unknown(other.to_string())),
    }
}

/// Category parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    Empty,
    Unknown(String),
}

impl Display for CategoryParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "sound category must not be empty"),
            Self::Unknown(value) => write!(
                f,
                "unknown sound category `{value}`; expected page-flip|new-note|checkbox"
            ),
        }
    }
}

impl Error for CategoryParseError {}

#[cfg(test)]
mod tests {
    use super::{parse_category, CategoryParseError, SoundCategory};

    #[test]
    fn parses_every_category_id() {
        for category in SoundCategory::ALL {
            assert_eq!(
                parse_category(category.as_str()).expect("known id parses"),
                category
            );
        }
    }

    #[test]
    fn rejects_blank_and_unknown_ids() {
        assert_eq!(parse_category("  "), Err(CategoryParseError::Empty));
        assert_eq!(
            parse_category("PageFlip"),
            Err(CategoryParseError::Unknown("PageFlip".to_string()))
        );
    }

    #[test]
    fn indexes_are_dense_and_distinct() {
        let indexes: Vec<usize> = SoundCategory::ALL.iter().map(|c| c.index()).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn serializes_as_kebab_case() {
        let json = serde_json::to_string(&SoundCategory::NewNote).expect("serialize");
        assert_eq!(json, "\"new-note\"");
    }
}
