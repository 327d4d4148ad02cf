//! Custom sound set loading from a vault folder.
//!
//! # Responsibility
//! - Scan `<root>/page-flip`, `<root>/new-note` and `<root>/checkbox` for
//!   `.ogg` files and encode them into playable resources.
//! - Install the result as the store's active custom set.
//! - Aggregate every recoverable problem into one user notice.
//!
//! # Invariants
//! - An empty root clears the active set synchronously.
//! - Reloading the folder that is already active performs no reads.
//! - Files are added in ascending name order.
//! - A failing category or file never aborts the rest of the scan.

use crate::host::Notifier;
use crate::model::category::SoundCategory;
use crate::sound::resource::{SoundResource, MIME_OGG};
use crate::sound::store::{CustomSoundSet, SoundStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Component, Path, PathBuf};

/// File suffix recognized as a custom sound.
pub const AUDIO_EXTENSION: &str = ".ogg";

const NOTICE_PREFIX: &str = "Page Flip Sounds";

/// One direct child of a vault folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    /// File or folder name without directories.
    pub name: String,
    /// Vault-relative path usable with `SoundVault::read_binary`.
    pub path: String,
    pub is_file: bool,
}

/// Host file-system access used by the loader.
pub trait SoundVault {
    /// Lists direct children of `path`. `Ok(None)` means no such folder.
    fn list_folder(&self, path: &str) -> Result<Option<Vec<VaultEntry>>, VaultError>;

    /// Reads one file fully.
    fn read_binary(&self, path: &str) -> Result<Vec<u8>, VaultError>;
}

/// Vault I/O failure with the offending path.
#[derive(Debug)]
pub struct VaultError {
    pub path: String,
    pub source: std::io::Error,
}

impl VaultError {
    pub fn new(path: impl Into<String>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

impl Display for VaultError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`: {}", self.path, self.source)
    }
}

impl Error for VaultError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// `SoundVault` over a directory on the local file system.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, VaultError> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
        {
            return Err(VaultError::new(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path escapes the vault root",
                ),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl SoundVault for FsVault {
    fn list_folder(&self, path: &str) -> Result<Option<Vec<VaultEntry>>, VaultError> {
        let dir = self.resolve(path)?;
        if !dir.is_dir() {
            return Ok(None);
        }
        let read_dir = std::fs::read_dir(&dir).map_err(|err| VaultError::new(path, err))?;
        let mut entries = Vec::new();
        for item in read_dir {
            let item = item.map_err(|err| VaultError::new(path, err))?;
            let file_type = item.file_type().map_err(|err| VaultError::new(path, err))?;
            let name = item.file_name().to_string_lossy().into_owned();
            entries.push(VaultEntry {
                path: format!("{}/{}", path.trim_end_matches('/'), name),
                name,
                is_file: file_type.is_file(),
            });
        }
        Ok(Some(entries))
    }

    fn read_binary(&self, path: &str) -> Result<Vec<u8>, VaultError> {
        let file = self.resolve(path)?;
        std::fs::read(file).map_err(|err| VaultError::new(path, err))
    }
}

/// Result of one load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Empty root: custom sounds were disabled.
    Cleared,
    /// The requested folder is already active; nothing was read.
    CacheHit,
    /// A new set was installed.
    Loaded {
        sounds: usize,
        warnings: Vec<String>,
    },
}

/// Loads the custom sound set rooted at `folder` into `store`.
///
/// Problems are collected as warnings; when any exist a single aggregated
/// notice is posted. The new set is installed regardless, so categories that
/// failed fall back to built-in sounds.
pub fn load_custom_sounds(
    vault: &dyn SoundVault,
    store: &mut SoundStore,
    folder: &str,
    notifier: &dyn Notifier,
) -> LoadOutcome {
    let root = normalize_root(folder);
    if root.is_empty() {
        store.clear_custom();
        info!("event=custom_sounds_clear module=sound status=ok");
        return LoadOutcome::Cleared;
    }
    if store.custom_folder() == Some(root) {
        info!("event=custom_sounds_load module=sound status=skip reason=cached folder={root}");
        return LoadOutcome::CacheHit;
    }

    let mut set = CustomSoundSet::new(root);
    let mut warnings = Vec::new();
    for category in SoundCategory::ALL {
        load_category(vault, root, category, &mut set, &mut warnings);
    }

    if !warnings.is_empty() {
        warn!(
            "event=custom_sounds_load module=sound status=warn folder={} warnings={}",
            root,
            warnings.len()
        );
        notifier.notice(&aggregate_notice(&warnings));
    }

    let sounds = set.len();
    info!(
        "event=custom_sounds_load module=sound status=ok folder={} page_flip={} new_note={} checkbox={}",
        root,
        set.pool(SoundCategory::PageFlip).len(),
        set.pool(SoundCategory::NewNote).len(),
        set.pool(SoundCategory::Checkbox).len()
    );
    store.install_custom(set);
    LoadOutcome::Loaded { sounds, warnings }
}

fn load_category(
    vault: &dyn SoundVault,
    root: &str,
    category: SoundCategory,
    set: &mut CustomSoundSet,
    warnings: &mut Vec<String>,
) {
    let dir = format!("{root}/{}", category.as_str());
    let entries = match vault.list_folder(&dir) {
        Ok(Some(entries)) => entries,
        Ok(None) => {
            warnings.push(format!("{category} folder not found at {dir}"));
            return;
        }
        Err(err) => {
            warnings.push(format!("Error loading {category} sounds: {err}"));
            return;
        }
    };

    let mut files: Vec<VaultEntry> = entries
        .into_iter()
        .filter(|entry| entry.is_file && entry.name.ends_with(AUDIO_EXTENSION))
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));

    for file in files {
        match vault.read_binary(&file.path) {
            Ok(bytes) => set.push(category, SoundResource::from_bytes(MIME_OGG, &bytes)),
            Err(err) => warnings.push(format!("Error loading {category} sound: {err}")),
        }
    }
}

fn normalize_root(folder: &str) -> &str {
    folder.trim().trim_end_matches('/')
}

fn aggregate_notice(warnings: &[String]) -> String {
    format!(
        "{NOTICE_PREFIX}: {}. Falling back to built-in sounds.",
        warnings.join("; ")
    )
}
