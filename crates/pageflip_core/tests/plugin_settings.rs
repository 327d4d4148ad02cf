use pageflip_core::{
    CollectingNotifier, FsVault, LoadOutcome, NullSink, PageFlipSounds, Settings, SoundCategory,
};
use std::fs;
use std::path::Path;
use std::rc::Rc;

fn write_sound(root: &Path, relative: &str, bytes: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("sound has a parent dir")).expect("create dirs");
    fs::write(path, bytes).expect("write sound");
}

fn plugin(root: &Path, settings: Settings) -> (PageFlipSounds, Rc<CollectingNotifier>) {
    let notifier = Rc::new(CollectingNotifier::new());
    let plugin = PageFlipSounds::new(
        settings,
        Box::new(FsVault::new(root)),
        Box::new(NullSink),
        Box::new(Rc::clone(&notifier)),
    );
    (plugin, notifier)
}

#[test]
fn load_reads_the_configured_folder() {
    let vault_dir = tempfile::tempdir().expect("tempdir");
    for category in SoundCategory::ALL {
        write_sound(
            vault_dir.path(),
            &format!("assets/sounds/{}/1.ogg", category.as_str()),
            category.as_str().as_bytes(),
        );
    }
    let mut settings = Settings::default();
    settings.custom_sounds_folder = "assets/sounds".to_string();
    let (mut plugin, notifier) = plugin(vault_dir.path(), settings);

    let outcome = plugin.load();
    assert_eq!(
        outcome,
        Some(LoadOutcome::Loaded {
            sounds: 3,
            warnings: vec![],
        })
    );
    assert!(notifier.messages().is_empty());

    let preview = plugin
        .preview(SoundCategory::Checkbox)
        .expect("custom checkbox sound");
    assert_eq!(preview.mime(), "audio/ogg");
    assert_eq!(preview.decode().expect("decode"), b"checkbox".to_vec());
}

#[test]
fn load_without_folder_uses_builtin_sounds() {
    let vault_dir = tempfile::tempdir().expect("tempdir");
    let (mut plugin, _) = plugin(vault_dir.path(), Settings::default());
    assert_eq!(plugin.load(), None);
    let preview = plugin.preview(SoundCategory::PageFlip).expect("built-in");
    assert_eq!(preview.mime(), "audio/wav");
}

#[test]
fn update_settings_trims_loads_caches_and_clears() {
    let vault_dir = tempfile::tempdir().expect("tempdir");
    write_sound(vault_dir.path(), "sounds/page-flip/a.ogg", b"a");
    let (mut plugin, notifier) = plugin(vault_dir.path(), Settings::default());

    let mut settings = plugin.settings().clone();
    settings.custom_sounds_folder = "  sounds  ".to_string();
    let outcome = plugin.update_settings(settings.clone());
    assert!(matches!(outcome, LoadOutcome::Loaded { sounds: 1, .. }));
    assert_eq!(plugin.settings().custom_sounds_folder, "sounds");
    assert_eq!(notifier.drain().len(), 1);

    settings.volume = 0.9;
    assert_eq!(plugin.update_settings(settings.clone()), LoadOutcome::CacheHit);
    assert!(notifier.messages().is_empty());

    settings.custom_sounds_folder = String::new();
    assert_eq!(plugin.update_settings(settings), LoadOutcome::Cleared);
    assert!(plugin.store().custom().is_none());
}

#[test]
fn reset_settings_restores_defaults_and_invalidates_custom_set() {
    let vault_dir = tempfile::tempdir().expect("tempdir");
    write_sound(vault_dir.path(), "sounds/page-flip/a.ogg", b"a");
    let mut settings = Settings::default();
    settings.custom_sounds_folder = "sounds".to_string();
    settings.volume = 0.1;
    let (mut plugin, _) = plugin(vault_dir.path(), settings);
    plugin.load();
    assert!(plugin.store().custom().is_some());

    plugin.reset_settings();
    assert_eq!(plugin.settings(), &Settings::default());
    assert!(plugin.store().custom().is_none());
}

#[test]
fn previews_ignore_toggles() {
    let vault_dir = tempfile::tempdir().expect("tempdir");
    let mut settings = Settings::default();
    settings.enabled = false;
    settings.on_checkbox = false;
    let (mut plugin, _) = plugin(vault_dir.path(), settings);
    assert!(plugin.preview(SoundCategory::Checkbox).is_some());
    assert!(plugin.preview(SoundCategory::NewNote).is_some());
}
