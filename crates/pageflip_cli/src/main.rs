//! Smoke-check commands and event-script replay.
//!
//! # Responsibility
//! - Verify `pageflip_core` linkage (`ping`, `version`).
//! - Replay a recorded host event script and print every cue it fires.
//! - Preview one category's sound on the default output device.

use pageflip_core::{
    default_log_level, init_logging, parse_category, AudioSink, FsVault, HostEvent, LogNotifier,
    ManualClock, PageFlipSounds, Settings,
};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

const USAGE: &str = "usage: pageflip ping | version | replay <script.json> [settings.json] \
                     | preview <category> [settings.json]";
const LOG_DIR_ENV: &str = "PAGEFLIP_LOG_DIR";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Ok(dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let result = match args.first().map(String::as_str) {
        Some("ping") => {
            println!("pageflip_core ping={}", pageflip_core::ping());
            Ok(())
        }
        Some("version") => {
            println!("pageflip_core version={}", pageflip_core::core_version());
            Ok(())
        }
        Some("replay") => match args.get(1) {
            Some(script) => replay(Path::new(script), args.get(2).map(Path::new)),
            None => Err(USAGE.to_string()),
        },
        Some("preview") => match args.get(1) {
            Some(category) => preview(category, args.get(2).map(Path::new)),
            None => Err(USAGE.to_string()),
        },
        _ => Err(USAGE.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, String> {
    match path {
        Some(path) => Settings::load_from_path(path).map_err(|err| err.to_string()),
        None => Ok(Settings::default()),
    }
}

fn build_plugin(settings: Settings) -> PageFlipSounds {
    PageFlipSounds::new(
        settings,
        Box::new(FsVault::new(".")),
        audio_sink(),
        Box::new(LogNotifier),
    )
}

#[cfg(feature = "rodio-output")]
fn audio_sink() -> Box<dyn AudioSink> {
    Box::new(pageflip_core::RodioSink)
}

#[cfg(not(feature = "rodio-output"))]
fn audio_sink() -> Box<dyn AudioSink> {
    Box::new(pageflip_core::NullSink)
}

/// Script format: `[{"at_ms": 0, "event": {"type": "...", ...}}, ...]`,
/// with non-decreasing `at_ms`.
fn replay(script: &Path, settings_path: Option<&Path>) -> Result<(), String> {
    let raw = std::fs::read_to_string(script)
        .map_err(|err| format!("cannot read `{}`: {err}", script.display()))?;
    let steps: Vec<serde_json::Value> =
        serde_json::from_str(&raw).map_err(|err| format!("invalid script: {err}"))?;

    let clock = ManualClock::new();
    let mut plugin =
        build_plugin(load_settings(settings_path)?).with_clock(Box::new(clock.clone()));
    plugin.load();

    let mut elapsed_ms = 0_u64;
    for (index, step) in steps.into_iter().enumerate() {
        let at_ms = step.get("at_ms").and_then(|v| v.as_u64()).unwrap_or(elapsed_ms);
        if at_ms > elapsed_ms {
            clock.advance(Duration::from_millis(at_ms - elapsed_ms));
            elapsed_ms = at_ms;
        }
        plugin.tick();

        let event_value = step
            .get("event")
            .cloned()
            .ok_or_else(|| format!("step {index}: missing `event`"))?;
        let event: HostEvent = serde_json::from_value(event_value)
            .map_err(|err| format!("step {index}: {err}"))?;
        if let Some(cue) = plugin.handle_event(&event) {
            println!("{elapsed_ms:>6}ms {} {:?}", cue.category, cue.trigger);
        }
    }

    plugin.unload();
    linger();
    Ok(())
}

fn preview(category: &str, settings_path: Option<&Path>) -> Result<(), String> {
    let category = parse_category(category).map_err(|err| err.to_string())?;
    let mut plugin = build_plugin(load_settings(settings_path)?);
    plugin.load();
    match plugin.preview(category) {
        Some(resource) => println!(
            "{category} {} ({} uri bytes)",
            resource.mime(),
            resource.uri().len()
        ),
        None => println!("{category} has no sounds"),
    }
    linger();
    Ok(())
}

/// Keeps the process alive while background playback threads finish.
fn linger() {
    if cfg!(feature = "rodio-output") {
        std::thread::sleep(Duration::from_millis(800));
    }
}
