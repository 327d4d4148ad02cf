//! Built-in sound pools.
//!
//! # Responsibility
//! - Provide an immutable pool of cues for every category with no files on disk.
//! - Synthesize the clips once per process as 16-bit mono WAV data.
//!
//! # Invariants
//! - Bundled pools are deterministic: same bytes on every run and platform.
//! - Synthesis failure degrades to an empty pool, never a panic.

use crate::model::category::SoundCategory;
use crate::sound::resource::{SoundResource, MIME_WAV};
use log::error;
use once_cell::sync::Lazy;
use std::io::Cursor;

const SAMPLE_RATE: u32 = 22_050;
const PEAK_AMPLITUDE: f32 = 0.6;

static BUNDLED: Lazy<BuiltinPools> = Lazy::new(synthesize_bundled);

/// Per-category immutable pools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltinPools {
    pools: [Vec<SoundResource>; 3],
}

impl BuiltinPools {
    /// Pools with no sounds at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared process-wide bundled pools.
    pub fn bundled() -> Self {
        BUNDLED.clone()
    }

    /// Replaces one category's pool.
    pub fn with_pool(mut self, category: SoundCategory, pool: Vec<SoundResource>) -> Self {
        self.pools[category.index()] = pool;
        self
    }

    pub fn get(&self, category: SoundCategory) -> &[SoundResource] {
        &self.pools[category.index()]
    }
}

/// Shape of one synthesized clip.
#[derive(Debug, Clone, Copy)]
enum Recipe {
    /// Enveloped noise burst that sounds like a paper rustle.
    Rustle { millis: u32, seed: u32 },
    /// Two sine partials with an exponential decay.
    Chime { millis: u32, low_hz: f32, high_hz: f32 },
    /// Very short damped sine.
    Click { millis: u32, hz: f32 },
}

const PAGE_FLIP_RECIPES: &[Recipe] = &[
    Recipe::Rustle { millis: 140, seed: 0x5eed_0001 },
    Recipe::Rustle { millis: 180, seed: 0x5eed_0002 },
    Recipe::Rustle { millis: 220, seed: 0x5eed_0003 },
];

const NEW_NOTE_RECIPES: &[Recipe] = &[
    Recipe::Chime { millis: 260, low_hz: 660.0, high_hz: 880.0 },
    Recipe::Chime { millis: 300, low_hz: 587.3, high_hz: 987.8 },
];

const CHECKBOX_RECIPES: &[Recipe] = &[
    Recipe::Click { millis: 35, hz: 1_800.0 },
    Recipe::Click { millis: 45, hz: 2_200.0 },
];

fn recipes_for(category: SoundCategory) -> &'static [Recipe] {
    match category {
        SoundCategory::PageFlip => PAGE_FLIP_RECIPES,
        SoundCategory::NewNote => NEW_NOTE_RECIPES,
        SoundCategory::Checkbox => CHECKBOX_RECIPES,
    }
}

fn synthesize_bundled() -> BuiltinPools {
    let mut pools = BuiltinPools::empty();
    for category in SoundCategory::ALL {
        let mut pool = Vec::new();
        for recipe in recipes_for(category) {
            match encode_wav(&render(*recipe)) {
                Ok(bytes) => pool.push(SoundResource::from_bytes(MIME_WAV, &bytes)),
                Err(err) => error!(
                    "event=builtin_synth module=sound status=error category={} error={}",
                    category, err
                ),
            }
        }
        pools = pools.with_pool(category, pool);
    }
    pools
}

fn render(recipe: Recipe) -> Vec<f32> {
    match recipe {
        Recipe::Rustle { millis, seed } => {
            let len = sample_count(millis);
            let mut state = seed;
            let mut smoothed = 0.0_f32;
            (0..len)
                .map(|i| {
                    // xorshift32: bytes must not change when `rand` changes its streams.
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    let white = (state as f32 / u32::MAX as f32) * 2.0 - 1.0;
                    smoothed += 0.35 * (white - smoothed);
                    let t = i as f32 / len as f32;
                    let envelope = (t * std::f32::consts::PI).sin().powi(2);
                    smoothed * envelope
                })
                .collect()
        }
        Recipe::Chime {
            millis,
            low_hz,
            high_hz,
        } => {
            let len = sample_count(millis);
            (0..len)
                .map(|i| {
                    let secs = i as f32 / SAMPLE_RATE as f32;
                    let decay = (-secs * 12.0).exp();
                    let low = (std::f32::consts::TAU * low_hz * secs).sin();
                    let high = (std::f32::consts::TAU * high_hz * secs).sin();
                    (0.6 * low + 0.4 * high) * decay
                })
                .collect()
        }
        Recipe::Click { millis, hz } => {
            let len = sample_count(millis);
            (0..len)
                .map(|i| {
                    let secs = i as f32 / SAMPLE_RATE as f32;
                    (std::f32::consts::TAU * hz * secs).sin() * (-secs * 140.0).exp()
                })
                .collect()
        }
    }
}

fn sample_count(millis: u32) -> usize {
    (SAMPLE_RATE as usize * millis as usize) / 1_000
}

fn encode_wav(samples: &[f32]) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for sample in samples {
            let scaled = (sample.clamp(-1.0, 1.0) * PEAK_AMPLITUDE * i16::MAX as f32) as i16;
            writer.write_sample(scaled)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}
