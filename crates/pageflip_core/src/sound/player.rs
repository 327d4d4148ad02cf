//! One-shot cue playback.
//!
//! # Responsibility
//! - Resolve a category through the store and start playback at a clamped
//!   volume.
//! - Swallow playback start failures.
//!
//! # Invariants
//! - No queuing or mixing: overlapping calls overlap audibly.
//! - Failures are logged at debug level only; never retried, never surfaced.

use crate::model::category::SoundCategory;
use crate::model::settings::clamp_volume;
use crate::sound::resource::{ResourceError, SoundResource};
use crate::sound::store::SoundStore;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Platform audio output primitive.
pub trait AudioSink {
    /// Starts one-shot playback. Must return quickly; playback continues in
    /// the background.
    fn start(&self, resource: &SoundResource, volume: f32) -> Result<(), PlaybackError>;
}

/// Playback start failures.
#[derive(Debug)]
pub enum PlaybackError {
    Resource(ResourceError),
    Device(String),
    Decode(String),
}

impl Display for PlaybackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resource(err) => write!(f, "{err}"),
            Self::Device(details) => write!(f, "audio device unavailable: {details}"),
            Self::Decode(details) => write!(f, "audio decode failed: {details}"),
        }
    }
}

impl Error for PlaybackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Resource(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for PlaybackError {
    fn from(value: ResourceError) -> Self {
        Self::Resource(value)
    }
}

/// Sink that discards every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn start(&self, _resource: &SoundResource, _volume: f32) -> Result<(), PlaybackError> {
        Ok(())
    }
}

impl<S: AudioSink + ?Sized> AudioSink for std::rc::Rc<S> {
    fn start(&self, resource: &SoundResource, volume: f32) -> Result<(), PlaybackError> {
        (**self).start(resource, volume)
    }
}

/// Player facade over one sink.
pub struct SoundPlayer {
    sink: Box<dyn AudioSink>,
}

impl SoundPlayer {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self { sink }
    }

    /// Plays one sound for `category`.
    ///
    /// Returns the resource handed to the sink, or `None` when no sound could
    /// be resolved. A sink failure still returns the resource: the attempt
    /// happened and the failure was discarded.
    pub fn play(
        &self,
        store: &mut SoundStore,
        category: SoundCategory,
        volume: f32,
    ) -> Option<SoundResource> {
        let Some(resource) = store.resolve(category) else {
            debug!("event=play module=sound status=skip reason=empty_pool category={category}");
            return None;
        };
        let volume = clamp_volume(volume);
        if let Err(err) = self.sink.start(&resource, volume) {
            debug!("event=play module=sound status=error category={category} error={err}");
        }
        Some(resource)
    }
}

#[cfg(feature = "rodio-output")]
pub use rodio_sink::RodioSink;

#[cfg(feature = "rodio-output")]
mod rodio_sink {
    use super::{AudioSink, PlaybackError};
    use crate::sound::resource::SoundResource;
    use log::debug;
    use rodio::{Decoder, OutputStream, Sink};
    use std::io::Cursor;

    /// Default output device through `rodio`, one thread per cue.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct RodioSink;

    impl AudioSink for RodioSink {
        fn start(&self, resource: &SoundResource, volume: f32) -> Result<(), PlaybackError> {
            let bytes = resource.decode()?;
            let source = Decoder::new(Cursor::new(bytes))
                .map_err(|err| PlaybackError::Decode(err.to_string()))?;
            std::thread::spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(err) => {
                        debug!("event=play module=sound status=error reason=device error={err}");
                        return;
                    }
                };
                match Sink::try_new(&handle) {
                    Ok(sink) => {
                        sink.set_volume(volume);
                        sink.append(source);
                        sink.sleep_until_end();
                    }
                    Err(err) => {
                        debug!("event=play module=sound status=error reason=sink error={err}");
                    }
                }
            });
            Ok(())
        }
    }
}
