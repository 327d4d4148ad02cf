//! Self-contained playable sound resources.
//!
//! A resource is an embedded-data audio URI (`data:<mime>;base64,<payload>`),
//! so it can be handed to any sink without file handles.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// MIME type of custom `.ogg` sounds.
pub const MIME_OGG: &str = "audio/ogg";
/// MIME type of synthesized built-in sounds.
pub const MIME_WAV: &str = "audio/wav";

const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Playable sound encoded as a data URI.
///
/// Cloning is cheap; the URI text is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoundResource {
    uri: Arc<str>,
}

impl SoundResource {
    /// Encodes raw audio bytes into a data URI resource.
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        let uri = format!(
            "{DATA_URI_PREFIX}{mime}{BASE64_MARKER}{}",
            STANDARD.encode(bytes)
        );
        Self { uri: uri.into() }
    }

    /// Wraps an existing data URI after checking its shape.
    pub fn from_data_uri(uri: &str) -> Result<Self, ResourceError> {
        split_data_uri(uri)?;
        Ok(Self { uri: uri.into() })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// MIME type declared by the URI.
    pub fn mime(&self) -> &str {
        split_data_uri(&self.uri).map(|(mime, _)| mime).unwrap_or("")
    }

    /// Decodes the embedded payload back to raw audio bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ResourceError> {
        let (_, payload) = split_data_uri(&self.uri)?;
        STANDARD
            .decode(payload)
            .map_err(|err| ResourceError::Base64(err.to_string()))
    }
}

fn split_data_uri(uri: &str) -> Result<(&str, &str), ResourceError> {
    let rest = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or(ResourceError::NotDataUri)?;
    let (mime, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or(ResourceError::NotDataUri)?;
    if mime.is_empty() {
        return Err(ResourceError::NotDataUri);
    }
    Ok((mime, payload))
}

/// Resource encoding errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    NotDataUri,
    Base64(String),
}

impl Display for ResourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDataUri => write!(f, "resource is not a base64 data uri"),
            Self::Base64(details) => write!(f, "invalid base64 payload: {details}"),
        }
    }
}

impl Error for ResourceError {}
