use std::fmt;

use crate::{Error, Result};

/// Environment variable holding the ElevenLabs API key.
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Pluggable text-to-speech service used by [`crate::batch::run_synthesis`].
///
/// Implementations turn already-cleaned text into encoded audio bytes. They should not sleep,
/// retry, or touch the filesystem; pacing and persistence belong to the batch runner.
pub trait SpeechSynthesizer {
    /// Synthesize `text` with the given voice.
    ///
    /// A non-success answer from the service should come back as [`Error::Api`] so the caller
    /// can log it and carry on with the next line.
    fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>>;
}

/// API credential for the synthesis service.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Read the key from [`API_KEY_ENV`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the key through an arbitrary variable lookup.
    ///
    /// An unset or blank value is treated as missing.
    pub fn from_lookup(lookup: impl FnOnce(&str) -> Option<String>) -> Result<Self> {
        match lookup(API_KEY_ENV) {
            Some(key) if !key.trim().is_empty() => Ok(Self(key.trim().to_owned())),
            _ => Err(Error::MissingCredential(API_KEY_ENV)),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
