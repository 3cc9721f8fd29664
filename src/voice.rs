use serde::Serialize;

use crate::dialogue::Speaker;

/// ElevenLabs model used for all dialogue.
pub const MODEL_ID: &str = "eleven_turbo_v2_5";

/// Voice assigned to each character.
pub fn voice_id(speaker: Speaker) -> &'static str {
    match speaker {
        // Jessica: young, playful.
        Speaker::Maya => "cgSgspJ2msm6clMCkdW9",
        // Brian: deep, resonant.
        Speaker::Reyes => "nPczCjzI2devNBz1zQrb",
    }
}

/// Tuning knobs sent with every synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
    pub style: f64,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.3,
            use_speaker_boost: true,
        }
    }
}

/// JSON body of a text-to-speech request.
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisRequest<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
    pub voice_settings: VoiceSettings,
}

impl<'a> SynthesisRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_service_schema() -> anyhow::Result<()> {
        let body = serde_json::to_value(SynthesisRequest::new("Hello ... world"))?;
        assert_eq!(
            body,
            json!({
                "text": "Hello ... world",
                "model_id": "eleven_turbo_v2_5",
                "voice_settings": {
                    "stability": 0.5,
                    "similarity_boost": 0.75,
                    "style": 0.3,
                    "use_speaker_boost": true
                }
            })
        );
        Ok(())
    }

    #[test]
    fn speakers_have_distinct_voices() {
        assert_ne!(voice_id(Speaker::Maya), voice_id(Speaker::Reyes));
    }
}
