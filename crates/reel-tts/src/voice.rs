//! Voice profile configuration.

/// Default narration voice (deep male, reads stories well).
pub const DEFAULT_VOICE: &str = "en-US-ChristopherNeural";
// Other options:
// "en-US-GuyNeural" - casual male
// "en-US-JennyNeural" - female
// "en-GB-RyanNeural" - British male

/// Voice selection and prosody for synthesis.
///
/// Passed into the synthesizer at construction time rather than read from
/// ambient state, so two pipelines can run with different voices.
#[derive(Debug, Clone)]
pub struct VoiceProfile {
    /// Edge TTS voice name.
    pub voice: String,
    /// Optional rate adjustment, e.g. "+10%".
    pub rate: Option<String>,
    /// Optional pitch adjustment, e.g. "-2Hz".
    pub pitch: Option<String>,
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self {
            voice: DEFAULT_VOICE.to_string(),
            rate: None,
            pitch: None,
        }
    }
}

impl VoiceProfile {
    /// Create a profile for a specific voice.
    pub fn new(voice: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            ..Default::default()
        }
    }

    /// Create a profile from environment variables (`VOICE`, `VOICE_RATE`,
    /// `VOICE_PITCH`), falling back to the default voice.
    pub fn from_env() -> Self {
        Self {
            voice: std::env::var("VOICE").unwrap_or_else(|_| DEFAULT_VOICE.to_string()),
            rate: std::env::var("VOICE_RATE").ok(),
            pitch: std::env::var("VOICE_PITCH").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = VoiceProfile::default();
        assert_eq!(profile.voice, "en-US-ChristopherNeural");
        assert!(profile.rate.is_none());
    }

    #[test]
    fn test_named_voice() {
        let profile = VoiceProfile::new("en-GB-RyanNeural");
        assert_eq!(profile.voice, "en-GB-RyanNeural");
    }
}
