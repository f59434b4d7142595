//! Error types for speech synthesis.

use thiserror::Error;

/// Result type for synthesis operations.
pub type TtsResult<T> = Result<T, TtsError>;

/// Errors that can occur during speech synthesis.
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("edge-tts not found in PATH")]
    EdgeTtsNotFound,

    #[error("Speech synthesis failed: {message}")]
    SynthesisFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("Synthesized audio file is missing or empty: {0}")]
    EmptyOutput(std::path::PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TtsError {
    /// Create a synthesis failure error.
    pub fn synthesis_failed(message: impl Into<String>, stderr: Option<String>) -> Self {
        Self::SynthesisFailed {
            message: message.into(),
            stderr,
        }
    }
}
