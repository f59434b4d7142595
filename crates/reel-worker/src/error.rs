//! Pipeline error taxonomy.
//!
//! One variant per failure class; every stage failure aborts the run and
//! surfaces here with its stage attached. Render failures keep the
//! structured media error so the encoder's diagnostic text survives.

use thiserror::Error;

use reel_media::MediaError;
use reel_storage::StorageError;

use crate::pipeline::Stage;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Malformed input payload: {0}")]
    MalformedInput(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Media acquisition failed: {0}")]
    Acquisition(String),

    #[error("Caption track failed: {0}")]
    Caption(String),

    #[error("Render failed: {0}")]
    Render(#[source] MediaError),

    #[error("Publish failed: {0}")]
    Publish(#[source] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn synthesis(msg: impl ToString) -> Self {
        Self::Synthesis(msg.to_string())
    }

    pub fn acquisition(msg: impl ToString) -> Self {
        Self::Acquisition(msg.to_string())
    }

    pub fn caption(msg: impl ToString) -> Self {
        Self::Caption(msg.to_string())
    }

    /// Stage that produced this error, when attributable to one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::Synthesis(_) => Some(Stage::Synthesize),
            PipelineError::Acquisition(_) => Some(Stage::Acquire),
            PipelineError::Caption(_) => Some(Stage::Caption),
            PipelineError::Render(_) => Some(Stage::Render),
            PipelineError::Publish(_) => Some(Stage::Publish),
            PipelineError::MalformedInput(_) | PipelineError::Io(_) => None,
        }
    }

    /// Raw diagnostic text from the underlying tool, when one exists.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            PipelineError::Render(MediaError::FfmpegFailed { stderr, .. }) => stderr.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_attribution() {
        assert_eq!(
            PipelineError::synthesis("boom").stage(),
            Some(Stage::Synthesize)
        );
        assert_eq!(
            PipelineError::acquisition("gone").stage(),
            Some(Stage::Acquire)
        );
        assert_eq!(PipelineError::malformed_input("missing").stage(), None);
    }

    #[test]
    fn test_render_diagnostic_survives() {
        let err = PipelineError::Render(MediaError::ffmpeg_failed(
            "FFmpeg exited with non-zero status",
            Some("Error reinitializing filters!".to_string()),
            Some(1),
        ));
        assert_eq!(err.stage(), Some(Stage::Render));
        assert_eq!(err.diagnostic(), Some("Error reinitializing filters!"));
    }
}
