//! The rendering pipeline orchestrator.
//!
//! Strictly linear: synthesize, acquire, caption, render, publish. Every
//! stage blocks until done; the narration duration from the first stage
//! gates captioning and the render cut. Any stage failure aborts the run
//! and nothing is published. All intermediate assets live in one scoped
//! working directory that is removed on every exit path.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use reel_media::{
    acquire, audio_duration, generate_caption_events, render_short, video_dimensions,
    write_caption_track, RenderJob,
};
use reel_models::{output_file_name, AudioAsset, PublishResult, RenderRequest, VideoAsset};
use reel_storage::Publisher;
use reel_tts::SpeechSynthesizer;

use crate::config::WorkerConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::logging::JobLogger;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Synthesize,
    Acquire,
    Caption,
    Render,
    Publish,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: &'static [Stage] = &[
        Stage::Synthesize,
        Stage::Acquire,
        Stage::Caption,
        Stage::Render,
        Stage::Publish,
    ];

    /// Stage name for logs and error reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Synthesize => "synthesize",
            Stage::Acquire => "acquire",
            Stage::Caption => "caption",
            Stage::Render => "render",
            Stage::Publish => "publish",
        }
    }

    /// One-based position of this stage.
    pub fn position(&self) -> usize {
        Stage::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The pipeline orchestrator.
pub struct Pipeline {
    config: WorkerConfig,
    synthesizer: SpeechSynthesizer,
    publisher: Arc<dyn Publisher>,
}

impl Pipeline {
    /// Create a pipeline with its collaborators.
    pub fn new(
        config: WorkerConfig,
        synthesizer: SpeechSynthesizer,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            config,
            synthesizer,
            publisher,
        }
    }

    /// Run one render request start to finish.
    ///
    /// Returns the publisher's result unchanged, or the first stage
    /// failure. No partial artifact survives a failure; the scoped work
    /// directory is dropped on all paths.
    pub async fn run(&self, request: &RenderRequest) -> PipelineResult<PublishResult> {
        let job_id = Uuid::new_v4().to_string();
        let logger = JobLogger::new(&job_id, "render_short");
        logger.log_start(&format!("\"{}\"", request.title));

        tokio::fs::create_dir_all(&self.config.work_dir).await?;
        let work_dir = tempfile::Builder::new()
            .prefix("reel-")
            .tempdir_in(&self.config.work_dir)?;

        let result = self.run_stages(request, work_dir.path(), &logger).await;

        match &result {
            Ok(publish) => logger.log_completion(&format!(
                "{} -> {}",
                publish.name,
                publish.url.as_deref().unwrap_or("(no link)")
            )),
            Err(e) => logger.log_error(&format!(
                "stage {} failed: {}",
                e.stage().map(|s| s.as_str()).unwrap_or("setup"),
                e
            )),
        }

        // work_dir drops here, removing every intermediate asset
        result
    }

    async fn run_stages(
        &self,
        request: &RenderRequest,
        work_dir: &std::path::Path,
        logger: &JobLogger,
    ) -> PipelineResult<PublishResult> {
        let total = Stage::ALL.len();

        // Synthesize
        logger.log_progress(&format!(
            "[{}/{}] Synthesizing narration",
            Stage::Synthesize.position(),
            total
        ));
        let audio_path = work_dir.join("audio.mp3");
        self.synthesizer
            .synthesize(&request.script, &audio_path)
            .await
            .map_err(PipelineError::synthesis)?;
        let duration = audio_duration(&audio_path)
            .await
            .map_err(PipelineError::synthesis)?;
        let audio = AudioAsset::new(audio_path, duration);
        logger.log_progress(&format!("Narration duration: {:.1}s", duration));

        // Acquire
        logger.log_progress(&format!(
            "[{}/{}] Acquiring background video",
            Stage::Acquire.position(),
            total
        ));
        let video_path = acquire(&request.video, work_dir)
            .await
            .map_err(PipelineError::acquisition)?;
        let (width, height) = video_dimensions(&video_path)
            .await
            .map_err(PipelineError::acquisition)?;
        let video = VideoAsset::new(video_path, width, height);

        // Caption
        logger.log_progress(&format!(
            "[{}/{}] Generating caption track",
            Stage::Caption.position(),
            total
        ));
        let events = generate_caption_events(&request.script, audio.duration_secs);
        let caption_track = work_dir.join("subtitles.ass");
        write_caption_track(&events, &self.config.subtitle_style, &caption_track)
            .await
            .map_err(PipelineError::caption)?;

        // Render
        logger.log_progress(&format!(
            "[{}/{}] Rendering final video",
            Stage::Render.position(),
            total
        ));
        let file_name = output_file_name(&request.title, &request.timestamp);
        let job = RenderJob {
            audio,
            video,
            caption_track,
            output_path: work_dir.join(&file_name),
        };
        let rendered = render_short(&job, &self.config.encoding)
            .await
            .map_err(PipelineError::Render)?;

        // Publish
        logger.log_progress(&format!(
            "[{}/{}] Publishing to {}",
            Stage::Publish.position(),
            total,
            self.publisher.destination_name()
        ));
        let publish = self
            .publisher
            .publish(&rendered, &file_name)
            .await
            .map_err(PipelineError::Publish)?;

        Ok(publish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_and_positions() {
        assert_eq!(Stage::ALL.len(), 5);
        assert_eq!(Stage::Synthesize.position(), 1);
        assert_eq!(Stage::Publish.position(), 5);
        assert_eq!(Stage::Render.to_string(), "render");
    }
}
