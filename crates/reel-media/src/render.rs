//! Single-pass render of the final vertical video.
//!
//! One FFmpeg invocation composites everything: the background video
//! loops indefinitely, is center-cropped to 9:16 and scaled to the
//! output canvas, the caption track is burned in, and the narration is
//! muxed on top. The narration is the timing authority; the output is
//! truncated to its duration.

use std::path::{Path, PathBuf};
use tracing::info;

use reel_models::encoding::{OUTPUT_HEIGHT, OUTPUT_WIDTH};
use reel_models::{AudioAsset, CropSpec, EncodingConfig, VideoAsset};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::crop::crop_for;
use crate::error::{MediaError, MediaResult};

/// Full parameter set for one render invocation.
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// Narration track (timing authority).
    pub audio: AudioAsset,
    /// Background video with probed dimensions.
    pub video: VideoAsset,
    /// Caption track file to burn in.
    pub caption_track: PathBuf,
    /// Output file path.
    pub output_path: PathBuf,
}

/// Render the final vertical video.
///
/// A non-zero encoder exit is fatal and not retried; the error carries
/// the encoder's diagnostic text.
pub async fn render_short(job: &RenderJob, encoding: &EncodingConfig) -> MediaResult<PathBuf> {
    let crop = crop_for(job.video.width, job.video.height);

    info!(
        source = %job.video.path.display(),
        source_width = job.video.width,
        source_height = job.video.height,
        crop_width = crop.width,
        crop_height = crop.height,
        duration = job.audio.duration_secs,
        "Rendering vertical video"
    );

    let filter = build_filter_graph(&crop, &job.caption_track);

    let cmd = FfmpegCommand::new(&job.output_path)
        .looped_input(&job.video.path)
        .input(&job.audio.path)
        .filter_complex(filter)
        .map("[v]")
        .map("1:a")
        .duration(job.audio.duration_secs)
        .output_args(encoding.to_ffmpeg_args());

    FfmpegRunner::new().run(&cmd).await?;

    if !job.output_path.exists() {
        return Err(MediaError::ffmpeg_failed(
            "FFmpeg reported success but produced no output file",
            None,
            None,
        ));
    }

    let size = job.output_path.metadata()?.len();
    info!(
        output = %job.output_path.display(),
        size_mb = size as f64 / (1024.0 * 1024.0),
        "Rendered video"
    );

    Ok(job.output_path.clone())
}

/// Build the composite video filter graph.
pub fn build_filter_graph(crop: &CropSpec, caption_track: &Path) -> String {
    format!(
        "[0:v]{},scale={}:{},setsar=1,ass='{}'[v]",
        crop.to_filter(),
        OUTPUT_WIDTH,
        OUTPUT_HEIGHT,
        escape_filter_path(caption_track),
    )
}

/// Escape a file path for embedding in a filter-graph string.
///
/// Backslashes become forward slashes; colons and single quotes are
/// significant to the filter mini-language and get escaped.
pub fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_graph() {
        let crop = CropSpec::new(607, 1080);
        let filter = build_filter_graph(&crop, Path::new("/tmp/work/subtitles.ass"));
        assert_eq!(
            filter,
            "[0:v]crop=607:1080,scale=1080:1920,setsar=1,ass='/tmp/work/subtitles.ass'[v]"
        );
    }

    #[test]
    fn test_escape_filter_path() {
        assert_eq!(
            escape_filter_path(Path::new("/tmp/subs.ass")),
            "/tmp/subs.ass"
        );
        assert_eq!(
            escape_filter_path(Path::new("C:\\work\\subs.ass")),
            "C\\:/work/subs.ass"
        );
        assert_eq!(
            escape_filter_path(Path::new("/tmp/it's here.ass")),
            "/tmp/it\\'s here.ass"
        );
    }

    #[test]
    fn test_render_command_shape() {
        let job = RenderJob {
            audio: AudioAsset::new("/work/audio.mp3", 42.5),
            video: VideoAsset::new("/work/background.mp4", 1920, 1080),
            caption_track: PathBuf::from("/work/subtitles.ass"),
            output_path: PathBuf::from("/work/out.mp4"),
        };

        let crop = crop_for(job.video.width, job.video.height);
        let filter = build_filter_graph(&crop, &job.caption_track);
        let cmd = FfmpegCommand::new(&job.output_path)
            .looped_input(&job.video.path)
            .input(&job.audio.path)
            .filter_complex(filter)
            .map("[v]")
            .map("1:a")
            .duration(job.audio.duration_secs)
            .output_args(EncodingConfig::default().to_ffmpeg_args());

        let args = cmd.build_args();
        assert!(args.contains(&"-stream_loop".to_string()));
        assert!(args.contains(&"42.500".to_string()));
        assert!(args.contains(&"[v]".to_string()));
        assert!(args.contains(&"1:a".to_string()));
        assert!(args.contains(&"+faststart".to_string()));
        assert!(args
            .iter()
            .any(|a| a.contains("crop=607:1080") && a.contains("ass='/work/subtitles.ass'")));
    }
}
