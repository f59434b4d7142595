//! Hosted-platform download using yt-dlp.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{MediaError, MediaResult};

/// Preferred format: best streams at or below 1080p in an mp4 container.
pub const PRIMARY_FORMAT: &str =
    "bestvideo[height<=1080][ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";

/// Looser fallback format used after a primary-format failure.
pub const FALLBACK_FORMAT: &str = "best[height<=720]/best";

/// Download a video by platform id using yt-dlp.
///
/// One retry with a looser, lower-resolution format constraint; the
/// second failure is fatal.
pub async fn download_youtube(video_id: &str, output_path: &Path) -> MediaResult<()> {
    which::which("yt-dlp").map_err(|_| MediaError::YtDlpNotFound)?;

    let url = format!("https://www.youtube.com/watch?v={}", video_id);
    info!(video_id = %video_id, "Downloading video with yt-dlp");

    match run_ytdlp(&url, PRIMARY_FORMAT, output_path).await {
        Ok(()) => Ok(()),
        Err(e) => {
            warn!(
                error = %e,
                "yt-dlp failed with the preferred format, retrying with fallback format"
            );
            // Partial output from the failed attempt must not mask the retry
            if output_path.exists() {
                tokio::fs::remove_file(output_path).await.ok();
            }
            run_ytdlp(&url, FALLBACK_FORMAT, output_path).await
        }
    }
}

/// Build the yt-dlp argument list for one attempt.
pub(crate) fn build_ytdlp_args(url: &str, format: &str, output_path: &Path) -> Vec<String> {
    vec![
        "--no-playlist".to_string(),
        "-f".to_string(),
        format.to_string(),
        "-o".to_string(),
        output_path.to_string_lossy().to_string(),
        url.to_string(),
    ]
}

async fn run_ytdlp(url: &str, format: &str, output_path: &Path) -> MediaResult<()> {
    let args = build_ytdlp_args(url, format, output_path);
    debug!("Running yt-dlp: yt-dlp {}", args.join(" "));

    let output = Command::new("yt-dlp")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp stderr: {}", stderr);
        return Err(MediaError::download_failed(format!(
            "yt-dlp failed: {}",
            stderr.lines().last().unwrap_or("Unknown error")
        )));
    }

    if !output_path.exists() {
        return Err(MediaError::download_failed("Output file not created"));
    }

    let file_size = output_path.metadata()?.len();
    info!(
        output = %output_path.display(),
        size_mb = file_size as f64 / (1024.0 * 1024.0),
        "Downloaded video with yt-dlp"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_primary_format_carries_resolution_ceiling() {
        assert!(PRIMARY_FORMAT.contains("height<=1080"));
        assert!(PRIMARY_FORMAT.contains("ext=mp4"));
    }

    #[test]
    fn test_fallback_format_is_looser() {
        assert!(FALLBACK_FORMAT.contains("height<=720"));
        assert!(!FALLBACK_FORMAT.contains("ext=mp4"));
    }

    #[test]
    fn test_build_args() {
        let args = build_ytdlp_args(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            PRIMARY_FORMAT,
            &PathBuf::from("/work/background.mp4"),
        );

        assert_eq!(args[0], "--no-playlist");
        let f_pos = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[f_pos + 1], PRIMARY_FORMAT);
        assert!(args.contains(&"/work/background.mp4".to_string()));
        assert_eq!(
            args.last().unwrap(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }
}
