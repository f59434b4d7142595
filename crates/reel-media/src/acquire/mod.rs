//! Background-video acquisition.
//!
//! Resolves a [`VideoReference`] of any kind into a local file. Each kind
//! has its own fallback ladder with a fixed, small retry budget;
//! intermediate failures are logged and only the final attempt's error
//! surfaces.

mod direct;
mod drive;
mod youtube;

pub use direct::download_direct;
pub use drive::download_drive;
pub use youtube::{download_youtube, FALLBACK_FORMAT, PRIMARY_FORMAT};

use std::path::{Path, PathBuf};
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use reel_models::VideoReference;

use crate::error::{MediaError, MediaResult};

/// File name of the acquired background video inside the work directory.
pub const BACKGROUND_FILE_NAME: &str = "background.mp4";

/// Acquire the background video for a reference into `dest_dir`.
pub async fn acquire(reference: &VideoReference, dest_dir: impl AsRef<Path>) -> MediaResult<PathBuf> {
    let dest = dest_dir.as_ref().join(BACKGROUND_FILE_NAME);

    info!(reference = %reference, "Acquiring background video");

    match reference {
        VideoReference::DirectUrl { url } => direct::download_direct(url, &dest).await?,
        VideoReference::Youtube { video_id } => youtube::download_youtube(video_id, &dest).await?,
        VideoReference::Drive { url } => drive::download_drive(url, &dest).await?,
    }

    verify_download(&dest)?;
    Ok(dest)
}

/// Check that an acquired file exists and is non-empty.
pub(crate) fn verify_download(path: &Path) -> MediaResult<()> {
    let size = path.metadata().map(|m| m.len()).unwrap_or(0);
    if size == 0 {
        return Err(MediaError::download_failed(format!(
            "Acquired file {} is missing or empty",
            path.display()
        )));
    }
    Ok(())
}

/// Stream an HTTP response body to a file with progress accounting.
///
/// Progress is logged at quarter marks when the total size is known.
pub(crate) async fn stream_to_file(
    response: reqwest::Response,
    output_path: &Path,
) -> MediaResult<u64> {
    let total = response.content_length().filter(|&len| len > 0);

    let mut file = tokio::fs::File::create(output_path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;
    let mut next_mark = 0.25_f64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(total) = total {
            let fraction = downloaded as f64 / total as f64;
            if fraction >= next_mark {
                debug!(
                    percent = (fraction * 100.0) as u32,
                    downloaded_mb = downloaded as f64 / (1024.0 * 1024.0),
                    "Download progress"
                );
                next_mark += 0.25;
            }
        }
    }

    file.flush().await?;
    Ok(downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_download_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nothing.mp4");
        assert!(verify_download(&missing).is_err());
    }

    #[test]
    fn test_verify_download_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.mp4");
        std::fs::write(&empty, b"").unwrap();
        assert!(verify_download(&empty).is_err());
    }

    #[test]
    fn test_verify_download_accepts_data() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bg.mp4");
        std::fs::write(&file, b"not really video").unwrap();
        assert!(verify_download(&file).is_ok());
    }
}
