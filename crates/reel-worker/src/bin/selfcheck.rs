//! Environment self-check for the rendering worker.
//!
//! Verifies the work directory is writable and the external tools the
//! pipeline shells out to are present. Acquisition fallbacks are
//! reported but not required; a missing one only narrows the ladder.

use std::path::Path;

use reel_media::{check_ffmpeg, check_ffprobe};
use reel_worker::WorkerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WorkerConfig::from_env();

    println!(
        "reel-selfcheck: starting with work_dir={}",
        config.work_dir.display()
    );
    ensure_workdir(&config.work_dir).await?;

    check_ffmpeg()?;
    check_ffprobe()?;
    which::which("edge-tts")
        .map_err(|_| anyhow::anyhow!("required tool edge-tts not found in PATH"))?;

    for tool in ["yt-dlp", "gdown", "rclone"] {
        if which::which(tool).is_err() {
            println!("reel-selfcheck: optional tool {} not found", tool);
        }
    }

    println!("reel-selfcheck: ok");
    Ok(())
}

async fn ensure_workdir<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
