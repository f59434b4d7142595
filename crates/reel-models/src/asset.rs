//! Local media assets produced during a pipeline run.
//!
//! Assets live inside the run's scoped working directory and are removed
//! with it; only paths and probed facts travel between stages.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A synthesized narration track with its probed duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioAsset {
    /// Path inside the working directory.
    pub path: PathBuf,
    /// Duration in seconds, always > 0 for a usable track.
    pub duration_secs: f64,
}

impl AudioAsset {
    pub fn new(path: impl Into<PathBuf>, duration_secs: f64) -> Self {
        Self {
            path: path.into(),
            duration_secs,
        }
    }
}

/// A downloaded background video with its probed frame dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAsset {
    /// Path inside the working directory.
    pub path: PathBuf,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl VideoAsset {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    /// Width-over-height ratio of the source frame.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        let video = VideoAsset::new("/tmp/bg.mp4", 1920, 1080);
        assert!((video.aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
    }
}
