//! Worker configuration.

use std::path::PathBuf;

use reel_models::{EncodingConfig, SubtitleStyle};
use reel_storage::Destination;

/// Worker configuration.
///
/// Voice, styling and encoding are explicit state built once at startup
/// and passed into the components that need them.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base directory for per-run scoped working directories
    pub work_dir: PathBuf,
    /// Publish destination kind
    pub destination: Destination,
    /// Encoder settings for the final render
    pub encoding: EncodingConfig,
    /// Burned-in caption styling
    pub subtitle_style: SubtitleStyle,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("/tmp/reelsmith"),
            destination: Destination::Drive,
            encoding: EncodingConfig::default(),
            subtitle_style: SubtitleStyle::default(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORKER_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/reelsmith")),
            destination: std::env::var("DESTINATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Destination::Drive),
            encoding: EncodingConfig::default(),
            subtitle_style: SubtitleStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorkerConfig::default();
        assert_eq!(config.destination, Destination::Drive);
        assert_eq!(config.encoding.crf, 23);
        assert_eq!(config.subtitle_style.font, "Impact");
    }
}
