//! Narration synthesis via the edge-tts CLI.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{TtsError, TtsResult};
use crate::voice::VoiceProfile;

/// Speech synthesizer backed by the `edge-tts` command-line tool.
#[derive(Debug, Clone)]
pub struct SpeechSynthesizer {
    profile: VoiceProfile,
}

impl SpeechSynthesizer {
    /// Create a synthesizer with the given voice profile.
    pub fn new(profile: VoiceProfile) -> Self {
        Self { profile }
    }

    /// Voice profile this synthesizer was constructed with.
    pub fn profile(&self) -> &VoiceProfile {
        &self.profile
    }

    /// Synthesize `script` into an audio file at `output_path`.
    ///
    /// This is the single suspend point of a pipeline run: one awaited
    /// call against the external synthesis service, no retry.
    pub async fn synthesize(&self, script: &str, output_path: impl AsRef<Path>) -> TtsResult<()> {
        let output_path = output_path.as_ref();

        which::which("edge-tts").map_err(|_| TtsError::EdgeTtsNotFound)?;

        info!(voice = %self.profile.voice, "Synthesizing narration");

        let args = self.build_args(script, output_path);
        debug!("Running edge-tts: edge-tts {}", args.join(" "));

        let output = Command::new("edge-tts")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            debug!("edge-tts stderr: {}", stderr);
            return Err(TtsError::synthesis_failed(
                format!(
                    "edge-tts exited with status {}",
                    output.status.code().unwrap_or(-1)
                ),
                Some(stderr),
            ));
        }

        // A zero-length file means the service produced nothing usable
        let size = tokio::fs::metadata(output_path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if size == 0 {
            return Err(TtsError::EmptyOutput(output_path.to_path_buf()));
        }

        info!(
            output = %output_path.display(),
            size_kb = size as f64 / 1024.0,
            "Synthesized narration"
        );

        Ok(())
    }

    /// Build the edge-tts argument list.
    fn build_args(&self, script: &str, output_path: &Path) -> Vec<String> {
        let mut args = vec![
            "--voice".to_string(),
            self.profile.voice.clone(),
            "--text".to_string(),
            script.to_string(),
        ];

        if let Some(ref rate) = self.profile.rate {
            args.push(format!("--rate={}", rate));
        }
        if let Some(ref pitch) = self.profile.pitch {
            args.push(format!("--pitch={}", pitch));
        }

        args.push("--write-media".to_string());
        args.push(output_path.to_string_lossy().to_string());

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_args_default_voice() {
        let synth = SpeechSynthesizer::new(VoiceProfile::default());
        let args = synth.build_args("Hello world.", &PathBuf::from("/tmp/audio.mp3"));

        assert_eq!(args[0], "--voice");
        assert_eq!(args[1], "en-US-ChristopherNeural");
        assert!(args.contains(&"--text".to_string()));
        assert!(args.contains(&"Hello world.".to_string()));
        assert!(args.contains(&"--write-media".to_string()));
        assert!(args.contains(&"/tmp/audio.mp3".to_string()));
    }

    #[test]
    fn test_build_args_with_prosody() {
        let profile = VoiceProfile {
            voice: "en-US-JennyNeural".to_string(),
            rate: Some("+10%".to_string()),
            pitch: Some("-2Hz".to_string()),
        };
        let synth = SpeechSynthesizer::new(profile);
        let args = synth.build_args("Hi.", &PathBuf::from("out.mp3"));

        assert!(args.contains(&"--rate=+10%".to_string()));
        assert!(args.contains(&"--pitch=-2Hz".to_string()));
    }
}
