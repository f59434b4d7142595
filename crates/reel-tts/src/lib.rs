//! Speech synthesis adapter.
//!
//! Wraps the `edge-tts` CLI as an opaque speech engine: script text in,
//! narration audio file out. Duration is probed downstream; this crate
//! only guarantees a non-empty media file.

pub mod error;
pub mod synth;
pub mod voice;

pub use error::{TtsError, TtsResult};
pub use synth::SpeechSynthesizer;
pub use voice::{VoiceProfile, DEFAULT_VOICE};
