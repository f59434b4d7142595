//! Timed caption events.

use serde::{Deserialize, Serialize};

/// One on-screen text chunk with start/end offsets into the audio track.
///
/// A generated sequence is ordered, non-overlapping and contiguous over
/// `[0, duration]`; the final event's end equals the audio duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEvent {
    /// Start offset in seconds.
    pub start_secs: f64,
    /// End offset in seconds, strictly greater than `start_secs` for any
    /// positive audio duration.
    pub end_secs: f64,
    /// Display text, already upper-cased and stripped of markup-breaking
    /// characters.
    pub text: String,
}

impl CaptionEvent {
    pub fn new(start_secs: f64, end_secs: f64, text: impl Into<String>) -> Self {
        Self {
            start_secs,
            end_secs,
            text: text.into(),
        }
    }

    /// On-screen duration of this event in seconds.
    pub fn duration(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}
