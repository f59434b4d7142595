//! Render request payload.
//!
//! One pipeline run is driven by a single JSON payload carrying the
//! narration script, a background-video reference, a display title and a
//! timestamp token used for output naming.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a background video, one of three kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VideoReference {
    /// Direct HTTP(S) URL to a video file (e.g. a Pexels asset link).
    DirectUrl { url: String },
    /// Hosted-platform video id, resolved through yt-dlp.
    Youtube { video_id: String },
    /// Google Drive share link in one of the known URL shapes.
    Drive { url: String },
}

impl VideoReference {
    /// Short name of the reference kind, used in logs and errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            VideoReference::DirectUrl { .. } => "direct_url",
            VideoReference::Youtube { .. } => "youtube",
            VideoReference::Drive { .. } => "drive",
        }
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoReference::DirectUrl { url } => write!(f, "direct_url({})", url),
            VideoReference::Youtube { video_id } => write!(f, "youtube({})", video_id),
            VideoReference::Drive { url } => write!(f, "drive({})", url),
        }
    }
}

/// The full input payload for one render run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Narration script, also the source of subtitle text.
    pub script: String,
    /// Display title; sanitized into the output file name.
    pub title: String,
    /// Timestamp token appended to the output file name.
    pub timestamp: String,
    /// Background video reference.
    pub video: VideoReference,
}

impl RenderRequest {
    /// Parse a request from a JSON payload string.
    ///
    /// Any missing required field is a deserialization error; callers
    /// treat that as malformed input and abort before any external call.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_youtube_payload() {
        let payload = r#"{
            "script": "Hello world.",
            "title": "My Story",
            "timestamp": "20240101_120000",
            "video": {"kind": "youtube", "video_id": "dQw4w9WgXcQ"}
        }"#;

        let request = RenderRequest::from_json(payload).unwrap();
        assert_eq!(request.title, "My Story");
        assert_eq!(
            request.video,
            VideoReference::Youtube {
                video_id: "dQw4w9WgXcQ".to_string()
            }
        );
    }

    #[test]
    fn test_parse_direct_url_payload() {
        let payload = r#"{
            "script": "A story.",
            "title": "T",
            "timestamp": "ts",
            "video": {"kind": "direct_url", "url": "https://example.com/bg.mp4"}
        }"#;

        let request = RenderRequest::from_json(payload).unwrap();
        assert_eq!(request.video.kind_name(), "direct_url");
    }

    #[test]
    fn test_parse_drive_payload() {
        let payload = r#"{
            "script": "A story.",
            "title": "T",
            "timestamp": "ts",
            "video": {"kind": "drive", "url": "https://drive.google.com/file/d/abc123/view"}
        }"#;

        let request = RenderRequest::from_json(payload).unwrap();
        assert_eq!(request.video.kind_name(), "drive");
    }

    #[test]
    fn test_missing_field_is_error() {
        let payload = r#"{"script": "x", "title": "y"}"#;
        assert!(RenderRequest::from_json(payload).is_err());
    }

    #[test]
    fn test_unknown_reference_kind_is_error() {
        let payload = r#"{
            "script": "x",
            "title": "y",
            "timestamp": "z",
            "video": {"kind": "vimeo", "url": "https://vimeo.com/1"}
        }"#;
        assert!(RenderRequest::from_json(payload).is_err());
    }

    #[test]
    fn test_reference_roundtrip() {
        let reference = VideoReference::Drive {
            url: "https://drive.google.com/open?id=xyz".to_string(),
        };
        let json = serde_json::to_string(&reference).unwrap();
        let back: VideoReference = serde_json::from_str(&json).unwrap();
        assert_eq!(reference, back);
    }
}
