//! Shared data models for the ReelSmith renderer.
//!
//! This crate provides Serde-serializable types for:
//! - The render request payload and its video reference variants
//! - Media assets (audio, video) and the 9:16 crop spec
//! - Caption events and subtitle styling
//! - Encoding configuration
//! - Publish results and output naming

pub mod asset;
pub mod caption;
pub mod crop;
pub mod encoding;
pub mod naming;
pub mod publish;
pub mod request;
pub mod style;
pub mod utils;

// Re-export common types
pub use asset::{AudioAsset, VideoAsset};
pub use caption::CaptionEvent;
pub use crop::CropSpec;
pub use encoding::EncodingConfig;
pub use naming::{output_file_name, sanitize_title};
pub use publish::PublishResult;
pub use request::{RenderRequest, VideoReference};
pub use style::SubtitleStyle;
pub use utils::{extract_drive_file_id, DriveIdError, DriveIdResult};
