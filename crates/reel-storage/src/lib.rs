//! Publish targets for rendered videos.
//!
//! This crate provides:
//! - The `Publisher` contract the pipeline hands its artifact to
//! - A Google Drive publisher (service-account auth over REST)
//! - An R2/S3 publisher with presigned access URLs
//! - Destination selection from configuration

pub mod drive;
pub mod error;
pub mod publisher;
pub mod r2;

pub use drive::{DriveConfig, DrivePublisher};
pub use error::{StorageError, StorageResult};
pub use publisher::{publisher_from_env, Destination, Publisher};
pub use r2::{R2Config, R2Publisher};
