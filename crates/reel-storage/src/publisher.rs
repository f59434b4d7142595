//! The publish contract and destination selection.

use async_trait::async_trait;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use reel_models::PublishResult;

use crate::drive::DrivePublisher;
use crate::error::{StorageError, StorageResult};
use crate::r2::R2Publisher;

/// A remote store the pipeline can hand its finished artifact to.
///
/// The result is opaque to the pipeline and surfaced to the caller
/// unchanged.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Upload a local file under the given display name.
    async fn publish(&self, local_path: &Path, file_name: &str) -> StorageResult<PublishResult>;

    /// Short name of the destination kind, used in logs.
    fn destination_name(&self) -> &'static str;
}

/// Supported publish destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Google Drive folder via service account
    Drive,
    /// Cloudflare R2 bucket via the S3 API
    R2,
}

impl FromStr for Destination {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drive" => Ok(Destination::Drive),
            "r2" => Ok(Destination::R2),
            other => Err(StorageError::config_error(format!(
                "Unknown destination: {}",
                other
            ))),
        }
    }
}

/// Build a publisher for a destination from environment configuration.
pub async fn publisher_from_env(destination: Destination) -> StorageResult<Arc<dyn Publisher>> {
    match destination {
        Destination::Drive => Ok(Arc::new(DrivePublisher::from_env()?)),
        Destination::R2 => Ok(Arc::new(R2Publisher::from_env().await?)),
    }
}
