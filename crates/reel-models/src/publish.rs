//! Publish result, opaque to the pipeline core.

use serde::{Deserialize, Serialize};

/// Outcome of publishing the rendered file to a remote store.
///
/// Produced by the publisher and surfaced to the caller unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResult {
    /// Remote identifier of the stored object.
    pub id: String,
    /// Display name the store recorded.
    pub name: String,
    /// Access URL, when the store provides one.
    pub url: Option<String>,
}

impl PublishResult {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url,
        }
    }
}
