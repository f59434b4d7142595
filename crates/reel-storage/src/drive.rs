//! Google Drive publisher.
//!
//! Authenticates as a service account (RS256 JWT exchanged for an OAuth
//! access token) and uploads the rendered file into a configured folder
//! with Drive's multipart upload.

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use reel_models::PublishResult;

use crate::error::{StorageError, StorageResult};
use crate::publisher::Publisher;

/// OAuth scope for Drive uploads.
const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Default OAuth token endpoint.
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Drive multipart upload endpoint.
const UPLOAD_ENDPOINT: &str =
    "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart&fields=id,name,webViewLink";

/// Boundary for the multipart/related upload body.
const MULTIPART_BOUNDARY: &str = "reel_upload_boundary";

/// Service account key material, as issued by the cloud console.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Configuration for the Drive publisher.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// Service account key
    pub key: ServiceAccountKey,
    /// Destination folder id
    pub folder_id: String,
}

impl DriveConfig {
    /// Create config from environment variables.
    ///
    /// Credentials come from `GOOGLE_CREDENTIALS_JSON` (inline JSON) or,
    /// when unset, from a `service_account.json` file in the working
    /// directory. The destination folder is `OUTPUT_FOLDER_ID`.
    pub fn from_env() -> StorageResult<Self> {
        let raw = match std::env::var("GOOGLE_CREDENTIALS_JSON") {
            Ok(inline) => inline,
            Err(_) => std::fs::read_to_string("service_account.json").map_err(|e| {
                StorageError::config_error(format!(
                    "GOOGLE_CREDENTIALS_JSON not set and service_account.json unreadable: {}",
                    e
                ))
            })?,
        };

        let key: ServiceAccountKey = serde_json::from_str(&raw)
            .map_err(|e| StorageError::config_error(format!("Invalid service account key: {}", e)))?;

        let folder_id = std::env::var("OUTPUT_FOLDER_ID")
            .map_err(|_| StorageError::config_error("OUTPUT_FOLDER_ID not set"))?;

        Ok(Self { key, folder_id })
    }
}

/// JWT claims for the service-account grant.
#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Drive file resource returned after upload.
#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    name: String,
    #[serde(rename = "webViewLink")]
    web_view_link: Option<String>,
}

/// Google Drive publisher.
pub struct DrivePublisher {
    config: DriveConfig,
    http: reqwest::Client,
}

impl DrivePublisher {
    /// Create a publisher from configuration.
    pub fn new(config: DriveConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self::new(DriveConfig::from_env()?))
    }

    /// Exchange a signed JWT for an access token.
    async fn access_token(&self) -> StorageResult<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &self.config.key.client_email,
            scope: DRIVE_SCOPE,
            aud: &self.config.key.token_uri,
            iat: now,
            exp: now + 3600,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.config.key.private_key.as_bytes())
            .map_err(|e| StorageError::auth_failed(format!("Invalid private key: {}", e)))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| StorageError::auth_failed(format!("JWT signing failed: {}", e)))?;

        let response = self
            .http
            .post(&self.config.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::auth_failed(format!(
                "Token exchange returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await?;
        debug!("Obtained Drive access token");
        Ok(token.access_token)
    }
}

/// Build the multipart/related body for a Drive upload.
fn build_multipart_body(metadata: &serde_json::Value, media: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(media.len() + 512);
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata.to_string().as_bytes());
    body.extend_from_slice(format!("\r\n--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Type: video/mp4\r\n\r\n");
    body.extend_from_slice(media);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

#[async_trait]
impl Publisher for DrivePublisher {
    async fn publish(&self, local_path: &Path, file_name: &str) -> StorageResult<PublishResult> {
        let token = self.access_token().await?;
        let media = tokio::fs::read(local_path).await?;

        info!(
            file = %local_path.display(),
            name = file_name,
            folder_id = %self.config.folder_id,
            size_mb = media.len() as f64 / (1024.0 * 1024.0),
            "Uploading to Drive"
        );

        let metadata = serde_json::json!({
            "name": file_name,
            "parents": [self.config.folder_id],
        });
        let body = build_multipart_body(&metadata, &media);

        let response = self
            .http
            .post(UPLOAD_ENDPOINT)
            .bearer_auth(&token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::upload_failed(format!(
                "Drive upload returned {}: {}",
                status, body
            )));
        }

        let file: DriveFile = response.json().await?;
        info!(file_id = %file.id, "Uploaded to Drive");

        Ok(PublishResult::new(file.id, file.name, file.web_view_link))
    }

    fn destination_name(&self) -> &'static str {
        "drive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_account_key_default_token_uri() {
        let key: ServiceAccountKey = serde_json::from_str(
            r#"{"client_email": "svc@project.iam.gserviceaccount.com", "private_key": "---"}"#,
        )
        .unwrap();
        assert_eq!(key.token_uri, DEFAULT_TOKEN_URI);
    }

    #[test]
    fn test_multipart_body_layout() {
        let metadata = serde_json::json!({"name": "short.mp4", "parents": ["folder1"]});
        let body = build_multipart_body(&metadata, b"MEDIA");
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with(&format!("--{}", MULTIPART_BOUNDARY)));
        assert!(text.contains(r#""name":"short.mp4""#));
        assert!(text.contains("Content-Type: video/mp4"));
        assert!(text.contains("MEDIA"));
        assert!(text.ends_with(&format!("--{}--\r\n", MULTIPART_BOUNDARY)));
    }

    #[test]
    fn test_drive_file_parsing() {
        let file: DriveFile = serde_json::from_str(
            r#"{"id": "abc", "name": "short.mp4", "webViewLink": "https://drive.google.com/file/d/abc/view"}"#,
        )
        .unwrap();
        assert_eq!(file.id, "abc");
        assert!(file.web_view_link.is_some());

        let no_link: DriveFile =
            serde_json::from_str(r#"{"id": "abc", "name": "short.mp4"}"#).unwrap();
        assert!(no_link.web_view_link.is_none());
    }
}
