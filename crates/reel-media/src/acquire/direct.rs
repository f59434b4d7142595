//! Direct-URL download.

use std::path::Path;
use tracing::info;

use crate::acquire::stream_to_file;
use crate::error::MediaResult;

/// Stream-download a video from a direct URL.
///
/// A non-2xx response is fatal; there is no retry for this kind.
pub async fn download_direct(url: &str, output_path: &Path) -> MediaResult<()> {
    info!(url = %url, "Downloading video from direct URL");

    let response = reqwest::get(url).await?.error_for_status()?;
    let downloaded = stream_to_file(response, output_path).await?;

    info!(
        output = %output_path.display(),
        size_mb = downloaded as f64 / (1024.0 * 1024.0),
        "Downloaded video"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_download_writes_body() {
        let server = MockServer::start().await;
        let body = vec![0xABu8; 64 * 1024];
        Mock::given(method("GET"))
            .and(path("/bg.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("background.mp4");

        download_direct(&format!("{}/bg.mp4", server.uri()), &dest)
            .await
            .unwrap();

        let written = std::fs::read(&dest).unwrap();
        assert_eq!(written, body);
    }

    #[tokio::test]
    async fn test_download_fails_on_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.mp4"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("background.mp4");

        let result = download_direct(&format!("{}/missing.mp4", server.uri()), &dest).await;
        assert!(result.is_err());
    }
}
