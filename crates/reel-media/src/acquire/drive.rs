//! Cloud-drive download with a three-step fallback ladder.
//!
//! Order is fixed: rclone, then gdown, then a raw HTTP GET with the
//! confirmation-token dance Drive uses for its large-file interstitial.
//! Only the final fallback's failure surfaces to the caller.

use regex::Regex;
use std::path::Path;
use std::process::Stdio;
use std::sync::OnceLock;
use tokio::process::Command;
use tracing::{debug, info, warn};

use reel_models::extract_drive_file_id;

use crate::acquire::{stream_to_file, verify_download};
use crate::error::{MediaError, MediaResult};

/// Drive's direct-download endpoint.
const DRIVE_DOWNLOAD_ENDPOINT: &str = "https://drive.google.com/uc";

/// Default rclone remote name for the Drive backend.
const DEFAULT_RCLONE_REMOTE: &str = "gdrive";

/// Download a video from a Drive share link.
pub async fn download_drive(url: &str, output_path: &Path) -> MediaResult<()> {
    let file_id =
        extract_drive_file_id(url).map_err(|e| MediaError::InvalidReference(e.to_string()))?;

    info!(file_id = %file_id, "Acquiring video from Drive");

    match try_rclone(&file_id, output_path).await {
        Ok(()) => return Ok(()),
        Err(e) => warn!(error = %e, "rclone transfer failed, falling back to gdown"),
    }

    match try_gdown(&file_id, output_path).await {
        Ok(()) => return Ok(()),
        Err(e) => warn!(error = %e, "gdown failed, falling back to direct HTTP download"),
    }

    download_with_confirm_token(&file_id, output_path).await
}

/// Primary strategy: one deterministic rclone transfer by file id.
async fn try_rclone(file_id: &str, output_path: &Path) -> MediaResult<()> {
    which::which("rclone")
        .map_err(|_| MediaError::download_failed("rclone not found in PATH"))?;

    let remote =
        std::env::var("DRIVE_RCLONE_REMOTE").unwrap_or_else(|_| DEFAULT_RCLONE_REMOTE.to_string());

    let args = [
        "backend".to_string(),
        "copyid".to_string(),
        format!("{}:", remote),
        file_id.to_string(),
        output_path.to_string_lossy().to_string(),
    ];
    debug!("Running rclone: rclone {}", args.join(" "));

    let output = Command::new("rclone")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::download_failed(format!(
            "rclone failed: {}",
            stderr.lines().last().unwrap_or("Unknown error")
        )));
    }

    verify_download(output_path)?;
    info!(output = %output_path.display(), "Downloaded Drive file with rclone");
    Ok(())
}

/// Secondary strategy: gdown, which handles Drive's quirks on its own.
async fn try_gdown(file_id: &str, output_path: &Path) -> MediaResult<()> {
    which::which("gdown").map_err(|_| MediaError::download_failed("gdown not found in PATH"))?;

    let url = format!("{}?id={}", DRIVE_DOWNLOAD_ENDPOINT, file_id);
    let args = [
        "--quiet".to_string(),
        url,
        "-O".to_string(),
        output_path.to_string_lossy().to_string(),
    ];
    debug!("Running gdown: gdown {}", args.join(" "));

    let output = Command::new("gdown")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::download_failed(format!(
            "gdown failed: {}",
            stderr.lines().last().unwrap_or("Unknown error")
        )));
    }

    verify_download(output_path)?;
    info!(output = %output_path.display(), "Downloaded Drive file with gdown");
    Ok(())
}

/// Final fallback: raw HTTP GET with the large-file confirmation dance.
///
/// Drive answers large-file requests with an HTML interstitial carrying a
/// confirmation token instead of the payload; the token goes into a
/// second request on the same cookie session.
async fn download_with_confirm_token(file_id: &str, output_path: &Path) -> MediaResult<()> {
    info!(file_id = %file_id, "Downloading Drive file over raw HTTP");

    let client = reqwest::Client::builder().cookie_store(true).build()?;

    let url = format!(
        "{}?export=download&id={}",
        DRIVE_DOWNLOAD_ENDPOINT,
        urlencoding::encode(file_id)
    );
    let response = client.get(&url).send().await?.error_for_status()?;

    let response = if is_html(&response) {
        let body = response.text().await?;
        let token = extract_confirm_token(&body).ok_or_else(|| {
            MediaError::download_failed("Drive confirmation token not found in interstitial page")
        })?;
        debug!(token = %token, "Re-requesting with Drive confirmation token");

        let confirmed_url = format!(
            "{}?export=download&confirm={}&id={}",
            DRIVE_DOWNLOAD_ENDPOINT,
            token,
            urlencoding::encode(file_id)
        );
        client.get(&confirmed_url).send().await?.error_for_status()?
    } else {
        response
    };

    let downloaded = stream_to_file(response, output_path).await?;
    verify_download(output_path)?;

    info!(
        output = %output_path.display(),
        size_mb = downloaded as f64 / (1024.0 * 1024.0),
        "Downloaded Drive file over HTTP"
    );
    Ok(())
}

/// Whether a response carries the HTML interstitial rather than media.
fn is_html(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("text/html"))
}

/// Pull the confirmation token out of the interstitial page.
pub(crate) fn extract_confirm_token(body: &str) -> Option<String> {
    static FORM_FIELD: OnceLock<Regex> = OnceLock::new();
    static QUERY_PARAM: OnceLock<Regex> = OnceLock::new();

    let form = FORM_FIELD
        .get_or_init(|| Regex::new(r#"name="confirm"\s+value="([0-9A-Za-z_-]+)""#).unwrap());
    if let Some(captures) = form.captures(body) {
        return Some(captures[1].to_string());
    }

    let query = QUERY_PARAM.get_or_init(|| Regex::new(r"confirm=([0-9A-Za-z_-]+)").unwrap());
    query.captures(body).map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_extract_confirm_token_from_form_field() {
        let body = r#"<form><input type="hidden" name="confirm" value="t0k3n_-A"></form>"#;
        assert_eq!(extract_confirm_token(body).as_deref(), Some("t0k3n_-A"));
    }

    #[test]
    fn test_extract_confirm_token_from_query_link() {
        let body = r#"<a href="/uc?export=download&confirm=AbC_123&id=xyz">Download anyway</a>"#;
        assert_eq!(extract_confirm_token(body).as_deref(), Some("AbC_123"));
    }

    #[test]
    fn test_extract_confirm_token_missing() {
        assert!(extract_confirm_token("<html>quota exceeded</html>").is_none());
    }

    // Exercises the confirm dance end to end against a local mock of the
    // interstitial flow (the endpoint itself lives in a const, so the
    // flow is driven through the same helpers the module uses).
    #[tokio::test]
    async fn test_interstitial_then_payload_flow() {
        let server = MockServer::start().await;
        let payload = vec![0x5Au8; 4096];

        Mock::given(method("GET"))
            .and(path("/uc"))
            .and(query_param("confirm", "tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/uc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"<a href="/uc?export=download&confirm=tok123&id=f">ok</a>"#, "text/html"),
            )
            .mount(&server)
            .await;

        let client = reqwest::Client::builder().cookie_store(true).build().unwrap();
        let first = client
            .get(format!("{}/uc?export=download&id=f", server.uri()))
            .send()
            .await
            .unwrap();
        assert!(is_html(&first));

        let token = extract_confirm_token(&first.text().await.unwrap()).unwrap();
        let second = client
            .get(format!(
                "{}/uc?export=download&confirm={}&id=f",
                server.uri(),
                token
            ))
            .send()
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("background.mp4");
        stream_to_file(second, &dest).await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), payload);
    }
}
