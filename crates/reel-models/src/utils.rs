//! Utility functions for URL parsing and validation.

/// Errors that can occur during Drive file-id extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveIdError {
    /// URL is not a Google Drive URL
    NotADriveUrl,
    /// File id not found in URL
    FileIdNotFound,
    /// File id has invalid format
    InvalidFileId,
}

impl std::fmt::Display for DriveIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriveIdError::NotADriveUrl => write!(f, "URL is not a Google Drive URL"),
            DriveIdError::FileIdNotFound => write!(f, "File id not found in URL"),
            DriveIdError::InvalidFileId => write!(f, "File id has invalid format"),
        }
    }
}

impl std::error::Error for DriveIdError {}

/// Result type for Drive file-id extraction.
pub type DriveIdResult<T> = Result<T, DriveIdError>;

/// Extract a Google Drive file id from a share link.
///
/// Supports the two common URL shapes:
/// - `https://drive.google.com/file/d/FILE_ID/view?...`
/// - `https://drive.google.com/open?id=FILE_ID` (also `uc?id=FILE_ID`)
pub fn extract_drive_file_id(url: &str) -> DriveIdResult<String> {
    let url = url.trim();

    if !is_drive_domain(url) {
        return Err(DriveIdError::NotADriveUrl);
    }

    if let Some(id) = extract_from_file_path(url) {
        return validate_file_id(id);
    }

    if let Some(id) = extract_from_id_param(url) {
        return validate_file_id(id);
    }

    Err(DriveIdError::FileIdNotFound)
}

/// Check if URL is from a Google Drive domain
fn is_drive_domain(url: &str) -> bool {
    url.to_ascii_lowercase().contains("drive.google.com")
}

/// Extract id from drive.google.com/file/d/FILE_ID/...
fn extract_from_file_path(url: &str) -> Option<String> {
    let start = url.find("/file/d/")? + 8;
    if start >= url.len() {
        return None;
    }
    extract_id_from_segment(&url[start..])
}

/// Extract id from ...?id=FILE_ID or ...&id=FILE_ID
fn extract_from_id_param(url: &str) -> Option<String> {
    let pos = url.find("?id=").or_else(|| url.find("&id="))?;
    let start = pos + 4;
    if start >= url.len() {
        return None;
    }
    extract_id_from_segment(&url[start..])
}

/// Extract the first id segment from a string
fn extract_id_from_segment(segment: &str) -> Option<String> {
    let delimiters = ['&', '#', '?', '/'];
    let end = segment
        .find(|c| delimiters.contains(&c))
        .unwrap_or(segment.len());
    Some(segment[..end].trim().to_string())
}

/// Check if string contains only valid Drive id characters
fn is_valid_drive_id_chars(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Validate Drive file id format and return it
fn validate_file_id(id: String) -> DriveIdResult<String> {
    // Drive file ids vary in length but are never this short
    if id.len() < 10 {
        return Err(DriveIdError::InvalidFileId);
    }

    if !is_valid_drive_id_chars(&id) {
        return Err(DriveIdError::InvalidFileId);
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_file_path() {
        assert_eq!(
            extract_drive_file_id(
                "https://drive.google.com/file/d/1A2b3C4d5E6f7G8h9I0j/view?usp=sharing"
            )
            .unwrap(),
            "1A2b3C4d5E6f7G8h9I0j"
        );

        // Without trailing path
        assert_eq!(
            extract_drive_file_id("https://drive.google.com/file/d/1A2b3C4d5E6f7G8h9I0j").unwrap(),
            "1A2b3C4d5E6f7G8h9I0j"
        );
    }

    #[test]
    fn test_extract_from_id_param() {
        assert_eq!(
            extract_drive_file_id("https://drive.google.com/open?id=1A2b3C4d5E6f7G8h9I0j").unwrap(),
            "1A2b3C4d5E6f7G8h9I0j"
        );

        assert_eq!(
            extract_drive_file_id(
                "https://drive.google.com/uc?export=download&id=1A2b3C4d5E6f7G8h9I0j"
            )
            .unwrap(),
            "1A2b3C4d5E6f7G8h9I0j"
        );
    }

    #[test]
    fn test_error_cases() {
        assert!(matches!(
            extract_drive_file_id("https://example.com/file/d/1A2b3C4d5E6f7G8h9I0j"),
            Err(DriveIdError::NotADriveUrl)
        ));

        assert!(matches!(
            extract_drive_file_id("https://drive.google.com/drive/my-drive"),
            Err(DriveIdError::FileIdNotFound)
        ));

        // Too short
        assert!(matches!(
            extract_drive_file_id("https://drive.google.com/file/d/abc/view"),
            Err(DriveIdError::InvalidFileId)
        ));

        // Invalid characters
        assert!(matches!(
            extract_drive_file_id("https://drive.google.com/open?id=abc!def$ghi%jkl"),
            Err(DriveIdError::InvalidFileId)
        ));
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            extract_drive_file_id("  https://drive.google.com/open?id=1A2b3C4d5E6f7G8h9I0j  ")
                .unwrap(),
            "1A2b3C4d5E6f7G8h9I0j"
        );
    }
}
