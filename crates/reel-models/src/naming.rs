//! Output file naming.

/// Maximum number of title characters considered for the file name.
pub const MAX_TITLE_CHARS: usize = 25;

/// Sanitize a display title for use in a file name.
///
/// Keeps alphanumerics and spaces from the first [`MAX_TITLE_CHARS`]
/// characters, then replaces spaces with underscores.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .take(MAX_TITLE_CHARS)
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>()
        .replace(' ', "_")
}

/// Build the output file name for a render run.
pub fn output_file_name(title: &str, timestamp: &str) -> String {
    format!("short_{}_{}.mp4", sanitize_title(title), timestamp)
}
