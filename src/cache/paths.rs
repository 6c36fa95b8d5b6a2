// Cache path utilities.
// Constructs filesystem paths for stored responses and the log file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/sitewiki on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sitewiki").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding stored remote responses.
pub fn responses_dir() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("responses"))
}

/// Path to the log file (stdout belongs to the TUI).
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("sitewiki.log"))
}

/// Path of the stored response for a URL under the given root.
pub fn response_path(root: &Path, url: &str) -> PathBuf {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    root.join(format!("{}.json", sanitize_name(stripped)))
}

/// Sanitize a name for use as a single filesystem path component.
/// Replaces separators and other problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '&' | '=' | '#' => '_',
            _ => c,
        })
        .collect()
}
