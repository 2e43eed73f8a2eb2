// Cache path utilities.
// Builds per-user snapshot paths under the cache directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/gh-activity on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gh-activity").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the directory holding one snapshot per user.
pub fn users_dir(base: &Path) -> PathBuf {
    base.join("users")
}

/// Path to a user's activity snapshot.
pub fn snapshot_path(base: &Path, username: &str) -> PathBuf {
    users_dir(base).join(format!("{}.json", sanitize_name(username)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    // "." and ".." would escape the users directory
    if sanitized.chars().all(|c| c == '.') {
        sanitized.replace('.', "_")
    } else {
        sanitized
    }
}
