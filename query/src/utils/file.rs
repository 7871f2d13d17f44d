//! File and path helpers

use std::path::PathBuf;

/// Expand a user-supplied path
///
/// `~` and `~/...` resolve against the home directory; relative paths are
/// made absolute against the current working directory.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}
