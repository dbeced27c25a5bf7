//! Configuration paths
//!
//! Utilities for resolving configuration file paths.

use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Get the configuration directory
pub fn config_dir() -> PathBuf {
    // Check for explicit override
    if let Ok(dir) = std::env::var("DEVICECTL_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    dirs::config_dir()
        .map(|d| d.join("devicectl"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".config").join("devicectl"))
                .unwrap_or_else(|| PathBuf::from(".devicectl"))
        })
}

/// Get the main configuration file path
///
/// `DEVICECTL_CONFIG` wins, then `config.json` in the working directory,
/// then the per-user config directory.
pub fn config_path() -> PathBuf {
    resolve_config_path(
        |key| std::env::var(key).ok(),
        |path| path.exists(),
        config_dir,
    )
}

fn resolve_config_path<L, E, D>(lookup: L, exists: E, user_dir: D) -> PathBuf
where
    L: Fn(&str) -> Option<String>,
    E: Fn(&Path) -> bool,
    D: FnOnce() -> PathBuf,
{
    if let Some(path) = lookup("DEVICECTL_CONFIG") {
        return PathBuf::from(path);
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if exists(&local) {
        return local;
    }

    user_dir().join(CONFIG_FILE_NAME)
}
