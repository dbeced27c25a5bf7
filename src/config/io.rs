//! Configuration I/O - Loading and writing configuration
//!
//! Handles reading configuration from files and environment variables.

use std::path::Path;

use tracing::{debug, warn};

use super::types::Config;
use super::validation::validate_config;
use crate::error::{Error, Result};

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    // Detect format by extension
    let config: Config = if path.extension().map_or(false, |ext| ext == "json") {
        // Parse as JSON5 (more lenient than strict JSON)
        json5::from_str(&content).map_err(|e| Error::Config(format!("Invalid JSON config: {}", e)))?
    } else if path.extension().map_or(false, |ext| ext == "toml") {
        toml::from_str(&content).map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))?
    } else {
        // Try JSON5 first, then TOML
        json5::from_str(&content)
            .or_else(|_| toml::from_str(&content).map_err(|e| Error::Config(e.to_string())))
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?
    };

    Ok(config)
}

/// Load, apply environment overrides and validate.
///
/// Validation errors are returned as `Error::Config`; warnings are logged.
pub fn load_validated(path: &Path) -> Result<Config> {
    let config = finish_loading(load_config_from_path(path)?)?;
    debug!(path = %path.display(), programs = config.programs.len(), "Configuration loaded");
    Ok(config)
}

/// Apply environment overrides to a config read from a file, then validate it
pub fn finish_loading(mut config: Config) -> Result<Config> {
    apply_env_overrides(&mut config);

    let result = validate_config(&config);
    for issue in &result.warnings {
        warn!(field = %issue.path, "{}", issue.message);
    }
    if !result.valid {
        let messages: Vec<String> = result.errors.iter().map(|i| i.to_string()).collect();
        return Err(Error::Config(messages.join("; ")));
    }

    Ok(config)
}

/// Apply environment variable overrides to an existing config.
///
/// This loads `.env` file if present and overlays `DEVICECTL_TOKEN`,
/// `DEVICECTL_HOST` and `DEVICECTL_PORT` onto the file values.
pub fn apply_env_overrides(config: &mut Config) {
    dotenvy::dotenv().ok();
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

fn apply_overrides_from<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    use secrecy::SecretString;

    if let Some(token) = lookup("DEVICECTL_TOKEN") {
        config.token = SecretString::from(token);
    }
    if let Some(host) = lookup("DEVICECTL_HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("DEVICECTL_PORT") {
        config.server.port = port;
    }
}

/// Write a starter configuration file with the given token
pub fn write_sample_config(path: &Path, token: &str) -> Result<()> {
    let sample = serde_json::json!({
        "token": token,
        "server": {
            "host": "127.0.0.1",
            "port": "8080"
        },
        "programs": [
            { "name": "browser", "path": default_browser() }
        ]
    });
    let content = serde_json::to_string_pretty(&sample)?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, content)?;
    Ok(())
}

fn default_browser() -> &'static str {
    if cfg!(windows) {
        "C:\\Program Files\\Mozilla Firefox\\firefox.exe"
    } else if cfg!(target_os = "macos") {
        "/Applications/Safari.app/Contents/MacOS/Safari"
    } else {
        "firefox"
    }
}
