//! Reloadable configuration store
//!
//! Readers take an `Arc<Config>` snapshot; a reload builds a new config and
//! swaps the pointer, so a request in flight keeps the config it started with.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::io::{finish_loading, load_config_from_path};
use super::types::Config;
use crate::error::Result;

/// Shared, swappable configuration
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    current: RwLock<Loaded>,
}

/// The file as read plus the configuration actually in effect
#[derive(Debug)]
struct Loaded {
    file: Config,
    effective: Arc<Config>,
}

impl ConfigStore {
    /// Load and validate the file at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = load_config_from_path(&path)?;
        let effective = finish_loading(file.clone())?;

        Ok(ConfigStore {
            path,
            current: RwLock::new(Loaded {
                file,
                effective: Arc::new(effective),
            }),
        })
    }

    /// Wrap an already built configuration. `path` is used by `reload`.
    pub fn with_config(path: impl Into<PathBuf>, config: Config) -> Self {
        ConfigStore {
            path: path.into(),
            current: RwLock::new(Loaded {
                file: config.clone(),
                effective: Arc::new(config),
            }),
        }
    }

    /// Path the configuration is (re)loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current configuration
    pub async fn snapshot(&self) -> Arc<Config> {
        self.current.read().await.effective.clone()
    }

    /// Re-read the file and replace the current configuration.
    ///
    /// On failure the previous configuration stays active.
    pub async fn reload(&self) -> Result<Arc<Config>> {
        let file = load_config_from_path(&self.path)?;
        let config = Arc::new(finish_loading(file.clone())?);

        let previous = {
            let mut current = self.current.write().await;
            for field in masked_changes(&current.file, &file, &config) {
                warn!(
                    field,
                    "Changed in the config file but overridden by the environment; keeping the environment value"
                );
            }
            std::mem::replace(
                &mut *current,
                Loaded {
                    file,
                    effective: config.clone(),
                },
            )
        };

        if previous.effective.server != config.server {
            warn!(
                host = %config.server.host,
                port = %config.server.port,
                "Server address changed; restart to rebind"
            );
        }
        info!(
            path = %self.path.display(),
            programs = config.programs.len(),
            "Configuration reloaded"
        );

        Ok(config)
    }
}

/// Fields edited in the file since the last load whose new value is hidden
/// by an environment override.
fn masked_changes(previous_file: &Config, file: &Config, effective: &Config) -> Vec<&'static str> {
    let mut masked = Vec::new();

    let token = |c: &Config| c.token.expose_secret().to_string();
    if token(previous_file) != token(file) && token(effective) != token(file) {
        masked.push("token");
    }
    if previous_file.server.host != file.server.host && effective.server.host != file.server.host {
        masked.push("server.host");
    }
    if previous_file.server.port != file.server.port && effective.server.port != file.server.port {
        masked.push("server.port");
    }

    masked
}
