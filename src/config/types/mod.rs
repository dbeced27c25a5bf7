//! Configuration types module
//!
//! The on-disk shape of `config.json` and the lookups the gateway needs.

pub mod commands;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Shared bearer token every request must present
    pub token: SecretString,

    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Programs that can be started through `/launch`
    #[serde(default)]
    pub programs: Vec<ProgramConfig>,

    /// Per-action command overrides
    #[serde(default)]
    pub commands: commands::CommandOverrides,
}

impl Config {
    /// Build a configuration in code, mostly useful for tests and embedding.
    pub fn new(token: impl Into<String>) -> Self {
        Config {
            token: SecretString::from(token.into()),
            server: ServerConfig::default(),
            programs: Vec::new(),
            commands: commands::CommandOverrides::default(),
        }
    }

    /// Add a program entry
    pub fn with_program(mut self, program: ProgramConfig) -> Self {
        self.programs.push(program);
        self
    }

    /// Find a program by name, ignoring case. The first entry in file order wins.
    pub fn find_program(&self, name: &str) -> Option<&ProgramConfig> {
        self.programs.iter().find(|p| p.matches(name))
    }
}

/// Listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Bind address; empty means all interfaces
    #[serde(default = "default_host")]
    pub host: String,
    /// Port, kept as written in the file
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Parse the configured port
    pub fn port_number(&self) -> Result<u16> {
        self.port
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("Invalid server port '{}'", self.port)))
    }

    /// Host to bind; an empty host binds every interface
    pub fn bind_host(&self) -> &str {
        let host = self.host.trim();
        if host.is_empty() {
            "0.0.0.0"
        } else {
            host
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> String {
    "8080".to_string()
}

/// Accept the port either as a string (`"8080"`) or as a number (`8080`).
fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Text(String),
        Number(u64),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Text(s) => s,
        Port::Number(n) => n.to_string(),
    })
}

/// A program that can be launched by name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgramConfig {
    /// Name used in `/launch?name=`
    pub name: String,
    /// Executable path or a name resolvable through `PATH`
    pub path: String,
    /// Extra arguments
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory for the child process
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl ProgramConfig {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        ProgramConfig {
            name: name.into(),
            path: path.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Case-insensitive name comparison
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
