//! Error types for devicectl

use thiserror::Error;

/// Result type alias using devicectl's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for devicectl
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command ran but did not exit successfully
    #[error("Command failed: {0}")]
    Command(String),

    /// A command could not be started
    #[error("Failed to spawn process: {0}")]
    Spawn(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
