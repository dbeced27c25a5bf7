//! Configuration module
//!
//! - types: on-disk configuration shape (token, server, programs, commands)
//! - io.rs: configuration loading, env overrides and sample generation
//! - validation.rs: configuration validation
//! - paths.rs: configuration file paths
//! - store.rs: the reloadable, immutably-swapped store shared by the gateway

mod io;
mod paths;
mod store;
mod types;
mod validation;

pub use types::commands::{CommandOverrides, CommandSpec};
pub use types::{Config, ProgramConfig, ServerConfig};

pub use io::{apply_env_overrides, load_config_from_path, load_validated, write_sample_config};
pub use paths::{config_dir, config_path, CONFIG_FILE_NAME};
pub use store::ConfigStore;
pub use validation::{validate_config, ConfigValidationResult, ValidationIssue};
