//! # devicectl
//!
//! A small, token-guarded HTTP gateway for controlling a desktop machine
//! remotely.
//!
//! ## Features
//!
//! - **Media keys:** play/pause, previous, next, volume up/down
//! - **Power:** shutdown and reboot
//! - **Launcher:** start programs listed in the config by name
//! - **Reloadable config:** swapped atomically on SIGHUP without dropping requests

pub mod actions;
pub mod config;
pub mod error;
pub mod gateway;

pub use config::Config;
pub use error::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = env!("CARGO_PKG_NAME");
