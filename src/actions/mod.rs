//! Actions - the OS side effects behind each route
//!
//! Every fixed route maps to one [`Action`], which resolves to exactly one
//! [`CommandLine`]. The [`Executor`] trait is the seam where the command
//! actually touches the operating system.

mod defaults;
mod system;

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::{CommandOverrides, CommandSpec, ProgramConfig};
use crate::error::Result;

pub use defaults::default_command;
pub use system::SystemExecutor;

/// The fixed set of media and power actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PlayPause,
    Previous,
    Next,
    VolumeUp,
    VolumeDown,
    Shutdown,
    Reboot,
}

impl Action {
    /// Every action, in route table order
    pub const ALL: [Action; 7] = [
        Action::PlayPause,
        Action::Previous,
        Action::Next,
        Action::VolumeUp,
        Action::VolumeDown,
        Action::Shutdown,
        Action::Reboot,
    ];

    /// Stable name, also the config key for overrides
    pub fn name(self) -> &'static str {
        match self {
            Action::PlayPause => "play_pause",
            Action::Previous => "previous",
            Action::Next => "next",
            Action::VolumeUp => "volume_up",
            Action::VolumeDown => "volume_down",
            Action::Shutdown => "shutdown",
            Action::Reboot => "reboot",
        }
    }

    /// HTTP path serving this action
    pub fn route(self) -> &'static str {
        match self {
            Action::PlayPause => "/play_pause",
            Action::Previous => "/previous",
            Action::Next => "/next",
            Action::VolumeUp => "/volume_up",
            Action::VolumeDown => "/volume_down",
            Action::Shutdown => "/shutdown",
            Action::Reboot => "/reboot",
        }
    }

    /// Response body on success
    pub fn ack(self) -> &'static str {
        match self {
            Action::PlayPause => "Play/pause simulated",
            Action::Previous => "Previous track simulated",
            Action::Next => "Next track simulated",
            Action::VolumeUp => "Volume up simulated",
            Action::VolumeDown => "Volume down simulated",
            Action::Shutdown => "Shutting down",
            Action::Reboot => "Rebooting",
        }
    }

    /// Response body on failure
    pub fn failure(self) -> &'static str {
        match self {
            Action::PlayPause => "Failed to simulate play/pause",
            Action::Previous => "Failed to simulate previous track",
            Action::Next => "Failed to simulate next track",
            Action::VolumeUp => "Failed to simulate volume up",
            Action::VolumeDown => "Failed to simulate volume down",
            Action::Shutdown => "Shutdown failed",
            Action::Reboot => "Reboot failed",
        }
    }

    /// Command for this action: the configured override, else the platform default
    pub fn command(self, overrides: &CommandOverrides) -> CommandLine {
        let configured = match self {
            Action::PlayPause => &overrides.play_pause,
            Action::Previous => &overrides.previous,
            Action::Next => &overrides.next,
            Action::VolumeUp => &overrides.volume_up,
            Action::VolumeDown => &overrides.volume_down,
            Action::Shutdown => &overrides.shutdown,
            Action::Reboot => &overrides.reboot,
        };

        match configured {
            Some(spec) => CommandLine::from(spec),
            None => default_command(self),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully resolved command, ready to hand to an [`Executor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl From<&CommandSpec> for CommandLine {
    fn from(spec: &CommandSpec) -> Self {
        CommandLine::new(spec.program.clone(), spec.args.iter().cloned())
    }
}

impl From<&ProgramConfig> for CommandLine {
    fn from(program: &ProgramConfig) -> Self {
        CommandLine {
            program: program.path.clone(),
            args: program.args.clone(),
            working_dir: program.working_dir.clone(),
        }
    }
}

/// Performs OS-level side effects
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run a command to completion; a non-zero exit status is an error
    async fn run(&self, command: &CommandLine) -> Result<()>;

    /// Start a command as a detached process and return once it has started
    async fn spawn(&self, command: &CommandLine) -> Result<()>;
}
