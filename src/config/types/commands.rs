//! Command override types
//!
//! Lets a config file replace the built-in command used for an action,
//! e.g. to drive a specific media player instead of the platform default.

use serde::Deserialize;

/// A program plus its arguments, as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandSpec {
    /// Executable to run
    pub program: String,
    /// Arguments passed verbatim (no shell)
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Optional replacement command for each fixed action
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommandOverrides {
    pub play_pause: Option<CommandSpec>,
    pub previous: Option<CommandSpec>,
    pub next: Option<CommandSpec>,
    pub volume_up: Option<CommandSpec>,
    pub volume_down: Option<CommandSpec>,
    pub shutdown: Option<CommandSpec>,
    pub reboot: Option<CommandSpec>,
}

impl CommandOverrides {
    /// Iterate over the overrides that are set, keyed by action name
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CommandSpec)> {
        [
            ("play_pause", &self.play_pause),
            ("previous", &self.previous),
            ("next", &self.next),
            ("volume_up", &self.volume_up),
            ("volume_down", &self.volume_down),
            ("shutdown", &self.shutdown),
            ("reboot", &self.reboot),
        ]
        .into_iter()
        .filter_map(|(name, spec)| spec.as_ref().map(|s| (name, s)))
    }
}
