//! Configuration validation
//!
//! Validates configuration and reports issues.

use std::collections::HashSet;
use std::fmt;

use secrecy::ExposeSecret;

use super::types::Config;

/// Tokens shorter than this are accepted with a warning
const MIN_TOKEN_LEN: usize = 16;

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ConfigValidationResult {
    /// Whether the config is valid
    pub valid: bool,
    /// Validation errors (critical)
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings (non-critical)
    pub warnings: Vec<ValidationIssue>,
}

impl ConfigValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        ConfigValidationResult {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error
    pub fn with_error(mut self, issue: ValidationIssue) -> Self {
        self.valid = false;
        self.errors.push(issue);
        self
    }

    /// Add a warning
    pub fn with_warning(mut self, issue: ValidationIssue) -> Self {
        self.warnings.push(issue);
        self
    }
}

/// A validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the config field
    pub path: String,
    /// Issue message
    pub message: String,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new issue
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({})", suggestion)?;
        }
        Ok(())
    }
}

/// Validate the configuration
pub fn validate_config(config: &Config) -> ConfigValidationResult {
    let mut result = ConfigValidationResult::valid();

    result = validate_token(config, result);
    result = validate_server(config, result);
    result = validate_programs(config, result);
    result = validate_commands(config, result);

    result
}

fn validate_token(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    let token = config.token.expose_secret();

    if token.trim().is_empty() {
        result = result.with_error(
            ValidationIssue::new("token", "Token must not be empty")
                .with_suggestion("Run `devicectl init` to generate a config with a random token"),
        );
    } else if token.len() < MIN_TOKEN_LEN {
        result = result.with_warning(ValidationIssue::new(
            "token",
            format!("Token is shorter than {} characters", MIN_TOKEN_LEN),
        ));
    }

    result
}

fn validate_server(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    if config.server.port_number().is_err() {
        result = result.with_error(
            ValidationIssue::new(
                "server.port",
                format!("Invalid port '{}'", config.server.port),
            )
            .with_suggestion("Use a number between 0 and 65535"),
        );
    }

    if config.server.host.trim().is_empty() {
        result = result.with_warning(ValidationIssue::new(
            "server.host",
            "Empty host, listening on all interfaces",
        ));
    }

    result
}

fn validate_programs(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    let mut seen = HashSet::new();

    for (i, program) in config.programs.iter().enumerate() {
        let field = format!("programs[{}]", i);

        if program.name.trim().is_empty() {
            result = result.with_error(ValidationIssue::new(
                format!("{}.name", field),
                "Program name must not be empty",
            ));
        }
        if program.path.trim().is_empty() {
            result = result.with_error(ValidationIssue::new(
                format!("{}.path", field),
                "Program path must not be empty",
            ));
            continue;
        }

        if !seen.insert(program.name.to_lowercase()) {
            result = result.with_warning(ValidationIssue::new(
                format!("{}.name", field),
                format!(
                    "Duplicate program name '{}', only the first entry is reachable",
                    program.name
                ),
            ));
        }

        if which::which(&program.path).is_err() {
            result = result.with_warning(ValidationIssue::new(
                format!("{}.path", field),
                format!("Executable not found: {}", program.path),
            ));
        }
    }

    result
}

fn validate_commands(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    for (name, spec) in config.commands.iter() {
        if spec.program.trim().is_empty() {
            result = result.with_error(ValidationIssue::new(
                format!("commands.{}.program", name),
                "Command program must not be empty",
            ));
        }
    }

    result
}
