//! devicectl
//!
//! Command-line entry point: serve the gateway, check or create the config,
//! list configured programs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use rand::distr::Alphanumeric;
use rand::Rng;
use tracing::info;

use devicectl::config::{self, ConfigStore};
use devicectl::gateway::{self, GatewayState};
use devicectl::VERSION;

/// Length of generated tokens
const TOKEN_LEN: usize = 32;

#[derive(Parser)]
#[command(
    name = "devicectl",
    version = VERSION,
    about = "Token-guarded HTTP control for media keys, power and program launching",
    long_about = None
)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, short, global = true, env = "DEVICECTL_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway (default)
    Serve,

    /// Validate the configuration file
    Check,

    /// Write a sample configuration with a fresh token
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// List the programs available to /launch
    Programs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let path = cli.config.unwrap_or_else(config::config_path);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&path).await,
        Commands::Check => check(&path),
        Commands::Init { force } => init(&path, force),
        Commands::Programs => programs(&path),
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "devicectl=info,tower_http=info".into());

    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn serve(path: &Path) -> anyhow::Result<()> {
    info!("Starting devicectl v{}", VERSION);

    let store = ConfigStore::open(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    info!(path = %path.display(), "Configuration loaded");

    let state = GatewayState::system(Arc::new(store));
    gateway::serve(state).await?;

    Ok(())
}

fn check(path: &Path) -> anyhow::Result<()> {
    println!("Checking {}", style(path.display()).cyan());

    let mut loaded = config::load_config_from_path(path)?;
    config::apply_env_overrides(&mut loaded);

    let result = config::validate_config(&loaded);
    for issue in &result.errors {
        println!("   {} {}", style("✗").red(), issue);
    }
    for issue in &result.warnings {
        println!("   {} {}", style("!").yellow(), issue);
    }

    if !result.valid {
        bail!("{} configuration error(s)", result.errors.len());
    }

    println!(
        "   {} Configuration is valid ({} program(s))",
        style("✓").green(),
        loaded.programs.len()
    );
    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists, use --force to overwrite",
            path.display()
        );
    }

    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect();

    config::write_sample_config(path, &token)?;

    println!("   {} Wrote {}", style("✓").green(), path.display());
    println!("   Token: {}", style(&token).bold());
    Ok(())
}

fn programs(path: &Path) -> anyhow::Result<()> {
    let loaded = config::load_config_from_path(path)?;

    if loaded.programs.is_empty() {
        println!("No programs configured.");
        return Ok(());
    }

    for program in &loaded.programs {
        if program.args.is_empty() {
            println!("{:<20} {}", style(&program.name).cyan(), program.path);
        } else {
            println!(
                "{:<20} {} {}",
                style(&program.name).cyan(),
                program.path,
                program.args.join(" ")
            );
        }
    }
    Ok(())
}
