//! CloudFS CLI - Command-line interface for the CloudFS client.
//!
//! Drives the account, profile, and ping operations from the terminal.
//! Useful for scripting and for checking a credential against a server.

mod commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use cfs_core::config::AppConfig;
use cfs_core::error::CfsResult;
use cfs_core::logging;

/// CloudFS - cloud file system client.
#[derive(Parser)]
#[command(
    name = "cloudfs",
    version,
    about = "CloudFS client CLI",
    long_about = "A command-line interface for the CloudFS REST API.\n\
                   Inspect the profile, alter profile fields, and probe the server."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// API endpoint (overrides config).
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Access token (overrides config).
    #[arg(short, long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the account and user profile.
    Profile,
    /// Show account data (storage, plan, state).
    Account,
    /// Show user data (identity, login history).
    User,
    /// Check whether the server is reachable.
    Ping {
        /// Probe with HEAD instead of GET.
        #[arg(long)]
        head: bool,
    },
    /// Alter profile fields.
    Alter {
        /// Field to change, as key=value. Repeat for several fields.
        #[arg(
            short,
            long = "set",
            value_name = "KEY=VALUE",
            required = true,
            value_parser = commands::alter::parse_key_val
        )]
        set: Vec<(String, String)>,
    },
    /// View or create the configuration file.
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> CfsResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = match cli.config.as_deref() {
        Some(path) => PathBuf::from(path),
        None => AppConfig::default_config_path().unwrap_or_else(|_| PathBuf::from("config.toml")),
    };
    let required = cli.config.is_some() && !matches!(cli.command, Commands::Config { .. });
    let mut config = load_config(&config_path, required)?;

    if let Some(endpoint) = cli.endpoint {
        config.server.endpoint = AppConfig::sanitize_endpoint(&endpoint);
    }
    if let Some(token) = cli.token {
        config.server.access_token = token;
    }

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    let log_dir = config.effective_log_dir().ok();
    let _guard = logging::init_logging(log_level, log_dir.as_deref(), config.logging.json_output);

    info!("CloudFS CLI v{}", cfs_core::constants::APP_VERSION);

    // Dispatch to command handlers
    match cli.command {
        Commands::Profile => commands::profile::run_profile(&config, cli.format).await,
        Commands::Account => commands::profile::run_account(&config, cli.format).await,
        Commands::User => commands::profile::run_user(&config, cli.format).await,
        Commands::Ping { head } => commands::ping::run(&config, head, cli.format).await,
        Commands::Alter { set } => commands::alter::run(&config, set, cli.format).await,
        Commands::Config { action } => {
            commands::config::run(&config, &config_path, action, cli.format)
        }
    }
}

/// Read the config file. A missing file falls back to defaults unless `required`.
fn load_config(path: &Path, required: bool) -> CfsResult<AppConfig> {
    if path.exists() || required {
        AppConfig::load_from_file(path)
    } else {
        Ok(AppConfig::default())
    }
}
