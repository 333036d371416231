//! Config commands - show or create the configuration file.

use std::path::Path;

use clap::Subcommand;
use console::style;

use cfs_core::config::AppConfig;
use cfs_core::error::{CfsError, CfsResult};

use crate::OutputFormat;

const REDACTED: &str = "********";

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (token redacted).
    Show,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub fn run(
    config: &AppConfig,
    path: &Path,
    action: ConfigAction,
    format: OutputFormat,
) -> CfsResult<()> {
    match action {
        ConfigAction::Show => {
            show(config, path, format);
            Ok(())
        }
        ConfigAction::Init { force } => init(path, force),
    }
}

fn redact(token: &str) -> &str {
    if token.is_empty() {
        ""
    } else {
        REDACTED
    }
}

fn show(config: &AppConfig, path: &Path, format: OutputFormat) {
    let server = &config.server;
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "path": path.display().to_string(),
                "server": {
                    "endpoint": server.endpoint,
                    "access_token": redact(&server.access_token),
                    "token_type": server.token_type,
                    "api_timeout_ms": server.api_timeout_ms,
                    "accept_self_signed_certs": server.accept_self_signed_certs,
                },
                "logging": {
                    "level": config.logging.level,
                    "directory": config.logging.directory,
                    "json_output": config.logging.json_output,
                },
            });
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        OutputFormat::Text => {
            println!("{}", style("Configuration").bold().underlined());
            println!("  File:         {}", path.display());
            println!();
            println!("{}", style("[server]").bold());
            if server.endpoint.is_empty() {
                println!("  endpoint:     {}", style("(not set)").yellow());
            } else {
                println!("  endpoint:     {}", server.endpoint);
            }
            if server.access_token.is_empty() {
                println!("  access_token: {}", style("(not set)").yellow());
            } else {
                println!("  access_token: {REDACTED}");
            }
            println!("  token_type:   {}", server.token_type);
            println!("  timeout:      {}ms", server.api_timeout_ms);
            println!("  self-signed:  {}", server.accept_self_signed_certs);
            println!();
            println!("{}", style("[logging]").bold());
            println!("  level:        {}", config.logging.level);
            if !config.logging.directory.is_empty() {
                println!("  directory:    {}", config.logging.directory);
            }
            println!("  json_output:  {}", config.logging.json_output);
        }
    }
}

fn init(path: &Path, force: bool) -> CfsResult<()> {
    if path.exists() && !force {
        return Err(CfsError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    AppConfig::default().save_to_file(path)?;
    println!(
        "  {} Wrote {}",
        style("OK").green().bold(),
        path.display()
    );
    Ok(())
}
