//! Alter command - change profile fields.

use std::collections::HashMap;

use console::style;

use cfs_core::config::AppConfig;
use cfs_core::error::CfsResult;

use crate::OutputFormat;

/// Parse a `key=value` argument.
pub fn parse_key_val(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{arg}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{arg}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Run the alter command.
///
/// Fetches the account first so the change is tied to a known account, then
/// sends the changes. A rejected change is reported and returned as-is.
pub async fn run(
    config: &AppConfig,
    fields: Vec<(String, String)>,
    format: OutputFormat,
) -> CfsResult<()> {
    let api = super::create_api_client(config)?;
    let account = api.request_account_info().await?;
    let changes: HashMap<String, String> = fields.into_iter().collect();

    let outcome = api.try_alter_profile(&account, &changes).await;

    match format {
        OutputFormat::Json => {
            let json = match &outcome {
                Ok(result) => serde_json::json!({
                    "account": account.id,
                    "success": result.success,
                    "message": result.message,
                }),
                Err(e) => serde_json::json!({
                    "account": account.id,
                    "success": false,
                    "error": e.to_string(),
                    "detail": e.detail(),
                }),
            };
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        OutputFormat::Text => match &outcome {
            Ok(result) if result.success => {
                println!(
                    "  {} Updated {} field(s) on account {}.",
                    style("OK").green().bold(),
                    changes.len(),
                    account.id
                );
            }
            Ok(result) => {
                println!(
                    "  {} Change rejected: {}",
                    style("FAIL").red().bold(),
                    result.message.as_deref().unwrap_or("no message")
                );
            }
            Err(e) => {
                println!("  {} {e}", style("FAIL").red().bold());
                if let Some(data) = e.detail().and_then(|d| d.data.as_ref()) {
                    println!("  Detail: {data}");
                }
            }
        },
    }

    outcome.map(|_| ())
}
