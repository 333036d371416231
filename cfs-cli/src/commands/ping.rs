//! Ping command - check server reachability.

use console::style;

use cfs_core::config::AppConfig;
use cfs_core::error::CfsResult;

use crate::OutputFormat;

/// Run the ping command. An unreachable server is returned as an error so the
/// process exits non-zero.
pub async fn run(config: &AppConfig, use_head: bool, format: OutputFormat) -> CfsResult<()> {
    let api = super::create_api_client(config)?;

    let start = std::time::Instant::now();
    let outcome = api.try_ping(use_head).await;
    let elapsed = start.elapsed();

    match format {
        OutputFormat::Json => {
            let mut json = serde_json::json!({
                "reachable": outcome.is_ok(),
                "latency_ms": elapsed.as_millis(),
                "method": if use_head { "HEAD" } else { "GET" },
            });
            if let Err(ref e) = outcome {
                json["error"] = serde_json::json!(e.to_string());
            }
            println!("{json}");
        }
        OutputFormat::Text => match outcome {
            Ok(()) => println!(
                "  {} ({}ms)",
                style("Pong!").green().bold(),
                elapsed.as_millis()
            ),
            Err(ref e) => println!(
                "  {} Server unreachable: {e}",
                style("FAIL").red().bold()
            ),
        },
    }

    outcome
}
