//! One-shot sync from a JSON file
//!
//! Reads a file shaped like the `POST /api/inventory-sync` body, runs the
//! batch against the store configured in the environment and prints the
//! report.
//!
//! Usage: `sync_file <path-to-batch.json>`

use inventory_sync_backend::config::Config;
use inventory_sync_backend::state::AppState;
use inventory_sync_backend::sync::parse_batch;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: sync_file <path-to-batch.json>"))?;

    let config = Config::from_env();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("{} is not valid JSON: {}", path, e))?;
    let items = parse_batch(&body)?;

    let state = AppState::from_config(&config)?;
    let report = state.orchestrator.sync_batch(items).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.failed() > 0 {
        eprintln!(
            "{} of {} items failed",
            report.failed(),
            report.results.len()
        );
        std::process::exit(1);
    }
    Ok(())
}
