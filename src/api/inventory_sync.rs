//! Inventory sync API handler
//!
//! `POST /api/inventory-sync` accepts `{ "items": [ { "sku", "quantity" } ] }`
//! and answers `{ "results": [ { "sku", "success", "error"? } ] }`.

use crate::error::AppError;
use crate::state::AppState;
use crate::sync::{parse_batch, SyncBatchReport};
use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

/// POST /api/inventory-sync - Set absolute quantities for a batch of SKUs
///
/// # Returns
/// * `Ok(Json<SyncBatchReport>)` - One result per item, in input order
/// * `Err(AppError::Validation)` - Body is not JSON, `items` is not an array,
///   or the batch is too large (no remote calls are made)
/// * `Err(AppError::Internal)` - The batch failed outside per-item isolation
pub async fn sync_inventory(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SyncBatchReport>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let items = parse_batch(&body)?;

    tracing::info!(items = items.len(), "Received inventory sync batch");

    // Run on its own task so a panic while assembling the report becomes a 500
    let orchestrator = state.orchestrator.clone();
    let report = tokio::spawn(async move { orchestrator.sync_batch(items).await })
        .await
        .map_err(|e| AppError::Internal(anyhow!("sync batch task failed: {}", e)))??;

    Ok(Json(report))
}
