//! Batch sync orchestrator
//!
//! Turns a batch of raw items into a `SyncBatchReport`. Each valid item goes
//! through a two-step protocol against the remote store:
//!
//! 1. Resolve: look up the first variant matching the SKU and take its
//!    inventory item and first inventory level.
//! 2. Write: set the absolute "available" quantity at that location,
//!    ignoring the current quantity (hard overwrite, not compare-and-swap).
//!
//! Failures are isolated per item. Items run on their own tokio tasks with
//! bounded concurrency, and the report is re-sequenced into input order.

use crate::config::SyncConfig;
use crate::error::AppError;
use crate::shopify::graphql_types::{
    QuantityEntry, SetQuantitiesData, SetQuantitiesInput, VariantLookupData, VariantNode,
};
use crate::shopify::queries::{
    sku_search_query, ADJUSTMENT_REASON_CORRECTION, INVENTORY_LEVEL_LOOKAHEAD,
    LOOKUP_VARIANT_BY_SKU, QUANTITY_NAME_AVAILABLE, SET_AVAILABLE_QUANTITY, VARIANT_LOOKUP_LIMIT,
};
use crate::shopify::{RemoteInventoryClient, TransportError};
use crate::sync::error::ItemError;
use crate::sync::types::{
    RawSyncItem, SyncBatchReport, SyncItemRequest, SyncItemResult, VariantLookup,
};
use anyhow::anyhow;
use futures_util::stream::{self, StreamExt};
use serde_json::json;
use std::sync::Arc;
use tracing::Instrument;

/// Tuning knobs for a sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Items in flight at once (1 = sequential)
    pub max_concurrency: usize,
    /// Largest batch accepted
    pub max_batch_size: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            max_batch_size: 250,
        }
    }
}

impl From<&SyncConfig> for SyncOptions {
    fn from(config: &SyncConfig) -> Self {
        Self {
            max_concurrency: config.max_concurrency,
            max_batch_size: config.max_batch_size,
        }
    }
}

/// Runs sync batches against one remote client
#[derive(Clone)]
pub struct SyncOrchestrator {
    client: Arc<dyn RemoteInventoryClient>,
    options: SyncOptions,
}

impl SyncOrchestrator {
    /// Create an orchestrator over the given client
    pub fn new(client: Arc<dyn RemoteInventoryClient>, options: SyncOptions) -> Self {
        Self { client, options }
    }

    /// Active options
    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// Synchronize a batch and return one result per item, in input order
    ///
    /// # Errors
    /// * `AppError::Validation` - the batch exceeds `max_batch_size` (no remote calls)
    /// * `AppError::Internal` - the report could not be assembled
    pub async fn sync_batch(&self, items: Vec<RawSyncItem>) -> Result<SyncBatchReport, AppError> {
        let expected = items.len();
        if expected > self.options.max_batch_size {
            return Err(AppError::Validation(format!(
                "Batch exceeds maximum size of {} items",
                self.options.max_batch_size
            )));
        }

        let span = tracing::info_span!("sync_batch", batch_size = expected);
        async move {
            let results: Vec<SyncItemResult> = stream::iter(items)
                .map(|item| self.run_item(item))
                .buffered(self.options.max_concurrency.max(1))
                .collect()
                .await;

            if results.len() != expected {
                return Err(AppError::Internal(anyhow!(
                    "sync report has {} results for {} items",
                    results.len(),
                    expected
                )));
            }

            let report = SyncBatchReport { results };
            tracing::info!(
                succeeded = report.succeeded(),
                failed = report.failed(),
                "Sync batch completed"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Per-item boundary: every outcome, including a panic, becomes a result
    async fn run_item(&self, item: RawSyncItem) -> SyncItemResult {
        let request = match item.validate() {
            Ok(request) => request,
            Err(e) => {
                let sku = item.sku();
                tracing::warn!(sku = ?sku, error = %e, kind = e.kind(), "Rejected sync item");
                return SyncItemResult::failure(sku, &e);
            }
        };

        let sku = request.sku.clone();
        let client = Arc::clone(&self.client);
        let outcome = match tokio::spawn(sync_item(client, request)).await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                tracing::error!(sku = %sku, error = %join_error, "Sync item task failed");
                Err(ItemError::Unknown)
            }
        };

        match outcome {
            Ok(()) => {
                tracing::debug!(sku = %sku, "Synced item");
                SyncItemResult::success(sku)
            }
            Err(e) => {
                tracing::warn!(sku = %sku, error = %e, kind = e.kind(), "Failed to sync item");
                SyncItemResult::failure(Some(sku), &e)
            }
        }
    }
}

/// Resolve then write one validated item
async fn sync_item(
    client: Arc<dyn RemoteInventoryClient>,
    request: SyncItemRequest,
) -> Result<(), ItemError> {
    let lookup = resolve_variant(client.as_ref(), &request.sku).await?;
    set_available_quantity(client.as_ref(), &lookup, request.quantity).await
}

/// Resolve a SKU to its write target
///
/// # Errors
/// * `ItemError::VariantNotFound` - no variant matches the SKU
/// * `ItemError::NoInventoryLevels` - the variant has no inventory level
/// * `ItemError::Transport` - the query failed or returned an unexpected shape
pub async fn resolve_variant(
    client: &dyn RemoteInventoryClient,
    sku: &str,
) -> Result<VariantLookup, ItemError> {
    let data = client
        .query(
            LOOKUP_VARIANT_BY_SKU,
            json!({
                "query": sku_search_query(sku),
                "first": VARIANT_LOOKUP_LIMIT,
                "levels": INVENTORY_LEVEL_LOOKAHEAD,
            }),
        )
        .await?;
    let data: VariantLookupData = serde_json::from_value(data)
        .map_err(|e| TransportError::MalformedResponse(format!("variant lookup: {}", e)))?;

    let variant = data
        .product_variants
        .nodes
        .into_iter()
        .next()
        .ok_or_else(|| ItemError::VariantNotFound(sku.to_string()))?;

    select_first_level(sku, variant)
}

/// Location selection policy: the first inventory level returned wins
///
/// No preference or reordering is applied; the remote API's natural order
/// decides.
pub fn select_first_level(sku: &str, variant: VariantNode) -> Result<VariantLookup, ItemError> {
    let no_levels = || ItemError::NoInventoryLevels(sku.to_string());
    let item = variant.inventory_item.ok_or_else(no_levels)?;
    let level = item
        .inventory_levels
        .nodes
        .into_iter()
        .next()
        .ok_or_else(no_levels)?;

    tracing::debug!(
        sku = %sku,
        variant_id = %variant.id,
        inventory_item_id = %item.id,
        location_id = %level.location.id,
        "Resolved sku"
    );

    Ok(VariantLookup {
        inventory_item_id: item.id,
        location_id: level.location.id,
    })
}

/// Overwrite the available quantity at the resolved location
///
/// # Errors
/// * `ItemError::RemoteUserErrors` - the mutation reported user errors
/// * `ItemError::Transport` - the mutation failed or returned an unexpected shape
pub async fn set_available_quantity(
    client: &dyn RemoteInventoryClient,
    lookup: &VariantLookup,
    quantity: i64,
) -> Result<(), ItemError> {
    let input = SetQuantitiesInput {
        name: QUANTITY_NAME_AVAILABLE,
        reason: ADJUSTMENT_REASON_CORRECTION,
        ignore_compare_quantity: true,
        quantities: vec![QuantityEntry {
            inventory_item_id: lookup.inventory_item_id.clone(),
            location_id: lookup.location_id.clone(),
            quantity,
        }],
    };

    let data = client
        .mutate(SET_AVAILABLE_QUANTITY, json!({ "input": input }))
        .await?;
    let data: SetQuantitiesData = serde_json::from_value(data)
        .map_err(|e| TransportError::MalformedResponse(format!("set quantities: {}", e)))?;

    let user_errors = data.inventory_set_quantities.user_errors;
    if user_errors.is_empty() {
        Ok(())
    } else {
        Err(ItemError::RemoteUserErrors(
            user_errors.into_iter().map(|e| e.message).collect(),
        ))
    }
}
