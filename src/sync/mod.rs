//! Inventory sync module
//!
//! Batch reconciliation of absolute inventory quantities, keyed by SKU.

pub mod error;
pub mod orchestrator;
pub mod types;

pub use error::ItemError;
pub use orchestrator::{SyncOptions, SyncOrchestrator};
pub use types::{
    parse_batch, RawSyncItem, SyncBatchReport, SyncItemRequest, SyncItemResult, VariantLookup,
};
