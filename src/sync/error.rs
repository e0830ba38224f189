//! Item-level error types
//!
//! Every failure that can happen to one batch item. These never escape the
//! per-item boundary; the orchestrator folds them into `SyncItemResult`s.

use crate::shopify::TransportError;
use thiserror::Error;

/// Why a single item could not be synchronized
///
/// The `Display` output is exactly the `error` string reported for the item.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItemError {
    /// `sku` or `quantity` is null or absent
    #[error("Missing sku or quantity")]
    MissingField,

    /// `sku` is present but neither a string nor an integer (JSON text)
    #[error("Invalid sku {0}")]
    InvalidSku(String),

    /// `quantity` is present but not a non-negative integer
    #[error("Invalid quantity for sku {0}")]
    InvalidQuantity(String),

    /// The SKU search returned no variant
    #[error("No variant found for sku {0}")]
    VariantNotFound(String),

    /// The variant has no inventory level to write to
    #[error("No inventory levels for sku {0}")]
    NoInventoryLevels(String),

    /// The write was rejected with field-level errors (messages in order)
    #[error("{}", .0.join(", "))]
    RemoteUserErrors(Vec<String>),

    /// The remote call failed
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The item's task failed without a usable message
    #[error("Unknown error")]
    Unknown,
}

impl ItemError {
    /// Short stable label, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            ItemError::MissingField | ItemError::InvalidSku(_) | ItemError::InvalidQuantity(_) => {
                "validation"
            }
            ItemError::VariantNotFound(_) | ItemError::NoInventoryLevels(_) => "resolution",
            ItemError::RemoteUserErrors(_) => "remote_user_error",
            ItemError::Transport(_) => "transport",
            ItemError::Unknown => "unknown",
        }
    }
}
