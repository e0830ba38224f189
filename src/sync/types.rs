//! Sync data model
//!
//! The inbound payload is decoded in two stages: `parse_batch` checks the
//! batch envelope (`items` must be an array), then each element becomes a
//! `RawSyncItem` that is validated on its own into a `SyncItemRequest`.
//! This keeps "malformed batch" (rejected as a whole) apart from
//! "well-formed batch of possibly-invalid items" (reported per item).

use crate::error::AppError;
use crate::sync::error::ItemError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Batch-level rejection message when `items` is missing or not an array
pub const ITEMS_NOT_ARRAY: &str = "Field 'items' must be an array";

/// Largest quantity the remote API accepts (GraphQL `Int` is 32-bit)
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

/// A validated sync request for one SKU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncItemRequest {
    /// Non-empty SKU
    pub sku: String,
    /// Absolute quantity to set, `0..=MAX_QUANTITY`
    pub quantity: i64,
}

/// One element of the `items` array, as received
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSyncItem {
    sku: Option<Value>,
    quantity: Option<Value>,
}

impl RawSyncItem {
    /// Build from raw JSON values (`None` and `Value::Null` both mean absent)
    pub fn new(sku: Option<Value>, quantity: Option<Value>) -> Self {
        Self {
            sku: sku.filter(|v| !v.is_null()),
            quantity: quantity.filter(|v| !v.is_null()),
        }
    }

    /// Build from one array element; anything but an object has neither field
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(object) => Self::new(
                object.get("sku").cloned(),
                object.get("quantity").cloned(),
            ),
            None => Self::default(),
        }
    }

    /// SKU echoed back in the result
    ///
    /// Strings are taken as-is and integers are rendered in decimal. Any
    /// other present value (`true`, `1.5`, an object) is echoed as its JSON
    /// text so the result stays attributable to the input.
    pub fn sku(&self) -> Option<String> {
        match self.sku.as_ref()? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Validate into a request, or the error to report without a remote call
    pub fn validate(&self) -> Result<SyncItemRequest, ItemError> {
        let (Some(raw_sku), Some(quantity)) = (self.sku.as_ref(), self.quantity.as_ref()) else {
            return Err(ItemError::MissingField);
        };
        let sku = match raw_sku {
            Value::String(s) if s.is_empty() => return Err(ItemError::MissingField),
            Value::String(s) => s.clone(),
            Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
            other => return Err(ItemError::InvalidSku(other.to_string())),
        };
        let quantity =
            parse_quantity(quantity).ok_or_else(|| ItemError::InvalidQuantity(sku.clone()))?;
        Ok(SyncItemRequest { sku, quantity })
    }
}

fn parse_quantity(value: &Value) -> Option<i64> {
    let quantity = match value {
        Value::Number(n) => match n.as_i64() {
            Some(q) => q,
            None => {
                let f = n.as_f64()?;
                if f.fract() != 0.0 || f < 0.0 || f > MAX_QUANTITY as f64 {
                    return None;
                }
                f as i64
            }
        },
        _ => return None,
    };
    (0..=MAX_QUANTITY).contains(&quantity).then_some(quantity)
}

/// Extract the items of a request body
///
/// # Errors
/// Returns `AppError::Validation` if `items` is missing or not an array.
pub fn parse_batch(body: &Value) -> Result<Vec<RawSyncItem>, AppError> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::Validation(ITEMS_NOT_ARRAY.to_string()))?;
    Ok(items.iter().map(RawSyncItem::from_value).collect())
}

/// Resolved write target for one SKU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantLookup {
    /// Inventory item GID of the first matching variant
    pub inventory_item_id: String,
    /// Location GID of that item's first inventory level
    pub location_id: String,
}

/// Outcome for one input item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncItemResult {
    /// SKU as given on input (absent if it was missing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Whether the absolute quantity was written
    pub success: bool,
    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncItemResult {
    /// Successful write
    pub fn success(sku: impl Into<String>) -> Self {
        Self {
            sku: Some(sku.into()),
            success: true,
            error: None,
        }
    }

    /// Failed item
    pub fn failure(sku: Option<String>, error: &ItemError) -> Self {
        Self {
            sku,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Ordered results, one per input item; serializes as `{ "results": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncBatchReport {
    /// Results in input order
    pub results: Vec<SyncItemResult>,
}

impl SyncBatchReport {
    /// Number of items written
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of items that failed
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}
