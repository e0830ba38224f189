//! GraphQL documents and fixed constants
//!
//! Centralized constants used by the sync core when talking to the Admin API.

/// Number of variants requested per SKU lookup
pub const VARIANT_LOOKUP_LIMIT: u32 = 1;

/// Number of inventory levels inspected per variant
pub const INVENTORY_LEVEL_LOOKAHEAD: u32 = 5;

/// Quantity state name written by the set mutation
pub const QUANTITY_NAME_AVAILABLE: &str = "available";

/// Adjustment reason attached to every absolute set
pub const ADJUSTMENT_REASON_CORRECTION: &str = "correction";

/// Resolve a SKU to its first variant, inventory item and inventory levels
///
/// Variables: `query` (see `sku_search_query`), `first` (`VARIANT_LOOKUP_LIMIT`)
/// and `levels` (`INVENTORY_LEVEL_LOOKAHEAD`).
pub const LOOKUP_VARIANT_BY_SKU: &str = r#"
query lookupVariantBySku($query: String!, $first: Int!, $levels: Int!) {
  productVariants(first: $first, query: $query) {
    nodes {
      id
      sku
      inventoryItem {
        id
        inventoryLevels(first: $levels) {
          nodes {
            location {
              id
            }
          }
        }
      }
    }
  }
}
"#;

/// Overwrite the "available" quantity of one inventory item at one location
pub const SET_AVAILABLE_QUANTITY: &str = r#"
mutation setAvailableQuantity($input: InventorySetQuantitiesInput!) {
  inventorySetQuantities(input: $input) {
    userErrors {
      field
      message
    }
  }
}
"#;

/// Build the product variant search string for an exact SKU
///
/// The value is always quoted so SKUs containing spaces or search syntax
/// (`:`, `-`, `OR`) are matched literally.
pub fn sku_search_query(sku: &str) -> String {
    let escaped = sku.replace('\\', "\\\\").replace('"', "\\\"");
    format!("sku:\"{}\"", escaped)
}
