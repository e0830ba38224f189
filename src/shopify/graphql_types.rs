//! Admin GraphQL API types
//!
//! Structs that mirror the GraphQL request envelope and the JSON shapes of the
//! two operations the sync core issues. Used to (de)serialize API traffic into
//! typed Rust structs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request envelope sent to the GraphQL endpoint
#[derive(Serialize, Debug)]
pub struct GraphqlRequest<'a> {
    /// Query or mutation document
    pub query: &'a str,
    /// Operation variables
    pub variables: &'a Value,
}

/// Top-level GraphQL response envelope
#[derive(Deserialize, Debug)]
pub struct GraphqlResponse {
    /// Operation result (absent when the whole operation failed)
    #[serde(default)]
    pub data: Option<Value>,
    /// Top-level errors (syntax, throttling, access denied)
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// A single top-level GraphQL error
#[derive(Deserialize, Debug)]
pub struct GraphqlError {
    /// Human-readable message
    pub message: String,
}

/// Relay-style connection, only `nodes` is requested
#[derive(Deserialize, Debug)]
pub struct Connection<T> {
    /// Returned nodes, in the remote system's natural order
    pub nodes: Vec<T>,
}

/// `data` of the variant lookup query
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VariantLookupData {
    /// Variants matching the SKU search
    pub product_variants: Connection<VariantNode>,
}

/// A product variant
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    /// Variant GID
    pub id: String,
    /// SKU as stored remotely
    #[serde(default)]
    pub sku: Option<String>,
    /// Inventory item tracking this variant (absent when untracked)
    #[serde(default)]
    pub inventory_item: Option<InventoryItemNode>,
}

/// Inventory item attached to a variant
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemNode {
    /// Inventory item GID
    pub id: String,
    /// First few inventory levels of this item
    pub inventory_levels: Connection<InventoryLevelNode>,
}

/// Quantity of an inventory item at one location
#[derive(Deserialize, Debug)]
pub struct InventoryLevelNode {
    /// Location holding the stock
    pub location: LocationRef,
}

/// Location reference
#[derive(Deserialize, Debug)]
pub struct LocationRef {
    /// Location GID
    pub id: String,
}

/// `data` of the set-quantities mutation
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantitiesData {
    /// Mutation payload; a null or missing payload means the write was not confirmed
    pub inventory_set_quantities: SetQuantitiesPayload,
}

/// Payload returned by `inventorySetQuantities`
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantitiesPayload {
    /// Field-level validation errors
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// Field-level error reported by a mutation
#[derive(Deserialize, Debug, Clone)]
pub struct UserError {
    /// Path of the offending input field
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Human-readable message
    pub message: String,
}

/// `InventorySetQuantitiesInput`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantitiesInput {
    /// Quantity state name, always "available"
    pub name: &'static str,
    /// Adjustment reason, always "correction"
    pub reason: &'static str,
    /// Skip compare-and-swap against the current quantity
    pub ignore_compare_quantity: bool,
    /// Quantities to set
    pub quantities: Vec<QuantityEntry>,
}

/// One absolute quantity for an (item, location) pair
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuantityEntry {
    /// Inventory item GID
    pub inventory_item_id: String,
    /// Location GID
    pub location_id: String,
    /// New absolute quantity
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variant_lookup_deserializes() {
        let data: VariantLookupData = serde_json::from_value(json!({
            "productVariants": {
                "nodes": [{
                    "id": "gid://shopify/ProductVariant/1",
                    "sku": "20760",
                    "inventoryItem": {
                        "id": "gid://shopify/InventoryItem/11",
                        "inventoryLevels": {
                            "nodes": [{ "location": { "id": "gid://shopify/Location/7" } }]
                        }
                    }
                }]
            }
        }))
        .unwrap();

        let variant = &data.product_variants.nodes[0];
        let item = variant.inventory_item.as_ref().unwrap();
        assert_eq!(item.id, "gid://shopify/InventoryItem/11");
        assert_eq!(
            item.inventory_levels.nodes[0].location.id,
            "gid://shopify/Location/7"
        );
    }

    #[test]
    fn test_set_quantities_input_serializes_camel_case() {
        let input = SetQuantitiesInput {
            name: "available",
            reason: "correction",
            ignore_compare_quantity: true,
            quantities: vec![QuantityEntry {
                inventory_item_id: "item".to_string(),
                location_id: "loc".to_string(),
                quantity: 5,
            }],
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["ignoreCompareQuantity"], true);
        assert_eq!(value["quantities"][0]["inventoryItemId"], "item");
        assert_eq!(value["quantities"][0]["locationId"], "loc");
    }

    #[test]
    fn test_user_errors_default_to_empty() {
        let data: SetQuantitiesData =
            serde_json::from_value(json!({ "inventorySetQuantities": {} })).unwrap();
        assert!(data.inventory_set_quantities.user_errors.is_empty());
    }

    #[test]
    fn test_missing_set_quantities_payload_is_rejected() {
        for data in [json!({ "inventorySetQuantities": null }), json!({})] {
            assert!(
                serde_json::from_value::<SetQuantitiesData>(data.clone()).is_err(),
                "{} should not deserialize",
                data
            );
        }
    }

    #[test]
    fn test_connection_without_nodes_is_rejected() {
        let result = serde_json::from_value::<VariantLookupData>(json!({ "productVariants": {} }));
        assert!(result.is_err());
    }
}
