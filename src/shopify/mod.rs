//! Remote store module
//!
//! Everything needed to talk to the commerce platform's Admin GraphQL API:
//! the `RemoteInventoryClient` capability consumed by the sync core, the
//! reqwest-backed `ShopifyAdminClient`, and the typed request/response bodies.

pub mod client;
pub mod error;
pub mod graphql_types;
pub mod queries;

pub use client::{RemoteInventoryClient, ShopifyAdminClient};
pub use error::TransportError;
