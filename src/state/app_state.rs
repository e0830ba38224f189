// Application state
// Request handlers share one orchestrator; no per-request data lives here

use crate::config::Config;
use crate::shopify::{RemoteInventoryClient, ShopifyAdminClient, TransportError};
use crate::sync::{SyncOptions, SyncOrchestrator};
use std::sync::Arc;

/// Main application state
#[derive(Clone)]
pub struct AppState {
    /// Batch sync orchestrator bound to the configured store
    pub orchestrator: SyncOrchestrator,
}

impl AppState {
    /// Create state around an existing remote client
    pub fn new(client: Arc<dyn RemoteInventoryClient>, options: SyncOptions) -> Self {
        Self {
            orchestrator: SyncOrchestrator::new(client, options),
        }
    }

    /// Create state talking to the store described by `config`
    ///
    /// # Errors
    /// Returns `TransportError` if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let client = ShopifyAdminClient::new(&config.shopify)?;
        Ok(Self::new(Arc::new(client), SyncOptions::from(&config.sync)))
    }
}
