//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::fmt;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Remote store configuration
    pub shopify: ShopifyConfig,
    /// Batch sync configuration
    pub sync: SyncConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Remote store (Shopify Admin API) configuration
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Store domain, e.g. `my-shop.myshopify.com`
    pub store_domain: String,
    /// Admin API access token
    pub access_token: String,
    /// Admin API version segment of the endpoint path
    pub api_version: String,
    /// Transport timeout for a single GraphQL call (in seconds)
    pub timeout_secs: u64,
}

// Never print the token.
impl fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("store_domain", &self.store_domain)
            .field("access_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Batch sync configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Number of items processed concurrently (1 = sequential)
    pub max_concurrency: usize,
    /// Maximum number of items accepted in one batch
    pub max_batch_size: usize,
}

/// Default Admin API version
pub const DEFAULT_API_VERSION: &str = "2024-10";

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            shopify: ShopifyConfig {
                store_domain: env::var("SHOPIFY_STORE_DOMAIN").unwrap_or_default(),
                access_token: env::var("SHOPIFY_ACCESS_TOKEN").unwrap_or_default(),
                api_version: env::var("SHOPIFY_API_VERSION")
                    .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
                timeout_secs: env::var("SHOPIFY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(30),
            },
            sync: SyncConfig {
                max_concurrency: env::var("SYNC_MAX_CONCURRENCY")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(4),
                max_batch_size: env::var("SYNC_MAX_BATCH_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(250),
            },
        }
    }

    /// Check that the configuration can be used to start the server
    ///
    /// # Errors
    /// Returns a message naming the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.shopify.store_domain.trim().is_empty() {
            return Err("SHOPIFY_STORE_DOMAIN must be set".to_string());
        }
        if self.shopify.access_token.trim().is_empty() {
            return Err("SHOPIFY_ACCESS_TOKEN must be set".to_string());
        }
        if self.shopify.timeout_secs == 0 {
            return Err("SHOPIFY_TIMEOUT_SECS must be > 0".to_string());
        }
        if self.sync.max_concurrency == 0 {
            return Err("SYNC_MAX_CONCURRENCY must be > 0".to_string());
        }
        if self.sync.max_batch_size == 0 {
            return Err("SYNC_MAX_BATCH_SIZE must be > 0".to_string());
        }
        Ok(())
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
