//! Inventory Sync Backend Library
//!
//! This library exposes modules for testing and external use.
//! The server binary is in `src/main.rs`; `src/bin/sync_file.rs` runs a
//! single batch from the command line.

pub mod api;
pub mod config;
pub mod error;
pub mod router;
pub mod shopify;
/// Shared application state
pub mod state;
pub mod sync;
