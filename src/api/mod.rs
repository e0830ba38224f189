//! API module
//!
//! Contains HTTP request handlers for the inventory sync endpoints

pub mod inventory_sync;

pub use inventory_sync::sync_inventory;
