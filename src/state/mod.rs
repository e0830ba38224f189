// State management module
// Holds the shared, read-only handles used by request handlers

pub mod app_state;

pub use app_state::AppState;
