//! Application state for the products API.

use std::sync::Arc;

use common::config::ConfigSource;

/// Application state shared across handlers.
///
/// Holds only the configuration source; every request resolves its own
/// config and opens its own connection, so there is no shared mutable state.
#[derive(Clone)]
pub struct AppState {
    pub env: Arc<dyn ConfigSource + Send + Sync>,
}

impl AppState {
    /// Creates a new application state over the given configuration source.
    pub fn new(env: Arc<dyn ConfigSource + Send + Sync>) -> Self {
        Self { env }
    }
}
