//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::MessageStore;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// The store is held behind the `MessageStore` trait so tests can construct
/// state over an in-memory fake instead of a live pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn MessageStore>,
}

impl AppState {
    /// Creates a new application state from the given configuration and store.
    pub fn new(config: AppConfig, store: Arc<dyn MessageStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
