//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::{DocumentStore, StoreHandle};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It is built once, after the
/// store connection attempt and before the listener accepts requests, and is
/// read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    store: StoreHandle,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `store` - Outcome of the startup store connection
    #[must_use]
    pub fn new(config: ApiConfig, store: StoreHandle) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get the store handle (connected or unavailable).
    #[must_use]
    pub fn store_handle(&self) -> &StoreHandle {
        &self.inner.store
    }

    /// Get the connected store, or `None` in degraded mode.
    #[must_use]
    pub fn store(&self) -> Option<&dyn DocumentStore> {
        self.inner.store.get()
    }
}
