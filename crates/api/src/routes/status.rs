//! Health and diagnostics endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::db::{DocumentStore, StoreHandle, Unavailable};
use crate::error::summarize_error;
use crate::state::AppState;

/// Most collection names listed by [`diagnostics`].
pub const MAX_LISTED_COLLECTIONS: usize = 10;

/// Body of `GET /test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

impl Diagnostics {
    /// Probe the store and describe what was found. Never fails.
    pub async fn probe(handle: &StoreHandle, url_configured: bool) -> Self {
        let mut report = Self::default();

        match handle {
            StoreHandle::Unavailable(Unavailable::NotConfigured) => {
                report.database = "⚠️ Available but not initialized".to_string();
            }
            StoreHandle::Unavailable(Unavailable::ConnectFailed(reason)) => {
                report.database = format!("❌ Error: {reason}");
            }
            StoreHandle::Connected(store) => {
                report.describe_store(store.as_ref(), url_configured).await;
            }
        }

        report
    }

    async fn describe_store(&mut self, store: &dyn DocumentStore, url_configured: bool) {
        self.database = "✅ Available".to_string();
        self.database_url = Some(if url_configured { "✅ Set" } else { "❌ Not Set" }.to_string());
        self.database_name = Some(store.name().to_string());

        match store.list_collections().await {
            Ok(mut collections) => {
                collections.truncate(MAX_LISTED_COLLECTIONS);
                self.collections = collections;
                self.connection_status = "Connected".to_string();
                self.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Diagnostics could not list collections");
                self.database = format!("⚠️ Connected but Error: {}", summarize_error(&e));
            }
        }
    }
}

/// `GET /test`: store diagnostics.
pub async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let url_configured = state.config().database.is_configured();
    Json(Diagnostics::probe(state.store_handle(), url_configured).await)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if no store is connected or it does not
/// answer a ping.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(store) = state.store() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    match store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
