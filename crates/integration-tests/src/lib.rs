//! Integration test harness for the O'Plaisir API.
//!
//! Each test starts the full router (middleware included) on an ephemeral
//! port and talks to it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory and degraded-mode tests
//! cargo test -p oplaisir-integration-tests
//!
//! # PostgreSQL-backed tests (needs a migrated database)
//! DATABASE_URL=postgres://... cargo test -p oplaisir-integration-tests -- --ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use oplaisir_api::config::ApiConfig;
use oplaisir_api::db::{DocumentStore, InMemoryDocumentStore, StoreHandle, Unavailable};
use oplaisir_api::state::AppState;
use reqwest::{Client, Response};
use serde_json::Value;

/// A running API server bound to `127.0.0.1` on an ephemeral port.
pub struct TestServer {
    base_url: String,
    client: Client,
}

impl TestServer {
    /// Start a server backed by an empty in-memory store.
    pub async fn in_memory() -> Self {
        Self::start(StoreHandle::connected(InMemoryDocumentStore::new())).await
    }

    /// Start a server with no store, as when `DATABASE_URL` is unset.
    pub async fn degraded() -> Self {
        Self::start(StoreHandle::Unavailable(Unavailable::NotConfigured)).await
    }

    /// Start a server on an already connected store.
    pub async fn with_store(store: impl DocumentStore + 'static) -> Self {
        Self::start(StoreHandle::connected(store)).await
    }

    /// Start a server around `store`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::expect_used)]
    pub async fn start(store: StoreHandle) -> Self {
        let app = oplaisir_api::app(AppState::new(ApiConfig::default(), store));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read test listener address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET path`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    #[allow(clippy::expect_used)]
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// `POST path` with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    #[allow(clippy::expect_used)]
    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    /// `POST path` with no body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    #[allow(clippy::expect_used)]
    pub async fn post_empty(&self, path: &str) -> Response {
        self.client
            .post(self.url(path))
            .send()
            .await
            .expect("POST request failed")
    }
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
#[allow(clippy::expect_used)]
pub async fn json_body(response: Response) -> Value {
    response.json().await.expect("Response body is not JSON")
}
