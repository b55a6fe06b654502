//! Document store access.
//!
//! # Store model
//!
//! Documents are JSON objects grouped into named collections (`product`,
//! `testimonial`, `newslettersubscriber`, `user`). The store assigns each
//! document an id and creation timestamps; everything else is caller data.
//!
//! # Availability
//!
//! The store is connected once at startup by [`connect`]. The outcome, a
//! [`StoreHandle`], never changes for the life of the process: there is no
//! reconnect or retry. Handlers read it once per request and either use the
//! store or fall back (sample content for reads, 503 for writes).
//!
//! # Backends
//!
//! - [`PgDocumentStore`] - `PostgreSQL` JSONB table (production)
//! - [`InMemoryDocumentStore`] - process-local maps (tests, local previews)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p oplaisir-cli -- migrate
//! ```

pub mod documents;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use oplaisir_core::DocumentId;

use crate::config::DatabaseConfig;
use crate::error::summarize_error;

pub use documents::{Collection, count_documents, create_document, get_documents};
pub use memory::InMemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Caller-supplied document fields (a JSON object).
pub type Fields = Map<String, Value>;

/// Field names the store assigns itself; callers may not set them.
pub const RESERVED_FIELDS: &[&str] = &["_id", "created_at", "updated_at"];

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Constraint violation (e.g., duplicate subscriber email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Caller tried to set a store-assigned field.
    #[error("field `{0}` is assigned by the store")]
    ReservedField(String),

    /// A record did not serialize to a JSON object.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// A stored document: caller fields plus store-assigned metadata.
///
/// Serializes flat, e.g. `{"_id": "...", "title": "...", "created_at": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: Fields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Capability set of a document store.
///
/// Implementations provide their own concurrency safety for single-document
/// operations; nothing here takes client-side locks across calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Human-readable store name (the database name for `PostgreSQL`).
    fn name(&self) -> &str;

    /// Names of collections holding at least one document, sorted.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// Insert `fields` into `collection`, returning the stored document.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError>;

    /// Documents in `collection` whose fields equal every `filter` entry, in
    /// insertion order, at most `limit`.
    async fn find(
        &self,
        collection: &str,
        filter: &Fields,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Number of documents in `collection` matching `filter`.
    async fn count(&self, collection: &str, filter: &Fields) -> Result<u64, StoreError>;

    /// Round-trip to the backend without touching documents.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release backend resources. Called once on shutdown.
    async fn close(&self) {}
}

impl dyn DocumentStore + '_ {
    /// Select a named collection.
    #[must_use]
    pub fn collection<'a>(&'a self, name: &'a str) -> Collection<'a> {
        Collection::new(self, name)
    }
}

/// Why no store is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// `DATABASE_URL` was not set.
    NotConfigured,
    /// The single connection attempt at startup failed.
    ConnectFailed(String),
}

/// Outcome of the startup connection attempt, fixed for the process lifetime.
#[derive(Clone)]
pub enum StoreHandle {
    Connected(Arc<dyn DocumentStore>),
    Unavailable(Unavailable),
}

impl StoreHandle {
    /// Wrap a connected store.
    pub fn connected(store: impl DocumentStore + 'static) -> Self {
        Self::Connected(Arc::new(store))
    }

    /// The store, if one is connected.
    #[must_use]
    pub fn get(&self) -> Option<&dyn DocumentStore> {
        match self {
            Self::Connected(store) => Some(store.as_ref()),
            Self::Unavailable(_) => None,
        }
    }

    /// Why the store is unavailable, if it is.
    #[must_use]
    pub const fn unavailable_reason(&self) -> Option<&Unavailable> {
        match self {
            Self::Connected(_) => None,
            Self::Unavailable(reason) => Some(reason),
        }
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected(store) => f.debug_tuple("Connected").field(&store.name()).finish(),
            Self::Unavailable(reason) => f.debug_tuple("Unavailable").field(reason).finish(),
        }
    }
}

/// Attempt the one startup connection to the document store.
///
/// Never fails: a missing URL or a failed connection is logged and returned
/// as [`StoreHandle::Unavailable`].
pub async fn connect(config: &DatabaseConfig) -> StoreHandle {
    let Some(url) = config.url.as_ref() else {
        tracing::warn!("DATABASE_URL not set, serving sample content only");
        return StoreHandle::Unavailable(Unavailable::NotConfigured);
    };

    match PgDocumentStore::connect(url, config.max_connections).await {
        Ok(store) => {
            tracing::info!(database = %store.name(), "Document store connected");
            StoreHandle::connected(store)
        }
        Err(e) => {
            tracing::error!(error = %e, "Document store connection failed, serving sample content only");
            StoreHandle::Unavailable(Unavailable::ConnectFailed(summarize_error(&e)))
        }
    }
}
