//! Process-local document store.
//!
//! Used by tests and for local previews without `PostgreSQL`. Behaves like
//! the `PostgreSQL` store for every operation except that it enforces no
//! unique indexes.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Number, Value};
use tokio::sync::RwLock;

use oplaisir_core::DocumentId;

use super::{Document, DocumentStore, Fields, StoreError};

/// Document store backed by in-process maps.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .iter()
            .filter(|(_, documents)| !documents.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let now = Utc::now();
        let document = Document {
            id: DocumentId::generate(),
            fields,
            created_at: now,
            updated_at: now,
        };

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Fields,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let limit = limit.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));
        Ok(documents
            .iter()
            .filter(|document| matches_filter(&document.fields, filter))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, collection: &str, filter: &Fields) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        let count = collections.get(collection).map_or(0, |documents| {
            documents
                .iter()
                .filter(|document| matches_filter(&document.fields, filter))
                .count()
        });
        Ok(count as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Whether `fields` has every `filter` entry with an equal value.
fn matches_filter(fields: &Fields, filter: &Fields) -> bool {
    filter
        .iter()
        .all(|(key, expected)| fields.get(key).is_some_and(|actual| values_equal(actual, expected)))
}

/// Exact JSON equality where `89` and `89.0` are the same number, as in
/// JSONB. Arrays and objects compare element by element, never by
/// containment.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Integers compare exactly; `f64` is only used when either side is a float.
fn numbers_equal(x: &Number, y: &Number) -> bool {
    if x.is_f64() || y.is_f64() {
        return match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => (x - y).abs() <= f64::EPSILON * x.abs().max(y.abs()),
            _ => false,
        };
    }
    match (x.as_i64(), y.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => x.as_u64().is_some_and(|x| y.as_u64() == Some(x)),
    }
}
