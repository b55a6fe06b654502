//! Collection-agnostic document access.
//!
//! [`create_document`] and [`get_documents`] work on any named collection with
//! plain field maps; [`Collection`] adds typed helpers on top for the records
//! in `oplaisir_core`. None of these cache, batch, or retry: each call is one
//! store round-trip and its error is returned as-is.

use serde_json::Value;

use oplaisir_core::Record;

use super::{Document, DocumentStore, Fields, RESERVED_FIELDS, StoreError};

/// Insert `fields` into `collection` and return the stored document.
///
/// # Errors
///
/// Returns `StoreError::ReservedField` if `fields` sets a store-assigned
/// field, or the backend error if the write fails.
#[tracing::instrument(skip_all, fields(collection = %collection, store = %store.name()))]
pub async fn create_document(
    store: &dyn DocumentStore,
    collection: &str,
    fields: Fields,
) -> Result<Document, StoreError> {
    if let Some(reserved) = RESERVED_FIELDS.iter().find(|key| fields.contains_key(**key)) {
        return Err(StoreError::ReservedField((*reserved).to_string()));
    }
    let document = store.insert(collection, fields).await?;
    tracing::debug!(id = %document.id, "Document created");
    Ok(document)
}

/// Documents in `collection` whose fields equal every entry of `filter`.
///
/// Equality only: `{"tag": "bestseller"}` matches documents whose `tag` is
/// exactly `"bestseller"`. An empty filter matches every document. Results are
/// in insertion order, at most `limit` when given.
///
/// # Errors
///
/// Returns the backend error if the query fails.
#[tracing::instrument(skip_all, fields(collection = %collection, ?limit))]
pub async fn get_documents(
    store: &dyn DocumentStore,
    collection: &str,
    filter: &Fields,
    limit: Option<u32>,
) -> Result<Vec<Document>, StoreError> {
    store.find(collection, filter, limit).await
}

/// Number of documents in `collection` matching `filter`.
///
/// # Errors
///
/// Returns the backend error if the query fails.
pub async fn count_documents(
    store: &dyn DocumentStore,
    collection: &str,
    filter: &Fields,
) -> Result<u64, StoreError> {
    store.count(collection, filter).await
}

/// A named collection selected from a store.
#[derive(Clone, Copy)]
pub struct Collection<'a> {
    store: &'a dyn DocumentStore,
    name: &'a str,
}

impl<'a> Collection<'a> {
    /// Select `name` from `store`.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore, name: &'a str) -> Self {
        Self { store, name }
    }

    /// The collection for records of type `T`.
    #[must_use]
    pub const fn of<T: Record>(store: &'a dyn DocumentStore) -> Self {
        Self::new(store, T::COLLECTION)
    }

    /// Collection name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name
    }

    /// See [`create_document`].
    ///
    /// # Errors
    ///
    /// Returns the backend error if the write fails.
    pub async fn create(&self, fields: Fields) -> Result<Document, StoreError> {
        create_document(self.store, self.name, fields).await
    }

    /// See [`get_documents`].
    ///
    /// # Errors
    ///
    /// Returns the backend error if the query fails.
    pub async fn find(&self, filter: &Fields, limit: Option<u32>) -> Result<Vec<Document>, StoreError> {
        get_documents(self.store, self.name, filter, limit).await
    }

    /// First document matching `filter`, if any.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the query fails.
    pub async fn find_one(&self, filter: &Fields) -> Result<Option<Document>, StoreError> {
        Ok(self.find(filter, Some(1)).await?.into_iter().next())
    }

    /// See [`count_documents`].
    ///
    /// # Errors
    ///
    /// Returns the backend error if the query fails.
    pub async fn count(&self, filter: &Fields) -> Result<u64, StoreError> {
        count_documents(self.store, self.name, filter).await
    }

    /// Serialize `record` and insert it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidDocument` if the record is not a JSON
    /// object, or the backend error if the write fails.
    pub async fn insert_record<T: Record>(&self, record: &T) -> Result<Document, StoreError> {
        self.create(to_fields(record)?).await
    }
}

/// Serialize a record into a field map.
///
/// # Errors
///
/// Returns `StoreError::InvalidDocument` if `record` does not serialize to a
/// JSON object.
pub fn to_fields<T: Record>(record: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(StoreError::InvalidDocument(format!(
            "{} record serialized to {other}",
            T::COLLECTION
        ))),
        Err(e) => Err(StoreError::InvalidDocument(e.to_string())),
    }
}

/// Build an equality filter from `(field, value)` pairs, skipping `None`s.
#[must_use]
pub fn filter_of<'k>(pairs: impl IntoIterator<Item = (&'k str, Option<Value>)>) -> Fields {
    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect()
}
