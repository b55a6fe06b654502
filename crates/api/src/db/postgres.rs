//! `PostgreSQL` document store.
//!
//! # Table: `documents`
//!
//! Every collection shares one table; `collection` names the bucket and
//! `body` holds the caller fields as JSONB. A filter matches when every one of
//! its keys holds an equal JSONB value in `body` (see [`FILTER_CLAUSE`]).
//! `seq` gives the insertion order that reads return.
//!
//! Queries are built at runtime (`sqlx::query_as`) rather than with the
//! compile-time macros, so the crate builds without a live database.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use uuid::Uuid;

use oplaisir_core::DocumentId;

use super::{Document, DocumentStore, Fields, StoreError};

/// Embedded migrations from `crates/api/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Exact per-key equality between `body` and the filter in `$2`.
///
/// Containment alone would let `{"tags": ["a"]}` match `["a", "b"]`; it is
/// kept as a prefilter for the GIN index, and the `jsonb_each` check then
/// requires every filter value to equal the stored one.
const FILTER_CLAUSE: &str = r"
    body @> $2
    AND NOT EXISTS (
        SELECT 1 FROM jsonb_each($2) AS f (key, value)
        WHERE body -> f.key IS DISTINCT FROM f.value
    )
";

/// Document store backed by a `PostgreSQL` JSONB table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    name: String,
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Fields>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: DocumentId::from(row.id),
            fields: row.body.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(max_connections.min(2))
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

impl PgDocumentStore {
    /// Connect to `database_url` and identify the database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the connection cannot be established.
    pub async fn connect(
        database_url: &SecretString,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = create_pool(database_url, max_connections).await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the database name cannot be read.
    pub async fn from_pool(pool: PgPool) -> Result<Self, StoreError> {
        let name: String = sqlx::query_scalar("SELECT current_database()")
            .fetch_one(&pool)
            .await?;
        Ok(Self { pool, name })
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Migration` if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let names = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT collection FROM documents
            ORDER BY collection
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            RETURNING id, body, created_at, updated_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(collection)
        .bind(Json(&fields))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.message().to_string())
            }
            other => StoreError::Database(other),
        })?;

        Ok(row.into())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Fields,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError> {
        // LIMIT NULL means no limit
        let sql = format!(
            "SELECT id, body, created_at, updated_at FROM documents \
             WHERE collection = $1 AND {FILTER_CLAUSE} \
             ORDER BY seq LIMIT $3"
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(Json(filter))
            .bind(limit.map(i64::from))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn count(&self, collection: &str, filter: &Fields) -> Result<u64, StoreError> {
        let sql =
            format!("SELECT COUNT(*) FROM documents WHERE collection = $1 AND {FILTER_CLAUSE}");
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(collection)
            .bind(Json(filter))
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    //! These tests need a disposable `PostgreSQL` database in `DATABASE_URL`.

    use serde_json::json;

    use super::*;

    async fn test_store() -> PgDocumentStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let store = PgDocumentStore::connect(&SecretString::from(url), 2)
            .await
            .unwrap();
        store.migrate().await.unwrap();
        sqlx::query("TRUNCATE documents")
            .execute(store.pool())
            .await
            .unwrap();
        store
    }

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    #[ignore = "Requires a PostgreSQL database in DATABASE_URL"]
    async fn test_insert_then_find_in_order() {
        let store = test_store().await;
        let a = store
            .insert("product", fields(json!({"title": "A", "tag": "bestseller"})))
            .await
            .unwrap();
        store
            .insert("product", fields(json!({"title": "B", "tag": "nouveau"})))
            .await
            .unwrap();
        let c = store
            .insert("product", fields(json!({"title": "C", "tag": "bestseller"})))
            .await
            .unwrap();

        let filter = fields(json!({"tag": "bestseller"}));
        let found = store.find("product", &filter, None).await.unwrap();
        assert_eq!(
            found.iter().map(|d| d.id.clone()).collect::<Vec<_>>(),
            vec![a.id, c.id]
        );
        assert_eq!(store.count("product", &filter).await.unwrap(), 2);
        assert_eq!(store.find("product", &filter, Some(1)).await.unwrap().len(), 1);
        assert_eq!(store.list_collections().await.unwrap(), vec!["product"]);
    }

    #[tokio::test]
    #[ignore = "Requires a PostgreSQL database in DATABASE_URL"]
    async fn test_non_scalar_filter_is_exact() {
        let store = test_store().await;
        store
            .insert("product", fields(json!({"tags": ["a", "b"], "meta": {"x": 1}})))
            .await
            .unwrap();

        for (filter, expected) in [
            (json!({"tags": ["a"]}), 0),
            (json!({"tags": ["a", "b"]}), 1),
            (json!({"meta": {}}), 0),
            (json!({"meta": {"x": 1.0}}), 1),
        ] {
            let filter = fields(filter);
            assert_eq!(store.count("product", &filter).await.unwrap(), expected, "{filter:?}");
            assert_eq!(
                store.find("product", &filter, None).await.unwrap().len(),
                usize::try_from(expected).unwrap(),
                "{filter:?}"
            );
        }
    }

    #[tokio::test]
    #[ignore = "Requires a PostgreSQL database in DATABASE_URL"]
    async fn test_duplicate_subscriber_email_is_conflict() {
        let store = test_store().await;
        let subscriber = fields(json!({"email": "sofia@example.com"}));
        store
            .insert("newslettersubscriber", subscriber.clone())
            .await
            .unwrap();

        let result = store.insert("newslettersubscriber", subscriber).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }
}
