//! Subcommand implementations.
//!
//! Every command connects to the store named by `DATABASE_URL`. Unlike the
//! API server, the CLI has no degraded mode: a missing URL or a failed
//! connection is an error.

pub mod collections;
pub mod migrate;
pub mod seed;

use oplaisir_api::config::{ApiConfig, ConfigError};
use oplaisir_api::db::{DocumentStore, PgDocumentStore, StoreError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Environment variable present but unparseable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Store connection, query, or migration failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Connect to the configured `PostgreSQL` store.
///
/// # Errors
///
/// Returns `CommandError::MissingEnvVar` if `DATABASE_URL` is unset, or
/// `CommandError::Store` if the connection fails.
pub async fn connect() -> Result<PgDocumentStore, CommandError> {
    let config = ApiConfig::from_env()?;
    let url = config
        .database
        .url
        .as_ref()
        .ok_or(CommandError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let store = PgDocumentStore::connect(url, config.database.max_connections).await?;
    tracing::info!(database = %store.name(), "Connected");
    Ok(store)
}
