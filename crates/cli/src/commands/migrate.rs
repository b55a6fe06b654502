//! Database migration command.
//!
//! Migrations live in `crates/api/migrations/` and are embedded in the
//! `oplaisir-api` crate. The server never runs them on startup.

use oplaisir_api::db::DocumentStore;

use super::{CommandError, connect};

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let store = connect().await?;

    tracing::info!("Running migrations...");
    let result = store.migrate().await;
    store.close().await;
    result?;

    tracing::info!("Migrations complete!");
    Ok(())
}
