//! Inspect stored collections.

use oplaisir_api::db::{DocumentStore, Fields, PgDocumentStore, StoreError};

use super::{CommandError, connect};

/// Log every collection with its document count.
///
/// # Errors
///
/// Returns an error if the connection or a query fails.
pub async fn run() -> Result<(), CommandError> {
    let store = connect().await?;
    let result = summarize(&store).await;
    store.close().await;

    let counts = result?;
    if counts.is_empty() {
        tracing::info!("No collections yet. Run `oplaisir-cli seed` to add starter content.");
        return Ok(());
    }

    tracing::info!("Collections");
    tracing::info!("===========");
    for (name, count) in counts {
        tracing::info!("  {name}: {count}");
    }
    Ok(())
}

async fn summarize(store: &PgDocumentStore) -> Result<Vec<(String, u64)>, StoreError> {
    let mut counts = Vec::new();
    for name in store.list_collections().await? {
        let count = store.count(&name, &Fields::new()).await?;
        counts.push((name, count));
    }
    Ok(counts)
}
