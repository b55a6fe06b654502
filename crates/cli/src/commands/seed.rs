//! Seed starter catalog content.

use oplaisir_api::db::DocumentStore;
use oplaisir_api::seed::seed_sample_content;

use super::{CommandError, connect};

/// Insert the starter products and testimonials into empty collections.
///
/// # Errors
///
/// Returns an error if the connection, a count, or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let store = connect().await?;

    let result = seed_sample_content(&store).await;
    store.close().await;
    let report = result?;

    tracing::info!("Seeding complete!");
    tracing::info!("  Products inserted: {}", report.products_inserted);
    tracing::info!("  Testimonials inserted: {}", report.testimonials_inserted);
    Ok(())
}
