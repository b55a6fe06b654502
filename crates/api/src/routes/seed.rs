//! Seed route handler.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::seed::seed_sample_content;
use crate::state::AppState;

/// Seed starter products and testimonials into empty collections.
///
/// # Errors
///
/// - `AppError::StoreNotConfigured` if no store is connected
/// - `AppError::Store` if a count or insert fails
#[instrument(skip(state))]
pub async fn seed(State(state): State<AppState>) -> Result<Json<Value>> {
    let store = state.store().ok_or(AppError::StoreNotConfigured)?;
    seed_sample_content(store).await?;
    Ok(Json(json!({ "status": "ok" })))
}
