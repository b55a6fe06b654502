//! Testimonial route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use oplaisir_core::Testimonial;

use crate::db::{Collection, Fields};
use crate::error::Result;
use crate::fallback;
use crate::models::TestimonialCard;
use crate::state::AppState;

/// Most testimonials shown from the store.
pub const LIVE_LIMIT: u32 = 12;

/// List testimonials, or the samples when no store is connected.
///
/// # Errors
///
/// Returns `AppError::Store` if the query fails.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<TestimonialCard>>> {
    let Some(store) = state.store() else {
        return Ok(Json(fallback::testimonials()));
    };

    let documents = Collection::of::<Testimonial>(store)
        .find(&Fields::new(), Some(LIVE_LIMIT))
        .await?;

    Ok(Json(documents.iter().map(TestimonialCard::from_document).collect()))
}
