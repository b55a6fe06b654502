//! Product listing route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use oplaisir_core::Product;

use crate::db::{Collection, Fields, documents::filter_of};
use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::fallback;
use crate::models::ProductListing;
use crate::state::AppState;

/// Default number of bestsellers returned.
pub const DEFAULT_LIMIT: u32 = 8;

/// Largest accepted `limit`.
pub const MAX_LIMIT: u32 = 50;

/// Bestsellers request body. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct BestsellerFilter {
    pub tag: Option<String>,
    pub category: Option<String>,
    pub limit: Option<i64>,
}

impl BestsellerFilter {
    /// The requested limit, defaulted and checked against `1..=MAX_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the limit is out of range.
    pub fn limit(&self) -> Result<u32> {
        let Some(limit) = self.limit else {
            return Ok(DEFAULT_LIMIT);
        };

        u32::try_from(limit)
            .ok()
            .filter(|l| (1..=MAX_LIMIT).contains(l))
            .ok_or_else(|| {
                AppError::Validation(format!("limit: must be between 1 and {MAX_LIMIT}, got {limit}"))
            })
    }

    /// Equality filter on the non-empty `tag` and `category`.
    fn to_filter(&self) -> Fields {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| Value::String(v.to_string()))
        };
        filter_of([
            ("tag", non_empty(&self.tag)),
            ("category", non_empty(&self.category)),
        ])
    }
}

/// List bestselling products.
///
/// Stored documents are listed with whatever fields they carry; only a
/// missing `image` is filled in. Without a store, the sample bestsellers are returned, truncated to the
/// requested limit.
///
/// # Errors
///
/// - `AppError::Validation` if `limit` is out of range
/// - `AppError::Store` if the query fails
#[instrument(skip(state, filter), fields(tag = ?filter.tag, category = ?filter.category))]
pub async fn bestsellers(
    State(state): State<AppState>,
    ApiJson(filter): ApiJson<BestsellerFilter>,
) -> Result<Json<Vec<ProductListing>>> {
    let limit = filter.limit()?;

    let Some(store) = state.store() else {
        tracing::debug!("No store, serving sample bestsellers");
        return Ok(Json(fallback::bestsellers(usize::try_from(limit).ok())));
    };

    let documents = Collection::of::<Product>(store)
        .find(&filter.to_filter(), Some(limit))
        .await?;

    Ok(Json(documents.into_iter().map(ProductListing::from_document).collect()))
}
