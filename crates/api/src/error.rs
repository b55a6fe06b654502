//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers that can fail return
//! `Result<T, AppError>`; failures render as `{"detail": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

/// Longest diagnostic message exposed to clients or status reports.
pub const MAX_DIAGNOSTIC_CHARS: usize = 80;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// No document store was connected at startup.
    #[error("Database not configured")]
    StoreNotConfigured,

    /// Document store operation failed after a successful connection.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Request body or parameters failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::StoreNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Client-facing detail message.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::StoreNotConfigured => self.to_string(),
            Self::Store(err) => summarize_error(err),
            Self::Validation(msg) => msg.clone(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Store(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Render an error as a single line of at most [`MAX_DIAGNOSTIC_CHARS`]
/// characters.
pub fn summarize_error(err: &impl std::fmt::Display) -> String {
    truncate_chars(&err.to_string(), MAX_DIAGNOSTIC_CHARS)
}

/// Keep the first `max` characters of `s` (not bytes, so accents survive).
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
