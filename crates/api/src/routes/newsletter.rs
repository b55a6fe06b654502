//! Newsletter subscription route handlers.
//!
//! Subscribers are stored in the `newslettersubscriber` collection, keyed by
//! their normalized (trimmed, lowercased) email. Uniqueness is a
//! read-before-write check; on `PostgreSQL` a partial unique index catches the
//! rare concurrent duplicate, which is then reported as `exists` too.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use oplaisir_core::{Email, NewsletterSubscriber};

use crate::db::{Collection, StoreError, documents::filter_of};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::extract::ApiJson;
use crate::state::AppState;

/// Newsletter subscription request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// Outcome of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscribeStatus {
    /// Newly subscribed.
    Ok,
    /// The email was already subscribed.
    Exists,
}

/// Newsletter subscription response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub status: SubscribeStatus,
    pub message: String,
}

impl SubscribeResponse {
    fn subscribed() -> Self {
        Self {
            status: SubscribeStatus::Ok,
            message: "Merci pour votre inscription !".to_string(),
        }
    }

    fn already_subscribed() -> Self {
        Self {
            status: SubscribeStatus::Exists,
            message: "Déjà inscrit".to_string(),
        }
    }
}

/// Subscribe to the newsletter.
///
/// # Errors
///
/// - `AppError::Validation` if the email is malformed
/// - `AppError::StoreNotConfigured` if no store is connected
/// - `AppError::Store` if the lookup or insert fails
#[instrument(skip(state, body))]
pub async fn subscribe(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>> {
    let email = Email::parse_normalized(&body.email)
        .map_err(|e| AppError::Validation(format!("email: {e}")))?;

    let store = state.store().ok_or(AppError::StoreNotConfigured)?;
    let subscribers = Collection::of::<NewsletterSubscriber>(store);

    let filter = filter_of([("email", Some(json!(email.as_str())))]);
    if subscribers.find_one(&filter).await?.is_some() {
        tracing::info!(email = %email, "Email already subscribed");
        return Ok(Json(SubscribeResponse::already_subscribed()));
    }

    match subscribers
        .insert_record(&NewsletterSubscriber {
            email: email.clone(),
        })
        .await
    {
        Ok(_) => {
            tracing::info!(email = %email, "Newsletter subscription successful");
            add_breadcrumb("newsletter", "Subscribed", Some(&[("domain", email.domain())]));
            Ok(Json(SubscribeResponse::subscribed()))
        }
        Err(StoreError::Conflict(_)) => {
            tracing::info!(email = %email, "Concurrent duplicate subscription");
            Ok(Json(SubscribeResponse::already_subscribed()))
        }
        Err(e) => {
            tracing::warn!(email = %email, error = %e, "Newsletter subscription failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::db::{DocumentStore, Fields, InMemoryDocumentStore, StoreHandle, Unavailable};

    fn request(email: &str) -> ApiJson<SubscribeRequest> {
        ApiJson(SubscribeRequest {
            email: email.to_string(),
        })
    }

    #[tokio::test]
    async fn test_subscribe_twice_reports_exists() {
        let state = AppState::new(
            ApiConfig::default(),
            StoreHandle::connected(InMemoryDocumentStore::new()),
        );

        let Json(first) = subscribe(State(state.clone()), request("sofia@example.com"))
            .await
            .unwrap();
        assert_eq!(first.status, SubscribeStatus::Ok);

        let Json(second) = subscribe(State(state.clone()), request(" Sofia@Example.com "))
            .await
            .unwrap();
        assert_eq!(second.status, SubscribeStatus::Exists);
        assert_eq!(second.message, "Déjà inscrit");

        let store = state.store().unwrap();
        assert_eq!(
            store
                .count("newslettersubscriber", &Fields::new())
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_subscribe_without_store_is_unavailable() {
        let state = AppState::new(
            ApiConfig::default(),
            StoreHandle::Unavailable(Unavailable::NotConfigured),
        );

        let result = subscribe(State(state), request("sofia@example.com")).await;
        assert!(matches!(result, Err(AppError::StoreNotConfigured)));
    }

    #[tokio::test]
    async fn test_subscribe_rejects_invalid_email() {
        let state = AppState::new(
            ApiConfig::default(),
            StoreHandle::Unavailable(Unavailable::NotConfigured),
        );

        let result = subscribe(State(state), request("not-an-email")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(SubscribeResponse::subscribed()).unwrap();
        assert_eq!(json["status"], "ok");
        let json = serde_json::to_value(SubscribeResponse::already_subscribed()).unwrap();
        assert_eq!(json["status"], "exists");
    }
}
