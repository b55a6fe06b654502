//! Informational endpoints.

use axum::Json;

use crate::models::MessageResponse;

/// `GET /`
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("O'Plaisir API is running"))
}

/// `GET /api/hello`
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Bienvenue sur l'API O'Plaisir"))
}
