//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - API banner
//! GET  /api/hello                 - Greeting
//! GET  /test                      - Store diagnostics (never errors)
//! GET  /health                    - Liveness
//! GET  /health/ready              - Readiness (store connected and answering)
//!
//! # Content
//! GET  /api/occasions             - Fixed list of gifting occasions
//! POST /api/products/bestsellers  - Filtered products (samples without a store)
//! GET  /api/testimonials          - Testimonials (samples without a store)
//!
//! # Writes (503 without a store)
//! POST /api/newsletter/subscribe  - Newsletter subscription
//! POST /api/seed                  - Seed starter content into empty collections
//! ```

pub mod home;
pub mod newsletter;
pub mod occasions;
pub mod products;
pub mod seed;
pub mod status;
pub mod testimonials;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the `/api` content routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(home::hello))
        .route("/occasions", get(occasions::index))
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route("/products/bestsellers", post(products::bestsellers))
        .route("/testimonials", get(testimonials::index))
        .route("/seed", post(seed::seed))
}

/// Create the status routes router.
pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/test", get(status::diagnostics))
        .route("/health", get(status::health))
        .route("/health/ready", get(status::readiness))
}

/// Create the combined router for all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::root))
        .merge(status_routes())
        .nest("/api", api_routes())
}
