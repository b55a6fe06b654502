//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. CORS (storefront origins)
//! 3. `TraceLayer` (request span with method, uri, status, latency)
//! 4. Request ID (validated or generated; recorded in the request span, Sentry
//!    scope, and request extensions)

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
