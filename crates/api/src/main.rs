//! O'Plaisir API - storefront content service.
//!
//! Serves the catalog, testimonial, and newsletter API (port 8000 by
//! default). When `DATABASE_URL` is unset or the one startup connection
//! fails, reads serve sample content and writes answer 503.

#![cfg_attr(not(test), forbid(unsafe_code))]

use oplaisir_api::config::ApiConfig;
use oplaisir_api::db::{self, DocumentStore};
use oplaisir_api::state::AppState;
use oplaisir_api::{app, telemetry};

#[tokio::main]
async fn main() {
    let config = ApiConfig::from_env().expect("Failed to load configuration");
    let _sentry_guard = telemetry::init(&config);

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p oplaisir-cli -- migrate
    let state = AppState::new(config.clone(), db::connect(&config.database).await);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!("api listening on {}", addr);

    axum::serve(listener, app(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    if let Some(store) = state.store() {
        store.close().await;
        tracing::info!(store = store.name(), "Document store closed");
    }
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
