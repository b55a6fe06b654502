//! HTTP tests against a `PostgreSQL` store.
//!
//! These tests require a reachable database in `DATABASE_URL`; the
//! `documents` table is migrated on first use. Emails are made unique per run
//! so existing rows do not interfere.
//!
//! Run with: cargo test -p oplaisir-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use oplaisir_api::db::PgDocumentStore;
use oplaisir_integration_tests::{TestServer, json_body};
use secrecy::SecretString;
use serde_json::json;

async fn store() -> PgDocumentStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for ignored tests");
    let store = PgDocumentStore::connect(&SecretString::from(url), 2)
        .await
        .unwrap();
    store.migrate().await.unwrap();
    store
}

fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}{nanos}")
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn subscribe_over_http_with_postgres() {
    let server = TestServer::with_store(store().await).await;
    let body = json!({ "email": format!("{}@example.com", unique("http")) });

    let first = json_body(server.post_json("/api/newsletter/subscribe", &body).await).await;
    assert_eq!(first["status"], "ok");
    let second = json_body(server.post_json("/api/newsletter/subscribe", &body).await).await;
    assert_eq!(second["status"], "exists");

    let ready = server.get("/health/ready").await;
    assert_eq!(ready.status(), reqwest::StatusCode::OK);
}
