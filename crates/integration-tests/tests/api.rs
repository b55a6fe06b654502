//! End-to-end HTTP tests against an in-memory store and degraded mode.
//!
//! Run with: cargo test -p oplaisir-integration-tests

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use oplaisir_api::db::{DocumentStore, InMemoryDocumentStore};
use oplaisir_integration_tests::{TestServer, json_body};
use reqwest::StatusCode;
use serde_json::{Value, json};

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect()
}

// ============================================================================
// Informational endpoints
// ============================================================================

#[tokio::test]
async fn root_and_hello() {
    let server = TestServer::degraded().await;

    let body = json_body(server.get("/").await).await;
    assert_eq!(body, json!({ "message": "O'Plaisir API is running" }));

    let body = json_body(server.get("/api/hello").await).await;
    assert_eq!(body, json!({ "message": "Bienvenue sur l'API O'Plaisir" }));
}

#[tokio::test]
async fn occasions_are_fixed_and_ordered() {
    let server = TestServer::degraded().await;

    let body = json_body(server.get("/api/occasions").await).await;
    let keys: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec!["noel", "ramadan", "paques", "saintvalentin", "anniversaire", "mariage"]
    );
    assert_eq!(body[5]["label"], "Mariages & Naissances");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let server = TestServer::degraded().await;

    let response = server.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await.unwrap(), "ok");
}

// ============================================================================
// Degraded mode
// ============================================================================

#[tokio::test]
async fn degraded_bestsellers_return_samples_in_order() {
    let server = TestServer::degraded().await;

    let response = server.post_json("/api/products/bestsellers", &json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        titles(&body),
        vec![
            "Panier Chocolat Signature",
            "Coffret Méditerranéen Prestige",
            "Assortiment Découverte",
        ]
    );
    assert_eq!(body[0]["_id"], "demo1");
    assert_eq!(body[0]["price"], 89.0);
    assert_eq!(body[0]["tag"], "bestseller");
}

#[tokio::test]
async fn degraded_testimonials_return_samples() {
    let server = TestServer::degraded().await;

    let body = json_body(server.get("/api/testimonials").await).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[2], json!({
        "name": "Lina",
        "message": "Personnalisation parfaite pour notre mariage.",
        "rating": 4,
    }));
}

#[tokio::test]
async fn degraded_writes_are_unavailable() {
    let server = TestServer::degraded().await;

    let response = server
        .post_json("/api/newsletter/subscribe", &json!({ "email": "sofia@example.com" }))
        .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        json_body(response).await,
        json!({ "detail": "Database not configured" })
    );

    let response = server.post_empty("/api/seed").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn degraded_diagnostics_and_readiness() {
    let server = TestServer::degraded().await;

    let response = server.get("/test").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["backend"], "✅ Running");
    assert_eq!(body["database"], "⚠️ Available but not initialized");
    assert_eq!(body["connection_status"], "Not Connected");
    assert_eq!(body["collections"], json!([]));

    let response = server.get("/health/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn degraded_and_live_bestsellers_share_field_names() {
    let degraded = TestServer::degraded().await;
    let live = TestServer::in_memory().await;
    live.post_empty("/api/seed").await;

    let sample = json_body(degraded.post_json("/api/products/bestsellers", &json!({})).await).await;
    let stored = json_body(live.post_json("/api/products/bestsellers", &json!({})).await).await;

    let sample_keys: Vec<_> = sample[0].as_object().unwrap().keys().collect();
    let stored_fields = stored[0].as_object().unwrap();
    for key in sample_keys {
        assert!(stored_fields.contains_key(key), "live listing lacks {key}");
    }
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn bestseller_limit_is_bounded() {
    let server = TestServer::degraded().await;

    for limit in [0, 51] {
        let response = server
            .post_json("/api/products/bestsellers", &json!({ "limit": limit }))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "limit {limit}");
        assert!(json_body(response).await["detail"].is_string());
    }

    let body = json_body(
        server
            .post_json("/api/products/bestsellers", &json!({ "limit": 1 }))
            .await,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let server = TestServer::in_memory().await;

    let response = server
        .post_json("/api/newsletter/subscribe", &json!({ "email": "pas-un-email" }))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let server = TestServer::in_memory().await;

    let response = server
        .post_json("/api/newsletter/subscribe", &json!({ "mail": "sofia@example.com" }))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(response).await["detail"].is_string());
}

// ============================================================================
// Live store
// ============================================================================

#[tokio::test]
async fn subscribing_twice_reports_exists() {
    let server = TestServer::in_memory().await;
    let body = json!({ "email": "karim@example.com" });

    let first = json_body(server.post_json("/api/newsletter/subscribe", &body).await).await;
    assert_eq!(
        first,
        json!({ "status": "ok", "message": "Merci pour votre inscription !" })
    );

    let second = json_body(server.post_json("/api/newsletter/subscribe", &body).await).await;
    assert_eq!(second, json!({ "status": "exists", "message": "Déjà inscrit" }));

    let diagnostics = json_body(server.get("/test").await).await;
    assert_eq!(diagnostics["collections"], json!(["newslettersubscriber"]));
}

#[tokio::test]
async fn seed_then_read() {
    let server = TestServer::in_memory().await;

    let response = server.post_empty("/api/seed").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));

    // Seeding again must not duplicate anything
    server.post_empty("/api/seed").await;

    let testimonials = json_body(server.get("/api/testimonials").await).await;
    let cards: Vec<_> = testimonials
        .as_array()
        .unwrap()
        .iter()
        .map(|t| (t["name"].as_str().unwrap(), t["rating"].as_u64().unwrap()))
        .collect();
    assert_eq!(cards, vec![("Sofia", 5), ("Karim", 5)]);

    let products = json_body(server.post_json("/api/products/bestsellers", &json!({})).await).await;
    assert_eq!(
        titles(&products),
        vec!["Panier Chocolat Premium", "Coffret Méditerranéen", "Panier Découverte"]
    );

    let bestsellers = json_body(
        server
            .post_json(
                "/api/products/bestsellers",
                &json!({ "tag": "bestseller", "category": "paniers", "limit": 8 }),
            )
            .await,
    )
    .await;
    assert_eq!(
        titles(&bestsellers),
        vec!["Panier Chocolat Premium", "Coffret Méditerranéen"]
    );
    assert_eq!(bestsellers[1]["price"], 119.0);
}

#[tokio::test]
async fn loosely_typed_documents_are_listed() {
    let store = InMemoryDocumentStore::new();
    for (collection, value) in [
        ("product", json!({ "title": "Sans categorie", "price": 10.0 })),
        ("product", json!({ "title": "Coffret", "price": 119.0, "category": "paniers" })),
        ("testimonial", json!({ "name": "Sofia", "message": "Top", "rating": 5.0 })),
    ] {
        let Value::Object(fields) = value else {
            unreachable!()
        };
        store.insert(collection, fields).await.unwrap();
    }
    let server = TestServer::with_store(store).await;

    let products = json_body(
        server
            .post_json("/api/products/bestsellers", &json!({ "limit": 1 }))
            .await,
    )
    .await;
    assert_eq!(titles(&products), vec!["Sans categorie"]);
    assert!(products[0]["image"].is_string());
    assert!(products[0]["_id"].is_string());

    let testimonials = json_body(server.get("/api/testimonials").await).await;
    assert_eq!(
        testimonials,
        json!([{ "name": "Sofia", "message": "Top", "rating": 5 }])
    );
}

#[tokio::test]
async fn live_diagnostics_and_readiness() {
    let server = TestServer::in_memory().await;
    server.post_empty("/api/seed").await;

    let body = json_body(server.get("/test").await).await;
    assert_eq!(body["database"], "✅ Connected & Working");
    assert_eq!(body["connection_status"], "Connected");
    assert_eq!(body["database_name"], "memory");
    assert_eq!(body["collections"], json!(["product", "testimonial"]));

    let response = server.get("/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}
