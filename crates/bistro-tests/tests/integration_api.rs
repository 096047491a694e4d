// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # API Integration Tests
//!
//! Drives the full router (middleware, handlers, in-memory store) in-process.
//!
//! ## Test Categories
//!
//! - `test_public_*`: routes without authentication
//! - `test_auth_*`: bearer token verification
//! - `test_admin_*`: the admin gate and role elevation
//! - `test_user_*`, `test_menu_*`, `test_cart_*`: resource behaviour

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Map, Value};

use bistro_api::{Claims, JwtConfig, JwtManager};
use bistro_store::{Collection, DocumentStore, Filter};
use bistro_tests::prelude::*;

// =============================================================================
// Public Routes
// =============================================================================

#[tokio::test]
async fn test_public_root_greeting() {
    let app = TestApp::new();
    let (status, body) = app.get("/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Hello world"));
}

#[tokio::test]
async fn test_public_health_and_readiness() {
    let app = TestApp::new();

    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.get("/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn test_public_jwt_issues_verifiable_token() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/jwt", None, json!({ "email": "diner@bistro.test" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token is a string");
    assert_eq!(token.split('.').count(), 3);

    let data = app.jwt.validate_token(token).unwrap();
    assert_eq!(data.claims.email(), Some("diner@bistro.test"));
    assert_eq!(data.claims.exp - data.claims.iat, 3600);
}

#[tokio::test]
async fn test_public_reviews_list() {
    let app = TestApp::new();
    let (status, body) = app.get("/review", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    app.store
        .insert_one(
            Collection::Review,
            bistro_store::into_document(json!({ "name": "Ana", "rating": 5 })).unwrap(),
        )
        .await
        .unwrap();

    let (_, body) = app.get("/review", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_auth_missing_header_is_unauthorized() {
    init_test_logging();
    let app = TestApp::new();
    let (status, body) = app.get("/user", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "unauthorized access");
}

#[tokio::test]
async fn test_auth_malformed_headers_are_unauthorized() {
    let app = TestApp::new();
    let token = app.seed_admin("chef@bistro.test").await;

    for value in [
        format!("Token {}", token),
        "Bearer ".to_string(),
        "Bearer not.a.token".to_string(),
        token.clone(),
    ] {
        let request = Request::builder()
            .uri("/user")
            .header(header::AUTHORIZATION, value.clone())
            .body(Body::empty())
            .unwrap();
        let (status, body) = app.send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", value);
        assert_eq!(body["message"], "unauthorized access");
    }
}

#[tokio::test]
async fn test_auth_foreign_signature_is_unauthorized() {
    let app = TestApp::new();
    app.seed_admin("chef@bistro.test").await;

    let other = JwtManager::new(JwtConfig::new("some-other-secret-that-is-long-enough")).unwrap();
    let mut payload = Map::new();
    payload.insert("email".to_string(), json!("chef@bistro.test"));
    let forged = other.issue_token(payload).unwrap();

    let (status, _) = app.get("/user", Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_expired_token_is_unauthorized() {
    let app = TestApp::new();
    app.seed_admin("chef@bistro.test").await;

    let mut payload = Map::new();
    payload.insert("email".to_string(), json!("chef@bistro.test"));
    let expired = app.jwt.create_token(&Claims::new(payload, -120)).unwrap();

    let (status, _) = app.get("/user", Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Admin Gate
// =============================================================================

#[tokio::test]
async fn test_admin_gate_allows_admin() {
    let app = TestApp::new();
    let token = app.seed_admin("chef@bistro.test").await;
    app.seed_user("diner@bistro.test", "user").await;

    let (status, body) = app.get("/user", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_admin_gate_rejects_regular_user() {
    let app = TestApp::new();
    let token = app.seed_user("diner@bistro.test", "user").await;

    let (status, body) = app.get("/user", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "forbidden access");
}

#[tokio::test]
async fn test_admin_gate_rejects_unknown_user() {
    let app = TestApp::new();
    let token = app.token_for("ghost@bistro.test");

    let (status, _) = app
        .post("/menu", Some(&token), json!({ "name": "Ghost Soup" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.count(Collection::Menu), 0);
}

#[tokio::test]
async fn test_admin_gate_ignores_role_claim_in_token() {
    let app = TestApp::new();
    app.seed_user("diner@bistro.test", "user").await;

    let mut payload = Map::new();
    payload.insert("email".to_string(), json!("diner@bistro.test"));
    payload.insert("role".to_string(), json!("admin"));
    let token = app.jwt.issue_token(payload).unwrap();

    let (status, _) = app.get("/user", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_status_is_self_scoped() {
    let app = TestApp::new();
    let diner = app.seed_user("diner@bistro.test", "user").await;
    let chef = app.seed_admin("chef@bistro.test").await;

    let (status, body) = app.get("/user/admin/diner@bistro.test", Some(&diner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "admin": false }));

    let (status, body) = app.get("/user/admin/chef@bistro.test", Some(&chef)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "admin": true }));

    let (status, _) = app.get("/user/admin/chef@bistro.test", Some(&diner)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/user/admin/diner@bistro.test", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_elevation_takes_effect_on_next_request() {
    let app = TestApp::new();
    let chef = app.seed_admin("chef@bistro.test").await;

    let (_, created) = app
        .post("/menu", Some(&chef), json!(MenuFixtures::tart()))
        .await;
    let item_id = created["insertedId"].as_str().unwrap().to_string();

    let (status, registered) = app
        .post("/user", None, UserFixtures::registration("diner@bistro.test"))
        .await;
    assert_eq!(status, StatusCode::OK);
    let diner_id = registered["insertedId"].as_str().unwrap().to_string();
    let diner = app.token_for("diner@bistro.test");

    // Before elevation
    let (status, _) = app.delete(&format!("/menu/{}", item_id), Some(&diner)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .patch(&format!("/user/admin/{}", diner_id), Some(&chef), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], 1);

    // Same token, now admin
    let (status, body) = app.delete(&format!("/menu/{}", item_id), Some(&diner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);
}

#[tokio::test]
async fn test_admin_self_elevation_is_forbidden() {
    let app = TestApp::new();
    let (_, registered) = app
        .post("/user", None, UserFixtures::registration("diner@bistro.test"))
        .await;
    let diner_id = registered["insertedId"].as_str().unwrap().to_string();
    let diner = app.token_for("diner@bistro.test");
    let uri = format!("/user/admin/{}", diner_id);

    let (status, body) = app.patch(&uri, Some(&diner), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "forbidden access");

    let (status, _) = app.patch(&uri, None, json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let stored = app
        .store
        .find_one(Collection::User, Filter::by_id(&diner_id))
        .await
        .unwrap()
        .unwrap();
    assert!(stored.get("role").is_none());

    let (status, _) = app.get("/user", Some(&diner)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_user_registration_is_idempotent() {
    let app = TestApp::new();
    let registration = UserFixtures::registration("diner@bistro.test");

    let (status, first) = app.post("/user", None, registration.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(first["insertedId"].is_string());

    let (status, second) = app.post("/user", None, registration).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        second,
        json!({ "message": "user already exists", "insertedId": null })
    );
    assert_eq!(app.store.count(Collection::User), 1);
}

#[tokio::test]
async fn test_user_registration_cannot_claim_admin() {
    let app = TestApp::new();
    let mut registration = UserFixtures::registration("sneaky@bistro.test");
    registration["role"] = json!("admin");

    app.post("/user", None, registration).await;

    let stored = app
        .store
        .find_one(Collection::User, Filter::eq("email", "sneaky@bistro.test"))
        .await
        .unwrap()
        .unwrap();
    assert!(stored.get("role").is_none());

    let token = app.token_for("sneaky@bistro.test");
    let (status, _) = app.get("/user", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_registration_requires_email() {
    let app = TestApp::new();
    let (status, body) = app.post("/user", None, json!({ "name": "Nobody" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_user_delete_requires_admin() {
    let app = TestApp::new();
    let diner = app.seed_user("diner@bistro.test", "user").await;
    let (_, registered) = app
        .post("/user", None, UserFixtures::registration("guest@bistro.test"))
        .await;
    let uri = format!("/user/{}", registered["insertedId"].as_str().unwrap());

    let (status, _) = app.delete(&uri, Some(&diner)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(app.store.count(Collection::User), 2);
    let guest = app
        .store
        .find_one(Collection::User, Filter::eq("email", "guest@bistro.test"))
        .await
        .unwrap();
    assert!(guest.is_some());
}

#[tokio::test]
async fn test_user_delete_by_admin() {
    let app = TestApp::new();
    let chef = app.seed_admin("chef@bistro.test").await;
    let (_, registered) = app
        .post("/user", None, UserFixtures::registration("diner@bistro.test"))
        .await;
    let id = registered["insertedId"].as_str().unwrap();

    let (status, body) = app.delete(&format!("/user/{}", id), Some(&chef)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);
    assert_eq!(app.store.count(Collection::User), 1);
}

// =============================================================================
// Menu
// =============================================================================

#[tokio::test]
async fn test_menu_empty_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app.get("/menu", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "code": "NOT_FOUND", "message": "No menu items found" }));
}

#[tokio::test]
async fn test_menu_crud() {
    let app = TestApp::new();
    let chef = app.seed_admin("chef@bistro.test").await;

    let (status, created) = app
        .post("/menu", Some(&chef), json!(MenuFixtures::steak()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["acknowledged"], true);
    let id = created["insertedId"].as_str().unwrap().to_string();

    let (status, items) = app.get("/menu", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items[0]["name"], "Ribeye Steak");
    assert_eq!(items[0]["_id"], json!(id));

    let (status, body) = app
        .patch(&format!("/menu/{}", id), Some(&chef), json!({ "price": 26.0 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modifiedCount"], 1);

    let (status, item) = app.get(&format!("/menu/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["price"], 26.0);
    assert_eq!(item["category"], "main");

    let (status, _) = app
        .patch(&format!("/menu/{}", id), Some(&chef), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/menu/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_menu_writes_require_admin() {
    let app = TestApp::new();
    let diner = app.seed_user("diner@bistro.test", "user").await;

    let (status, _) = app
        .post("/menu", None, json!(MenuFixtures::tart()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post("/menu", Some(&diner), json!(MenuFixtures::tart()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.count(Collection::Menu), 0);
}

#[tokio::test]
async fn test_menu_update_requires_admin() {
    let app = TestApp::new();
    let chef = app.seed_admin("chef@bistro.test").await;
    let diner = app.seed_user("diner@bistro.test", "user").await;

    let (_, created) = app
        .post("/menu", Some(&chef), json!(MenuFixtures::steak()))
        .await;
    let uri = format!("/menu/{}", created["insertedId"].as_str().unwrap());
    let (_, before) = app.get(&uri, None).await;

    let (status, _) = app.patch(&uri, Some(&diner), json!({ "price": 0.5 })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.patch(&uri, None, json!({ "price": 0.5 })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, after) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_menu_delete_without_token_keeps_item() {
    let app = TestApp::new();
    let chef = app.seed_admin("chef@bistro.test").await;

    let (_, created) = app
        .post("/menu", Some(&chef), json!(MenuFixtures::tart()))
        .await;
    let uri = format!("/menu/{}", created["insertedId"].as_str().unwrap());

    let (status, body) = app.delete(&uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "unauthorized access");

    assert_eq!(app.store.count(Collection::Menu), 1);
    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Carts
// =============================================================================

#[tokio::test]
async fn test_cart_flow() {
    let app = TestApp::new();

    let (status, first) = app
        .post("/cart", None, CartFixtures::entry("ana@bistro.test", "m1"))
        .await;
    assert_eq!(status, StatusCode::OK);
    app.post("/cart", None, CartFixtures::entry("ana@bistro.test", "m2"))
        .await;
    app.post("/cart", None, CartFixtures::entry("ben@bistro.test", "m1"))
        .await;

    let (status, all) = app.get("/cart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, ana) = app.get("/cart?email=ana@bistro.test", None).await;
    let ana = ana.as_array().unwrap();
    assert_eq!(ana.len(), 2);
    assert!(ana.iter().all(|e| e["email"] == "ana@bistro.test"));

    let id = first["insertedId"].as_str().unwrap();
    let (status, body) = app.delete(&format!("/cart/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);

    let (_, ana) = app.get("/cart?email=ana@bistro.test", None).await;
    assert_eq!(ana.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cart_rejects_non_object_body() {
    let app = TestApp::new();
    let (status, body) = app.post("/cart", None, Value::from(vec![1, 2, 3])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}
