// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! [`TestApp`] wires the real router to a fresh [`MemoryStore`] and sends
//! requests through it in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{Map, Value};
use tower::ServiceExt;

use bistro_api::{ApiConfig, ApiServer, AppState, JwtConfig, JwtManager};
use bistro_store::{Collection, DocumentStore, MemoryStore};

use crate::common::fixtures::{UserFixtures, TEST_SECRET};

/// An in-process application backed by an in-memory store.
pub struct TestApp {
    /// The store behind the router.
    pub store: Arc<MemoryStore>,
    /// Token manager sharing the router's secret.
    pub jwt: Arc<JwtManager>,
    router: Router,
}

impl TestApp {
    /// Creates an application with an empty store.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let jwt = Arc::new(
            JwtManager::new(JwtConfig::new(TEST_SECRET)).expect("test secret is valid"),
        );
        let state = AppState::builder()
            .config(ApiConfig::new().with_jwt(JwtConfig::new(TEST_SECRET)))
            .jwt_manager(jwt.clone())
            .store(store.clone() as Arc<dyn DocumentStore>)
            .build()
            .expect("state has every component");
        let router = ApiServer::new(state).router();

        Self { store, jwt, router }
    }

    /// Issues a token whose payload is `{ "email": email }`.
    pub fn token_for(&self, email: &str) -> String {
        let mut payload = Map::new();
        payload.insert("email".to_string(), Value::String(email.to_string()));
        self.jwt.issue_token(payload).expect("token is issued")
    }

    /// Stores a user with the given role and returns a token for them.
    pub async fn seed_user(&self, email: &str, role: &str) -> String {
        self.store
            .insert_one(Collection::User, UserFixtures::with_role(email, role))
            .await
            .expect("user is stored");
        self.token_for(email)
    }

    /// Stores an admin and returns a token for them.
    pub async fn seed_admin(&self, email: &str) -> String {
        self.seed_user(email, "admin").await
    }

    /// Sends a request and returns the status and JSON body (`Null` if empty).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request is well formed");

        self.send(request).await
    }

    /// Sends a prepared request.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    /// GET helper.
    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    /// POST helper.
    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// PATCH helper.
    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    /// DELETE helper.
    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
