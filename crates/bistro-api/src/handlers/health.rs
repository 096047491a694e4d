// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Health check handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::response::{ComponentStatus, HealthResponse, ReadinessResponse};
use crate::state::AppState;

/// Body of `GET /`.
pub const GREETING: &str = "Hello world";

/// GET /
pub async fn root() -> &'static str {
    GREETING
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Simple liveness check. Returns 200 OK if the service is running.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

// =============================================================================
// Readiness Check
// =============================================================================

/// GET /ready
///
/// Pings the document store. Returns 503 if it cannot be reached.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store();
    let (healthy, message) = match store.ping().await {
        Ok(()) => (true, None),
        Err(e) => {
            tracing::warn!(error = %e, backend = store.backend_name(), "Store ping failed");
            (false, Some("Store unreachable".to_string()))
        }
    };

    let response = ReadinessResponse {
        ready: healthy,
        components: vec![ComponentStatus {
            name: format!("store:{}", store.backend_name()),
            healthy,
            message,
        }],
    };

    if healthy {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use crate::config::ApiConfig;
    use bistro_store::MemoryStore;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState::builder()
            .config(ApiConfig::default().with_jwt(JwtConfig::new("test-secret-key-that-is-long-enough")))
            .store(Arc::new(MemoryStore::new()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_greeting() {
        assert_eq!(root().await, "Hello world");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_endpoint() {
        let response = ready(State(test_state())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
