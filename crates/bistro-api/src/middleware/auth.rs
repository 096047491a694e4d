// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! JWT authentication middleware.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::auth::{AuthContext, JwtManager};
use crate::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

// =============================================================================
// AuthLayer
// =============================================================================

/// Layer for JWT authentication.
///
/// Requests without a valid `Authorization: Bearer <token>` header are
/// rejected with 401 before reaching the inner service. On success the
/// decoded claims are stored in the request extensions as an [`AuthContext`].
#[derive(Clone)]
pub struct AuthLayer {
    jwt_manager: Arc<JwtManager>,
}

impl AuthLayer {
    /// Creates a new auth layer.
    pub fn new(jwt_manager: Arc<JwtManager>) -> Self {
        Self { jwt_manager }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            jwt_manager: self.jwt_manager.clone(),
        }
    }
}

// =============================================================================
// AuthMiddleware
// =============================================================================

/// Middleware for JWT authentication.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    jwt_manager: Arc<JwtManager>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let jwt_manager = self.jwt_manager.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Ok(token) => token,
                Err(e) => {
                    tracing::debug!(error = %e, path = %req.uri().path(), "Rejected request");
                    return Ok(e.into_response());
                }
            };

            let claims = match jwt_manager.validate_token(&token) {
                Ok(token_data) => token_data.claims,
                Err(e) => {
                    tracing::debug!(error = %e, "Token validation failed");
                    return Ok(e.into_response());
                }
            };

            let mut auth_ctx = AuthContext::from_claims(claims).with_request_id(Uuid::now_v7());
            if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
                auth_ctx = auth_ctx.with_client_ip(addr.ip());
            }

            req.extensions_mut().insert(auth_ctx);

            inner.call(req).await
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Extracts the bearer token from the Authorization header.
///
/// The header must be exactly `Bearer <token>`; any other scheme, casing or
/// spacing is rejected.
fn extract_bearer_token<B>(req: &Request<B>) -> Result<String, ApiError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("No authorization header"))?
        .to_str()
        .map_err(|_| ApiError::unauthorized("Authorization header is not valid ASCII"))?;

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() && !token.contains(char::is_whitespace) => {
            Ok(token.to_string())
        }
        _ => Err(ApiError::unauthorized("Malformed authorization header")),
    }
}

// =============================================================================
// Tests
// =============================================================================
