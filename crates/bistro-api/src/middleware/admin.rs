// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Admin authorization middleware.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use bistro_store::{Collection, DocumentStore, Filter};
use tower::{Layer, Service};

use crate::auth::{AuthContext, Role};
use crate::error::{ApiError, ApiResult};

// =============================================================================
// AdminLayer
// =============================================================================

/// Layer admitting only callers whose stored user record has the admin role.
///
/// Must be composed inside [`AuthLayer`](super::AuthLayer). The role is read
/// from the store on every request, so elevation and demotion apply
/// immediately even though tokens are never reissued.
#[derive(Clone)]
pub struct AdminLayer {
    store: Arc<dyn DocumentStore>,
}

impl AdminLayer {
    /// Creates a new admin layer backed by the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

impl<S> Layer<S> for AdminLayer {
    type Service = AdminMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AdminMiddleware {
            inner,
            store: self.store.clone(),
        }
    }
}

// =============================================================================
// AdminMiddleware
// =============================================================================

/// Middleware for admin enforcement.
#[derive(Clone)]
pub struct AdminMiddleware<S> {
    inner: S,
    store: Arc<dyn DocumentStore>,
}

impl<S> Service<Request<Body>> for AdminMiddleware<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let store = self.store.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(ctx) = req.extensions().get::<AuthContext>().cloned() else {
                tracing::warn!("No auth context found, denying access");
                return Ok(ApiError::unauthorized("Authentication required").into_response());
            };

            match is_admin(store.as_ref(), &ctx).await {
                Ok(true) => inner.call(req).await,
                Ok(false) => {
                    tracing::warn!(
                        email = ctx.email().unwrap_or("<none>"),
                        request_id = %ctx.request_id,
                        path = %req.uri().path(),
                        "Admin access denied"
                    );
                    Ok(ApiError::forbidden("Admin role required").into_response())
                }
                Err(e) => Ok(e.into_response()),
            }
        })
    }
}

/// Looks up the caller's user record and checks its role.
///
/// A token without an email claim, or an email with no stored record, is
/// never admin.
async fn is_admin(store: &dyn DocumentStore, ctx: &AuthContext) -> ApiResult<bool> {
    let Some(email) = ctx.email() else {
        return Ok(false);
    };

    let record = store
        .find_one(Collection::User, Filter::eq("email", email))
        .await?;

    Ok(record.is_some_and(|user| Role::of(&user).is_admin()))
}

// =============================================================================
// Tests
// =============================================================================
