// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for API handlers.

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::auth::AuthContext;
use crate::error::ApiError;

// =============================================================================
// Auth Extractor
// =============================================================================

/// Extractor for authenticated requests.
///
/// Extracts the `AuthContext` placed by the authentication middleware.
/// Returns 401 when the route is not behind that middleware.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Auth(ctx): Auth) -> impl IntoResponse {
///     format!("Hello, {}", ctx.email().unwrap_or("guest"))
/// }
/// ```
pub struct Auth(pub AuthContext);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

// =============================================================================
// Validated JSON Extractor
// =============================================================================

/// Extractor for JSON payloads.
///
/// Like [`Json`], but malformed bodies become a 400 [`ApiError`] with the
/// standard error body.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;

        Ok(ValidatedJson(value))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;
    use axum::body::Body;
    use axum::http::header;
    use bistro_store::Document;
    use serde_json::Map;

    #[tokio::test]
    async fn test_auth_requires_context() {
        let req = axum::http::Request::builder().body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        assert!(Auth::from_request_parts(&mut parts, &()).await.is_err());

        parts
            .extensions
            .insert(AuthContext::from_claims(Claims::new(Map::new(), 60)));
        assert!(Auth::from_request_parts(&mut parts, &()).await.is_ok());
    }

    #[tokio::test]
    async fn test_validated_json_rejects_non_objects() {
        let req = axum::http::Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("[1, 2, 3]"))
            .unwrap();

        let result = ValidatedJson::<Document>::from_request(req, &()).await;
        assert!(matches!(result, Err(ApiError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_validated_json_accepts_object() {
        let req = axum::http::Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Soup"}"#))
            .unwrap();

        let ValidatedJson(doc) = ValidatedJson::<Document>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(doc["name"], "Soup");
    }
}
