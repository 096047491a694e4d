// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token issuance handler.

use axum::{extract::State, Json};
use bistro_store::Document;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::response::TokenResponse;
use crate::state::AppState;

/// POST /jwt
///
/// Signs whatever JSON object the caller sends and returns it as a one-hour
/// bearer token. The payload is not checked; the admin gate later resolves
/// the caller's role from the stored user record, not from the token.
pub async fn issue_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<Document>,
) -> ApiResult<Json<TokenResponse>> {
    let email = payload
        .get("email")
        .and_then(|v| v.as_str())
        .unwrap_or("<none>")
        .to_string();

    let token = state.jwt().issue_token(payload)?;
    tracing::info!(email = %email, "Issued access token");

    Ok(Json(TokenResponse { token }))
}
