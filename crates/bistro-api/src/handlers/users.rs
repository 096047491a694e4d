// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! User handlers.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use bistro_store::{Collection, DeleteResult, Document, Filter, UpdateResult};
use serde_json::Value;

use crate::auth::{Role, ROLE_FIELD};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{Auth, ValidatedJson};
use crate::response::{AdminStatusResponse, ExistingUserResponse};
use crate::state::AppState;

// =============================================================================
// Registration
// =============================================================================

/// POST /user
///
/// Registers a user unless one with the same email already exists. The
/// check and the insert are separate store calls, so uniqueness is
/// best-effort. A caller-supplied role is discarded; new users are always
/// regular users until elevated by an admin.
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(mut user): ValidatedJson<Document>,
) -> ApiResult<Response> {
    let email = match user.get("email") {
        Some(Value::String(email)) if !email.is_empty() => email.clone(),
        _ => return Err(ApiError::bad_request("email is required")),
    };

    let existing = state
        .store()
        .find_one(Collection::User, Filter::eq("email", email.as_str()))
        .await?;
    if existing.is_some() {
        tracing::debug!(email = %email, "Registration for existing user");
        return Ok(Json(ExistingUserResponse::new()).into_response());
    }

    user.remove(ROLE_FIELD);
    let result = state.store().insert_one(Collection::User, user).await?;
    tracing::info!(email = %email, id = %result.inserted_id, "User registered");

    Ok(Json(result).into_response())
}

// =============================================================================
// Administration
// =============================================================================

/// GET /user (admin)
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    let users = state.store().find(Collection::User, Filter::all()).await?;
    Ok(Json(users))
}

/// GET /user/admin/{email}
///
/// Reports whether `email` is an admin. Callers may only ask about
/// themselves.
pub async fn admin_status(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(email): Path<String>,
) -> ApiResult<Json<AdminStatusResponse>> {
    if ctx.email() != Some(email.as_str()) {
        tracing::warn!(
            caller = ctx.email().unwrap_or("<none>"),
            requested = %email,
            "Admin status requested for another user"
        );
        return Err(ApiError::forbidden("Email does not match token"));
    }

    let admin = state
        .store()
        .find_one(Collection::User, Filter::eq("email", email.as_str()))
        .await?
        .is_some_and(|user| Role::of(&user).is_admin());

    Ok(Json(AdminStatusResponse { admin }))
}

/// PATCH /user/admin/{id} (admin)
///
/// Elevates the user to the admin role. Takes effect on that user's next
/// request; tokens are not reissued.
pub async fn make_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResult>> {
    let mut fields = Document::new();
    fields.insert(ROLE_FIELD.to_string(), Value::String(Role::Admin.to_string()));

    let result = state
        .store()
        .update_one(Collection::User, Filter::by_id(&id), fields)
        .await?;
    tracing::info!(id = %id, matched = result.matched_count, "User elevated to admin");

    Ok(Json(result))
}

/// DELETE /user/{id} (admin)
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let result = state
        .store()
        .delete_one(Collection::User, Filter::by_id(&id))
        .await?;
    tracing::info!(id = %id, deleted = result.deleted_count, "User deleted");
    Ok(Json(result))
}
