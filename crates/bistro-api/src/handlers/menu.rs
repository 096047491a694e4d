// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Menu handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use bistro_store::{
    Collection, DeleteResult, Document, Filter, InsertOneResult, UpdateResult,
};

use crate::error::{ApiError, ApiResult};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /menu
///
/// Returns every menu item, or 404 when the menu is empty.
pub async fn list_menu(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    let items = state.store().find(Collection::Menu, Filter::all()).await?;
    if items.is_empty() {
        return Err(ApiError::not_found("No menu items found"));
    }
    Ok(Json(items))
}

/// GET /menu/{id}
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Document>> {
    state
        .store()
        .find_one(Collection::Menu, Filter::by_id(id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Menu item not found"))
}

/// POST /menu (admin)
pub async fn create_menu_item(
    State(state): State<AppState>,
    ValidatedJson(item): ValidatedJson<Document>,
) -> ApiResult<Json<InsertOneResult>> {
    let result = state.store().insert_one(Collection::Menu, item).await?;
    tracing::info!(id = %result.inserted_id, "Menu item created");
    Ok(Json(result))
}

/// PATCH /menu/{id} (admin)
///
/// Sets the supplied fields on the item; other fields are left untouched.
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(fields): ValidatedJson<Document>,
) -> ApiResult<Json<UpdateResult>> {
    if fields.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let result = state
        .store()
        .update_one(Collection::Menu, Filter::by_id(&id), fields)
        .await?;
    tracing::info!(id = %id, matched = result.matched_count, "Menu item updated");
    Ok(Json(result))
}

/// DELETE /menu/{id} (admin)
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let result = state
        .store()
        .delete_one(Collection::Menu, Filter::by_id(&id))
        .await?;
    tracing::info!(id = %id, deleted = result.deleted_count, "Menu item deleted");
    Ok(Json(result))
}
