// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Cart handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use bistro_store::{Collection, DeleteResult, Document, Filter, InsertOneResult};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Query parameters for `GET /cart`.
#[derive(Debug, Default, Deserialize)]
pub struct CartQuery {
    /// Only return entries belonging to this email.
    pub email: Option<String>,
}

/// GET /cart?email=
pub async fn list_carts(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> ApiResult<Json<Vec<Document>>> {
    let filter = match query.email {
        Some(email) => Filter::eq("email", email),
        None => Filter::all(),
    };
    let entries = state.store().find(Collection::Cart, filter).await?;
    Ok(Json(entries))
}

/// POST /cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    ValidatedJson(entry): ValidatedJson<Document>,
) -> ApiResult<Json<InsertOneResult>> {
    let result = state.store().insert_one(Collection::Cart, entry).await?;
    tracing::debug!(id = %result.inserted_id, "Cart entry added");
    Ok(Json(result))
}

/// DELETE /cart/{id}
pub async fn delete_cart_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let result = state
        .store()
        .delete_one(Collection::Cart, Filter::by_id(id))
        .await?;
    Ok(Json(result))
}
