// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Review handlers.

use axum::{extract::State, Json};
use bistro_store::{Collection, Document, Filter};

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /review
pub async fn list_reviews(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    let reviews = state.store().find(Collection::Review, Filter::all()).await?;
    Ok(Json(reviews))
}
