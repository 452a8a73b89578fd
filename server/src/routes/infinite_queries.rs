use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

use super::page_items;

const ITEMS_PER_PAGE: i64 = 15;

/// Sections of the infinite-queries page, each backed by the same pages.
const VARIANTS: [&str; 4] = [
    "cancel-refetch",
    "sequential-refetch",
    "max-pages",
    "fetch-previous-page",
];

#[derive(Debug, Serialize)]
pub struct Page {
    page: i64,
    result: Vec<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:page", get(page))
        .route("/:variant/:page", get(variant_page))
}

async fn page(State(state): State<AppState>, Path(page): Path<i64>) -> ApiResult<Json<Page>> {
    let result = page_items(page, ITEMS_PER_PAGE).ok_or(ApiError::BadRequest)?;
    state.latency.sleep(1.0).await;
    Ok(Json(Page { page, result }))
}

async fn variant_page(
    State(state): State<AppState>,
    Path((variant, number)): Path<(String, i64)>,
) -> ApiResult<Json<Page>> {
    if !VARIANTS.contains(&variant.as_str()) {
        return Err(ApiError::NotFound);
    }
    page(State(state), Path(number)).await
}
