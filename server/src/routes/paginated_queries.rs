use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

use super::page_items;

const ITEMS_PER_PAGE: i64 = 5;

pub fn router() -> Router<AppState> {
    Router::new().route("/:page", get(page))
}

async fn page(
    State(state): State<AppState>,
    Path(page): Path<i64>,
) -> ApiResult<Json<Vec<String>>> {
    let items = page_items(page, ITEMS_PER_PAGE).ok_or(ApiError::BadRequest)?;
    // First page loads faster.
    state
        .latency
        .sleep(if page == 1 { 0.5 } else { 1.0 })
        .await;
    Ok(Json(items))
}
