use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::ApiResult,
    state::{AppState, PostContent},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clear", post(clear))
        .route("/:id", get(fetch).post(upsert))
}

async fn clear(State(state): State<AppState>) -> ApiResult<&'static str> {
    state.posts.clear()?;
    tracing::debug!("Cleared posts");
    Ok("ok")
}

async fn upsert(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(content): Json<PostContent>,
) -> ApiResult<&'static str> {
    state.latency.sleep(1.5).await;
    let replaced = state.posts.upsert(id, content)?;
    tracing::debug!(id, replaced, "Stored post");
    Ok("ok")
}

/// Unknown posts answer immediately with the default content.
async fn fetch(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Response> {
    let Some(post) = state.posts.get(id)? else {
        return Ok(Json(PostContent::default()).into_response());
    };

    state.latency.sleep(1.5).await;
    Ok(Json(post).into_response())
}
