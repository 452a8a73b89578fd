use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct NewTodo {
    title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddParams {
    return_error: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clear", post(clear))
        .route("/", get(list).post(add))
}

async fn clear(State(state): State<AppState>) -> ApiResult<&'static str> {
    state.todos.reset()?;
    tracing::debug!("Reset todos");
    Ok("ok")
}

/// `?returnError=true` makes the mutation fail so the client rolls back.
async fn add(
    State(state): State<AppState>,
    Query(params): Query<AddParams>,
    Json(todo): Json<NewTodo>,
) -> ApiResult<&'static str> {
    state.latency.sleep(2.0).await;

    if params.return_error.as_deref() == Some("true") {
        return Err(ApiError::BadRequest);
    }

    let count = state.todos.push(todo.title)?;
    tracing::debug!(count, "Added todo");
    Ok("ok")
}

/// Slow only once the list holds more than the default todo.
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let todos = state.todos.list()?;
    if todos.len() > 1 {
        state.latency.sleep(2.0).await;
    }
    Ok(Json(todos))
}
