use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:id/user-name", get(user_name))
}

async fn user_name(State(state): State<AppState>, Path(id): Path<String>) -> String {
    state.latency.sleep(1.1).await;
    format!("User {id}")
}
