use axum::{extract::State, routing::get, Router};

use crate::state::AppState;

use super::time_label;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(respond))
}

async fn respond(State(state): State<AppState>) -> String {
    state.latency.sleep(1.1).await;
    format!("Response: {}", time_label())
}
