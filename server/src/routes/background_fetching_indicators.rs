use axum::{extract::State, routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(now))
}

async fn now(State(state): State<AppState>) -> String {
    state.latency.sleep(1.5).await;
    format!("Now is {}", chrono::Local::now().format("%a %b %d %Y %H:%M:%S"))
}
