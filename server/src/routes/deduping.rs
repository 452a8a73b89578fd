use axum::{extract::State, routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(deduped))
}

async fn deduped(State(state): State<AppState>) -> &'static str {
    state.latency.sleep(1.1).await;
    "This is the deduping response!"
}
