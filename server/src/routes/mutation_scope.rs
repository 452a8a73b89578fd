use axum::{extract::State, routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(mutate))
}

async fn mutate(State(state): State<AppState>) -> &'static str {
    state.latency.sleep(1.1).await;
    "Ok"
}
