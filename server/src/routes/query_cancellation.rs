use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::state::AppState;

use super::time_label;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    is_initial_data: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(respond))
}

/// Only an explicit `isInitialData=false` is slow, giving the client time to cancel.
async fn respond(State(state): State<AppState>, Query(params): Query<Params>) -> String {
    if params.is_initial_data.as_deref() == Some("false") {
        state.latency.sleep(2.0).await;
    }
    format!("Response: {}", time_label())
}
