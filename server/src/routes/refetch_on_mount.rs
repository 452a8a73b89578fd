use axum::{routing::get, Router};

use crate::state::AppState;

use super::time_label;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(respond))
}

async fn respond() -> String {
    format!("API Response {}", time_label())
}
