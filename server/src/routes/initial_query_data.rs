use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::state::AppState;

use super::time_label;

#[derive(Debug, Serialize)]
pub struct Item {
    id: i64,
    label: String,
    description: String,
}

impl Item {
    fn new(id: i64) -> Self {
        Self {
            id,
            label: format!("Item {id}"),
            description: format!("Description of item {id}"),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/staleTime", get(stale_time))
        .route("/initialDataUpdatedAt", get(initial_data_updated_at))
        .route("/initial-data-from-cache/:id", get(from_cache))
}

async fn stale_time(State(state): State<AppState>) -> String {
    state.latency.sleep(1.1).await;
    format!("API Data {}", time_label())
}

async fn initial_data_updated_at() -> String {
    format!("API Data {}", time_label())
}

/// Id `0` is the list the detail pages seed their initial data from.
async fn from_cache(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    if id == 0 {
        return Json((1..=3).map(Item::new).collect::<Vec<_>>()).into_response();
    }

    state.latency.sleep(2.0).await;
    Json(Item::new(id)).into_response()
}
