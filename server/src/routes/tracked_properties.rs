use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

use super::time_label;

#[derive(Debug, Serialize)]
pub struct Tracked {
    title: &'static str,
    description: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(respond))
}

async fn respond() -> Json<Tracked> {
    Json(Tracked {
        title: "This is the title",
        description: format!("Now is {}", time_label()),
    })
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::*;

    #[tokio::test]
    async fn description_changes_with_time() {
        let tracked = send_json(&state(), get("/tracked-properties")).await;
        assert_eq!("This is the title", tracked["title"]);
        assert!(tracked["description"]
            .as_str()
            .unwrap()
            .starts_with("Now is "));
    }
}
