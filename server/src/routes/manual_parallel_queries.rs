use axum::{extract::State, routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user-name", get(user_name))
        .route("/team-name", get(team_name))
        .route("/project-name", get(project_name))
}

async fn user_name(State(state): State<AppState>) -> &'static str {
    state.latency.sleep(1.1).await;
    "John Doe"
}

async fn team_name(State(state): State<AppState>) -> &'static str {
    state.latency.sleep(1.1).await;
    "Primary team"
}

async fn project_name(State(state): State<AppState>) -> &'static str {
    state.latency.sleep(1.1).await;
    "Quarter Project"
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::*;

    #[tokio::test]
    async fn each_query_has_its_own_endpoint() {
        let state = state();
        for (path, expected) in [
            ("/manual-parallel-queries/user-name", "John Doe"),
            ("/manual-parallel-queries/team-name", "Primary team"),
            ("/manual-parallel-queries/project-name", "Quarter Project"),
        ] {
            let (_, body) = send(&state, get(path)).await;
            assert_eq!(expected, body);
        }
    }
}
