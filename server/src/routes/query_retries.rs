use axum::{extract::Path, routing::get, Router};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Attempts below this fail.
const SUCCEEDS_FROM_ATTEMPT: i64 = 3;

pub fn router() -> Router<AppState> {
    Router::new().route("/:attempt", get(attempt))
}

/// Any numeric attempt below the threshold fails, negative ones included.
///
/// Non-numeric attempts are not counted as failures.
async fn attempt(Path(attempt): Path<String>) -> ApiResult<&'static str> {
    match attempt.parse::<i64>() {
        Ok(attempt) if attempt < SUCCEEDS_FROM_ATTEMPT => {
            tracing::debug!(attempt, "Failing query attempt");
            Err(ApiError::Flaky)
        }
        _ => Ok("Query retries success response!"),
    }
}
