//! One router per gallery example, each nested under the example's path.

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

mod background_fetching_indicators;
mod deduping;
mod dynamic_parallel_queries;
mod infinite_queries;
mod initial_query_data;
mod invalidate_queries;
mod invalidations_from_mutations;
mod manual_parallel_queries;
mod mutation_scope;
mod optimistic_updates;
mod paginated_queries;
mod placeholder_data;
mod query_cancellation;
mod query_retries;
mod refetch_on_mount;
mod tracked_properties;

/// Builds the router for every example.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/background-fetching-indicators",
            background_fetching_indicators::router(),
        )
        .nest("/deduping", deduping::router())
        .nest("/dynamic-parallel-queries", dynamic_parallel_queries::router())
        .nest("/infinite-queries", infinite_queries::router())
        .nest("/initial-query-data", initial_query_data::router())
        .nest("/invalidate-queries", invalidate_queries::router())
        .nest(
            "/invalidations-from-mutations",
            invalidations_from_mutations::router(),
        )
        .nest("/manual-parallel-queries", manual_parallel_queries::router())
        .nest("/mutation-scope", mutation_scope::router())
        .nest("/optimistic-updates", optimistic_updates::router())
        .nest("/paginated-queries", paginated_queries::router())
        .nest("/placeholder-data", placeholder_data::router())
        .nest("/query-cancellation", query_cancellation::router())
        .nest("/query-retries", query_retries::router())
        .nest("/refetch-on-mount", refetch_on_mount::router())
        .nest("/tracked-properties", tracked_properties::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wall-clock time of day, as shown next to responses.
fn time_label() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// `per_page` consecutive `Item n` labels for a 1-based `page`, or `None` if
/// the item numbers don't fit in an `i64`.
fn page_items(page: i64, per_page: i64) -> Option<Vec<String>> {
    let start = page
        .checked_sub(1)?
        .checked_mul(per_page)?
        .checked_add(1)?;
    let end = start.checked_add(per_page)?;
    Some((start..end).map(|n| format!("Item {n}")).collect())
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{create_app, latency::Latency, state::AppState};

    pub fn state() -> AppState {
        AppState::new(Latency::none())
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, String) {
        let response = create_app(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn send_json(state: &AppState, request: Request<Body>) -> serde_json::Value {
        let (status, body) = send(state, request).await;
        assert_eq!(StatusCode::OK, status, "{body}");
        serde_json::from_str(&body).unwrap()
    }
}
