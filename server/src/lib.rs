//! Toy backend for the Leptos Query example gallery.
//!
//! Every gallery page talks to one router here. Handlers sleep for a scaled
//! delay, fail on purpose, or mutate a small in-memory store so the client
//! can show off caching, retries and optimistic updates.

pub mod config;
pub mod error;
pub mod latency;
mod routes;
pub mod state;

use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

pub use routes::create_router;

/// The full application: every example router, with trailing slashes ignored.
///
/// The gallery client requests `/deduping/` while the routers are nested at
/// `/deduping`, so paths are normalized before routing.
pub fn create_app(state: state::AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state))
}
