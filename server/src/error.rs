//! Error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failures starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("failed to bind {addr}")]
    Bind {
        /// Address we tried to bind.
        addr: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The server stopped with an I/O error.
    #[error("server error")]
    Serve(#[from] std::io::Error),
}

/// Failures a handler reports to the client.
///
/// The bodies are the plain strings the gallery pages display.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// No resource with that id.
    #[error("Not found")]
    NotFound,
    /// The client asked for a failure.
    #[error("error")]
    BadRequest,
    /// Deliberate failure to exercise client retries.
    #[error("Error")]
    Flaky,
    /// A store mutex was poisoned by a panicking handler.
    #[error("store unavailable")]
    StoreUnavailable,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Flaky | ApiError::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self == ApiError::StoreUnavailable {
            tracing::error!("Store lock poisoned");
        }
        (self.status(), self.to_string()).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
