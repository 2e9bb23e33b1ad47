use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use feed_logging::feed_error;
use serde::Serialize;
use thiserror::Error;

/// Body returned for every internal fault. Details stay in the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("handler panicked: {0}")]
    Panic(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: &'static str,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        feed_error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message: INTERNAL_ERROR_MESSAGE,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}
