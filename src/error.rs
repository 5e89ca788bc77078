use axum::{http::StatusCode, response::Html, response::IntoResponse};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::render;

#[derive(Debug, ThisError)]
pub enum VaxError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] Box<figment::Error>),

    #[error("Invalid timestamp in store: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    #[error("Invalid dose status in store: {0}")]
    InvalidStatus(String),
}

impl From<figment::Error> for VaxError {
    fn from(e: figment::Error) -> Self {
        VaxError::ConfigError(Box::new(e))
    }
}

impl IntoResponse for VaxError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            VaxError::DatabaseError(_)
            | VaxError::InvalidTimestamp(_)
            | VaxError::InvalidStatus(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.",
            ),
            VaxError::ConfigError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The server is misconfigured.",
            ),
        };
        error!(error = %self, "request failed");
        (status, Html(render::error_page(status, message))).into_response()
    }
}
