//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use resolver::ResolverError;
use shared::SharedError;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("HTTP server startup failed on {address}: {message}")]
    ServerStartupFailed { address: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pitch not found: {id}")]
    PitchNotFound { id: String },

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("Screenshot scoring failed: {0}")]
    Scoring(#[from] ResolverError),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Background scoring task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        WebServerError::Config(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::PitchNotFound { .. } => StatusCode::NOT_FOUND,
            WebServerError::InvalidRequest { .. } | WebServerError::JsonError(_) => StatusCode::BAD_REQUEST,
            WebServerError::Scoring(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            WebServerError::Scoring(ResolverError::RemoteRejected { message }) => json!({ "error": message }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
