//! Resolver error types

use shared::SharedError;
use thiserror::Error;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Resolver error types
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Network error calling {endpoint}: {message}")]
    NetworkError { endpoint: String, message: String },

    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    #[error("Scoring service rejected request: {message}")]
    RemoteRejected { message: String },

    #[error("Remote scoring disabled")]
    Offline,

    #[error("Invalid upload: {message}")]
    InvalidUpload { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
