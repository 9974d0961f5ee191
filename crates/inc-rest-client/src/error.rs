//! Error types for the REST API client

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when using the REST API client
#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No async runtime to run the request on: {0}")]
    Runtime(String),

    #[error("Server returned error status {status}: {body}")]
    ServerError { status: StatusCode, body: Value },

    #[error("Unexpected response ({status}): {body}")]
    UnexpectedResponse { status: StatusCode, body: String },
}

impl RestClientError {
    /// HTTP status of the failed response, when the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RestClientError::ServerError { status, .. }
            | RestClientError::UnexpectedResponse { status, .. } => Some(*status),
            RestClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Result type alias for REST client operations
pub type RestClientResult<T> = Result<T, RestClientError>;
