//! Error types for API contract validation and parsing

use thiserror::Error;

/// Errors that can occur during API contract validation and parsing
#[derive(Debug, Error)]
pub enum ApiContractError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid file browser filter: {0}")]
    InvalidFileBrowserFilter(String),

    #[error("Invalid model type: {0}")]
    InvalidModelType(String),
}
