//! Error types for the enrichment service
//!
//! Provides unified error handling using thiserror. Client operations never
//! surface these to their callers; they are converted to fallbacks at the
//! public boundary and only reach HTTP responses through the API layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Provider Error Enum ==
/// Failure reported by a remote generative-text backend.
///
/// Both kinds count toward the retry budget.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Network failure, quota exhaustion, or an unexpected payload
    #[error("transient provider failure: {0}")]
    Transient(String),

    /// Credential rejected by the backend
    #[error("provider rejected credential: {0}")]
    Auth(String),
}

// == Atlas Error Enum ==
/// Unified error type for the enrichment service.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// No provider configured (missing credential)
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Remote call failed on every attempt
    #[error("Generation failed after {attempts} attempts: {source}")]
    GenerationFailed {
        attempts: u32,
        #[source]
        source: ProviderError,
    },

    /// Remote call succeeded but the text did not hold the expected JSON shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Live feed call failed or returned an error payload
    #[error("Feed unavailable: {0}")]
    FeedUnavailable(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AtlasError {
    fn into_response(self) -> Response {
        let status = match &self {
            AtlasError::NotFound(_) => StatusCode::NOT_FOUND,
            AtlasError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AtlasError::ProviderUnavailable(_) | AtlasError::FeedUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AtlasError::GenerationFailed { .. } | AtlasError::MalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the enrichment service.
pub type Result<T> = std::result::Result<T, AtlasError>;
