//! # KYC Errors
//!
//! Request validation failures and store failures. There is no finer
//! taxonomy: anything the store reports becomes a 500 carrying its message.
//! Requests the extractors refuse keep the status the extractor chose
//! (400 for malformed syntax, 415 for a wrong content type, 422 for a body
//! that parses but does not fit the submission shape).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for KYC operations
pub type KycResult<T> = Result<T, KycError>;

/// KYC service errors
#[derive(Debug, Clone, Error)]
pub enum KycError {
    /// Payload failed shape validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request refused before reaching a handler
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// The backing store failed
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl KycError {
    /// Wrap an extractor rejection, keeping its status and text.
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        KycError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            KycError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            KycError::Rejected { status, .. } => *status,
            KycError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: u16,
}

impl From<KycError> for ErrorResponse {
    fn from(err: KycError) -> Self {
        Self {
            success: false,
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for KycError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
