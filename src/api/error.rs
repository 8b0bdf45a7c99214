use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedHashAlgorithm(String),

    #[error("invalid oid: {0}")]
    InvalidOid(String),

    #[error("digest mismatch: declared {declared}, computed {computed}")]
    DigestMismatch { declared: String, computed: String },

    #[error("payload exceeds maximum object size of {0} bytes")]
    PayloadTooLarge(u64),

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::UnsupportedHashAlgorithm(algo) => (
                StatusCode::BAD_REQUEST,
                format!("unsupported hash algorithm: {}", algo),
            ),
            AppError::InvalidOid(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DigestMismatch { declared, computed } => (
                StatusCode::BAD_REQUEST,
                format!("digest mismatch: declared {}, computed {}", declared, computed),
            ),
            AppError::PayloadTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("payload exceeds maximum object size of {} bytes", limit),
            ),
            AppError::NotFound(oid) => {
                (StatusCode::NOT_FOUND, format!("object not found: {}", oid))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
