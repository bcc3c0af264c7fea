use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by chunker configuration and execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error("max_tokens ({requested}) exceeds model maximum ({limit}) for {model}")]
    TokenLimitExceeded {
        requested: usize,
        limit: usize,
        model: String,
    },

    #[error("invalid chunker configuration: {0}")]
    InvalidConfig(String),

    // Only one strategy exists today; kept as a distinct kind so future
    // strategies surface a stable error shape.
    #[error("unknown chunking strategy: {0}")]
    UnknownStrategy(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Tokenizer error: {0}")]
    TokenizerError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ChunkError> for ApiError {
    fn from(err: ChunkError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::TokenizerError(msg) => {
                tracing::error!("Tokenizer error: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "TokenizerError", msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
