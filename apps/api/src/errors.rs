use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    "The service is not configured correctly".to_string(),
                )
            }
            AppError::Llm(e) => llm_error_parts(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Logs the upstream failure with its diagnostics and picks the user-facing message.
fn llm_error_parts(e: &LlmError) -> (StatusCode, &'static str, String) {
    match e {
        LlmError::Exhausted { attempted } => {
            tracing::error!("All models rate limited: {}", attempted.join(", "));
            (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "Daily request limit reached on every model. Wait a few hours or use another API key."
                    .to_string(),
            )
        }
        LlmError::Api { status, message } => {
            tracing::error!("Model API returned {status}: {message}");
            (
                StatusCode::BAD_GATEWAY,
                "LLM_ERROR",
                format!("The model API returned status {status}"),
            )
        }
        LlmError::Http(err) => {
            tracing::error!("Model API transport failure: {err}");
            (
                StatusCode::BAD_GATEWAY,
                "LLM_UNAVAILABLE",
                "Could not reach the model API. Please try again.".to_string(),
            )
        }
        LlmError::MalformedOutput { source, prefix } => {
            tracing::error!("Malformed model output ({source}); received: {prefix}");
            malformed_output()
        }
        LlmError::Parse(err) => {
            tracing::error!("Undecodable model response envelope: {err}");
            malformed_output()
        }
        LlmError::EmptyContent => {
            tracing::error!("Model returned no text content");
            malformed_output()
        }
    }
}

fn malformed_output() -> (StatusCode, &'static str, String) {
    (
        StatusCode::BAD_GATEWAY,
        "MALFORMED_OUTPUT",
        "Could not process the model response. Please try again.".to_string(),
    )
}
