use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use executor::ExecutorError;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `UNSUPPORTED_LANGUAGE`, `TOKEN_MISSING`, `TOKEN_INVALID`, `NOT_FOUND`,
    /// `EXECUTION_FAILED`, `EXECUTION_TIMEOUT`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Code is required")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    UnsupportedLanguage(String),
    TokenMissing,
    TokenInvalid,
    NotFound(String),
    /// The execution service failed mid-flight. Contains the detail, which
    /// is logged but not sent to the client.
    ExecutionFailed(String),
    /// The polling budget ran out before every result was terminal.
    ExecutionTimeout,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::UnsupportedLanguage(lang) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "UNSUPPORTED_LANGUAGE",
                    message: format!(
                        "Language '{}' is not supported. Supported: {}",
                        lang,
                        executor::language::supported_names()
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                },
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_MISSING",
                    message: "Authentication required".into(),
                },
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid or expired token".into(),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::ExecutionFailed(detail) => {
                tracing::error!("Execution service failure: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        code: "EXECUTION_FAILED",
                        message: "Code execution failed".into(),
                    },
                )
            }
            AppError::ExecutionTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorBody {
                    code: "EXECUTION_TIMEOUT",
                    message: "Code execution timed out".into(),
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ExecutorError> for AppError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::UnsupportedLanguage(lang) => AppError::UnsupportedLanguage(lang),
            ExecutorError::Timeout { waited_ms } => {
                tracing::warn!(waited_ms, "Execution polling budget exhausted");
                AppError::ExecutionTimeout
            }
            other => AppError::ExecutionFailed(other.to_string()),
        }
    }
}
