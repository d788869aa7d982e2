use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. These go into logs and tests —
// never match on the human-readable message string.

/// Stable error code constants.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const MALFORMED_ID: &str = "MALFORMED_ID";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Whether 5xx responses include the underlying error detail.
///
/// Off by default; the server binary arms it in dev mode.
static EXPOSE_INTERNAL_DETAIL: OnceLock<bool> = OnceLock::new();

/// Arm or suppress internal error detail in HTTP responses.
///
/// Call once at startup, before serving. Later calls are ignored.
pub fn set_expose_internal_detail(expose: bool) {
    let _ = EXPOSE_INTERNAL_DETAIL.set(expose);
}

fn expose_internal_detail() -> bool {
    *EXPOSE_INTERNAL_DETAIL.get().unwrap_or(&false)
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type used across the workspace.
///
/// Each variant maps to a stable error code (see [`error_code`]), an HTTP
/// status code, and a fixed human-readable message. The variant payload is
/// the detail string, returned in the envelope's `error` field:
///
/// ```json
/// {"success": false, "message": "Task not found", "error": "task 'abc' does not exist"}
/// ```
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No record for the identifier. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Input data violates a schema constraint. HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// Identifier is not in the expected key format. HTTP 400.
    #[error("{0}")]
    MalformedId(String),

    /// Storage backend failure. HTTP 500.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::MalformedId(_) => error_code::MALFORMED_ID,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::MalformedId(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed human-readable message for the envelope's `message` field.
    pub fn message(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "Task not found",
            ServiceError::Validation(_) => "Validation failed",
            ServiceError::MalformedId(_) => "Invalid task id",
            ServiceError::Storage(_) => "Server error",
            ServiceError::Internal(_) => "Server error",
        }
    }

    /// Whether this is a 5xx-class error whose detail is suppressed
    /// outside dev mode.
    fn is_internal(&self) -> bool {
        matches!(self, ServiceError::Storage(_) | ServiceError::Internal(_))
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if self.is_internal() {
            tracing::error!(code = self.code(), "request failed: {detail}");
        }

        let error = if self.is_internal() && !expose_internal_detail() {
            "internal error".to_string()
        } else {
            detail
        };

        let body = serde_json::json!({
            "success": false,
            "message": self.message(),
            "error": error,
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(ServiceError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::MalformedId("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::Storage("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ServiceError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_code_mapping() {
        assert_eq!(ServiceError::NotFound("x".into()).code(), "NOT_FOUND");
        assert_eq!(ServiceError::Validation("x".into()).code(), "VALIDATION_FAILED");
        assert_eq!(ServiceError::MalformedId("x".into()).code(), "MALFORMED_ID");
        assert_eq!(ServiceError::Storage("x".into()).code(), "STORAGE_ERROR");
        assert_eq!(ServiceError::Internal("x".into()).code(), "INTERNAL");
    }

    #[test]
    fn envelope_message_is_fixed_per_variant() {
        assert_eq!(ServiceError::NotFound("task 'abc'".into()).message(), "Task not found");
        assert_eq!(ServiceError::Validation("title empty".into()).message(), "Validation failed");
        assert_eq!(ServiceError::MalformedId("id 'zz'".into()).message(), "Invalid task id");
        assert_eq!(ServiceError::Storage("disk".into()).message(), "Server error");
    }

    #[test]
    fn error_display_is_just_detail() {
        assert_eq!(ServiceError::NotFound("task 123".into()).to_string(), "task 123");
        assert_eq!(ServiceError::Validation("bad input".into()).to_string(), "bad input");
    }

    #[test]
    fn json_response_status() {
        let err = ServiceError::NotFound("task 'abc' does not exist".into());
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
