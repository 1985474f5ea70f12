use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use helpdesk_backend::BackendError;
use helpdesk_core::error::CoreError;
use helpdesk_mail::EmailError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`BackendError`] for failures of
/// the external REST backend and [`EmailError`] for the relay, and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `helpdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The external backend failed or refused the call.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Composing or delivering an email failed.
    #[error(transparent)]
    Email(#[from] EmailError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A dependency the request needs is not configured.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Backend errors ---
            AppError::Backend(err) => classify_backend_error(err),

            // --- Email errors ---
            AppError::Email(err) if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string())
            }
            AppError::Email(err) => {
                tracing::error!(error = %err, "Email delivery failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "EMAIL_ERROR",
                    "Failed to send email".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a backend error into an HTTP status, error code, and message.
///
/// - A backend 404 stays a 404.
/// - A backend 400 is passed through with its body, which is the backend's
///   own validation message.
/// - Everything else maps to 502 with a sanitized message.
fn classify_backend_error(err: &BackendError) -> (StatusCode, &'static str, String) {
    match err {
        BackendError::Api { status: 404, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        BackendError::Api { status: 400, body } => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST", body.clone())
        }
        other => {
            tracing::error!(error = %other, "Backend error");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_ERROR",
                "The helpdesk backend could not complete the request".to_string(),
            )
        }
    }
}
