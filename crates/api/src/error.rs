//! The API's error envelope.
//!
//! Every failure leaves the server as `{ "error": <message>, "code": <CODE> }`,
//! including malformed bodies, unparseable path ids and handler panics.

use std::any::Any;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use marvedge_core::error::CoreError;
use serde::Serialize;

/// Unique constraint behind "one account per email".
const EMAIL_CONSTRAINT: &str = "uq_users_email";

const INTERNAL_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The body was not JSON or did not fit the handler's input type.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// A path segment did not parse, e.g. a non-numeric tour id.
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathRejection),

    /// Hashing, signing or cookie encoding failed. Logged, never shown.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(err) => domain_parts(err),
            AppError::Database(err) => database_parts(err),
            AppError::InvalidBody(rejection) => (
                StatusCode::BAD_REQUEST,
                "INVALID_BODY",
                rejection.body_text(),
            ),
            AppError::InvalidPath(rejection) => (
                StatusCode::BAD_REQUEST,
                "INVALID_PATH",
                rejection.body_text(),
            ),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                internal_parts()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn domain_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
    }
}

/// A signup racing another for the same email loses on `uq_users_email`;
/// it gets the same 409 as the pre-check. Anything else is a 500.
fn database_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    let violated = err
        .as_database_error()
        .filter(|db| db.code().as_deref() == Some("23505"))
        .and_then(|db| db.constraint());

    if violated == Some(EMAIL_CONSTRAINT) {
        return (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Email is already registered".to_string(),
        );
    }

    tracing::error!(error = %err, "Database error");
    internal_parts()
}

fn internal_parts() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Panic handler for `CatchPanicLayer`: log the payload, answer 500 in the
/// usual envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    AppError::Internal(format!("Handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::Value;

    use super::*;

    async fn envelope(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_hides_the_id() {
        let response = AppError::Core(CoreError::NotFound {
            entity: "Tour",
            id: 3,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = envelope(response).await;
        assert_eq!(body["error"], "Tour not found");
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[test]
    fn session_errors_map_to_401_and_403() {
        let unauthorized = AppError::Core(CoreError::Unauthorized("no".into())).into_response();
        let forbidden = AppError::Core(CoreError::Forbidden("no".into())).into_response();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let response = AppError::Internal("argon2 exploded".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = envelope(response).await;
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }

    #[test]
    fn unclassified_database_errors_are_500() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn panics_become_json_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = envelope(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }
}
