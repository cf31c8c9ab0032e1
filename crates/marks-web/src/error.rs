//! Mapping of domain and persistence errors onto HTTP responses.
//!
//! Validation and conflict -> 400, authentication -> 401, unknown student
//! -> 404. Persistence faults become a generic 500; details are only logged.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use marks_auth::AuthError;
use marks_core::errors::CoreError;
use marks_core::responses::ErrorResponse;
use marks_db::error::DatabaseError;

const INTERNAL_ERROR: &str = "Internal server error";
const STUDENT_NOT_FOUND: &str = "Student not found";

/// An error ready to be sent to the client as `{success: false, message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn not_authenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, AuthError::NotAuthenticated.to_string())
    }

    /// 404 for a student id that is unknown or not a number.
    #[must_use]
    pub fn student_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, STUDENT_NOT_FOUND)
    }

    fn internal(err: &dyn std::error::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) | CoreError::Conflict(message) => {
                Self::bad_request(message)
            }
            CoreError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, err.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Core(core) => core.into(),
            other => Self::internal(&other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::NotAuthenticated => {
                Self::new(StatusCode::UNAUTHORIZED, err.to_string())
            }
            AuthError::Validation(message) => Self::bad_request(message),
            AuthError::Database(db) => db.into(),
            AuthError::Random(_) => Self::internal(&err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}
