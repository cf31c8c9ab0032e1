use marks_core::errors::CoreError;
use marks_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    /// Blank fields, taken usernames, mismatched passwords.
    #[error("{0}")]
    Validation(String),

    /// The OS random source failed.
    #[error("random source unavailable: {0}")]
    Random(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl AuthError {
    pub(crate) fn validation(message: &str) -> Self {
        Self::Validation(message.to_string())
    }

    /// Lift domain validation failures out of the database error.
    pub(crate) fn from_db(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Core(CoreError::Validation(message)) => Self::Validation(message),
            other => Self::Database(other),
        }
    }
}
