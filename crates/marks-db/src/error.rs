//! Database error types for marks-db.

use marks_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A domain rule rejected the mutation. Nothing was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    /// The domain error, if this failure was a rule violation rather than a
    /// persistence fault.
    #[must_use]
    pub const fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(err) => Some(err),
            _ => None,
        }
    }
}

/// SQLite's primary result code for constraint failures.
const SQLITE_CONSTRAINT: std::ffi::c_int = 19;

/// Whether `err` is a UNIQUE/NOT NULL/CHECK/FK constraint failure.
///
/// libSQL may report either the primary or the extended code; the low byte
/// of an extended code is its primary code.
pub(crate) const fn is_constraint_violation(err: &libsql::Error) -> bool {
    matches!(err, libsql::Error::SqliteFailure(code, _) if *code & 0xff == SQLITE_CONSTRAINT)
}
