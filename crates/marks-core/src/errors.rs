//! Cross-cutting error types for the marks portal.
//!
//! Domain-specific errors (`DatabaseError`, `AuthError`) are defined in their
//! respective crates and wrap `CoreError` where a domain rule is broken.
//! The `Display` text of every variant is safe to show to an end user.

use thiserror::Error;

/// Errors that can be raised by any portal crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} not found")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (missing fields, bad numbers, out of range).
    #[error("{0}")]
    Validation(String),

    /// The mutation would duplicate an existing record.
    #[error("{0}")]
    Conflict(String),
}

impl CoreError {
    /// Shorthand for a `NotFound` on a student id.
    #[must_use]
    pub fn student_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "Student".to_string(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a `Validation` error with a static message.
    #[must_use]
    pub fn validation(message: &str) -> Self {
        Self::Validation(message.to_string())
    }

    /// Shorthand for a `Conflict` error with a static message.
    #[must_use]
    pub fn conflict(message: &str) -> Self {
        Self::Conflict(message.to_string())
    }
}
