//! Field validation shared by the add and edit flows.
//!
//! Input arrives as raw form strings. Checks run in a fixed order and the
//! first failure wins: numeric marks, non-empty name and subject, marks range.

use crate::errors::CoreError;
use crate::marks::Marks;

pub const MARKS_NOT_A_NUMBER: &str = "Marks must be a number";
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const DUPLICATE_STUDENT: &str = "Student with same name, subject and marks already exists";
pub const MERGE_OVERFLOW: &str = "Total marks cannot exceed 100";
pub const NAME_SUBJECT_TAKEN: &str = "Student with this name and subject already exists";
pub const USERNAME_TAKEN: &str = "Username already taken";

/// Validated student fields. Name and subject are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub subject: String,
    pub marks: Marks,
}

impl StudentFields {
    /// Validate raw form input.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` with the user-facing message of the
    /// first failed check.
    pub fn parse(name: &str, subject: &str, marks: &str) -> Result<Self, CoreError> {
        let marks: i64 = marks
            .trim()
            .parse()
            .map_err(|_| CoreError::validation(MARKS_NOT_A_NUMBER))?;

        let name = name.trim();
        let subject = subject.trim();
        if name.is_empty() || subject.is_empty() {
            return Err(CoreError::validation(ALL_FIELDS_REQUIRED));
        }

        Ok(Self {
            name: name.to_string(),
            subject: subject.to_string(),
            marks: Marks::new(marks)?,
        })
    }
}
