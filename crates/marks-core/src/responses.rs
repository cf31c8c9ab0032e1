//! JSON response payloads returned by the `/api/*` endpoints.
//!
//! Every payload carries `success`; failures use `ErrorResponse`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AuditEntry, Student};
use crate::enums::AuditAction;

/// A student as exposed over the API. The marks field is named `mark`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentPayload {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub mark: u8,
}

impl From<&Student> for StudentPayload {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            subject: student.subject.clone(),
            mark: student.marks.get(),
        }
    }
}

/// Response from `GET /api/students`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentListResponse {
    pub success: bool,
    pub students: Vec<StudentPayload>,
}

impl StudentListResponse {
    #[must_use]
    pub fn new(students: &[Student]) -> Self {
        Self {
            success: true,
            students: students.iter().map(StudentPayload::from).collect(),
        }
    }
}

/// Response from `POST /api/add`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentResponse {
    pub success: bool,
    pub student: StudentPayload,
}

impl StudentResponse {
    #[must_use]
    pub fn new(student: &Student) -> Self {
        Self {
            success: true,
            student: student.into(),
        }
    }
}

/// Response from `POST /api/delete/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeleteResponse {
    pub success: bool,
    pub student_id: i64,
}

/// An audit entry as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEntryPayload {
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub action: AuditAction,
    pub old_marks: Option<u8>,
    pub new_marks: Option<u8>,
    pub timestamp: DateTime<Utc>,
}

impl From<&AuditEntry> for AuditEntryPayload {
    fn from(entry: &AuditEntry) -> Self {
        Self {
            id: entry.id,
            teacher_id: entry.teacher_id,
            student_id: entry.student_id,
            action: entry.action,
            old_marks: entry.old_marks.map(crate::marks::Marks::get),
            new_marks: entry.new_marks.map(crate::marks::Marks::get),
            timestamp: entry.timestamp,
        }
    }
}

/// Response from `GET /api/audit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditListResponse {
    pub success: bool,
    pub entries: Vec<AuditEntryPayload>,
}

impl AuditListResponse {
    #[must_use]
    pub fn new(entries: &[AuditEntry]) -> Self {
        Self {
            success: true,
            entries: entries.iter().map(AuditEntryPayload::from).collect(),
        }
    }
}

/// Failure payload: `{success: false, message}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
