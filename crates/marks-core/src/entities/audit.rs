use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::AuditAction;
use crate::marks::Marks;

/// An append-only audit entry recording one mutation of a student record.
///
/// `student_id` is kept after the student is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub action: AuditAction,
    pub old_marks: Option<Marks>,
    pub new_marks: Option<Marks>,
    pub timestamp: DateTime<Utc>,
}
