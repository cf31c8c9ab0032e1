//! Audit log repository.
//!
//! Append-only entries recording every student mutation. Appends happen only
//! inside the mutation's own transaction; the table rejects UPDATE and DELETE.

use chrono::{DateTime, Utc};

use marks_core::entities::AuditEntry;
use marks_core::enums::AuditAction;
use marks_core::marks::Marks;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_marks, parse_datetime, parse_enum};
use crate::service::MarksService;

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub limit: Option<u32>,
}

/// Fields of an entry about to be appended.
pub(crate) struct NewAuditEntry {
    pub teacher_id: i64,
    pub student_id: i64,
    pub action: AuditAction,
    pub old_marks: Option<Marks>,
    pub new_marks: Option<Marks>,
    pub timestamp: DateTime<Utc>,
}

/// Append an entry on `conn`, normally an open transaction.
pub(crate) async fn append_audit(
    conn: &libsql::Connection,
    entry: &NewAuditEntry,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO audit_log (teacher_id, student_id, action, old_marks, new_marks, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        libsql::params![
            entry.teacher_id,
            entry.student_id,
            entry.action.as_str(),
            entry.old_marks.map(i64::from),
            entry.new_marks.map(i64::from),
            entry.timestamp.to_rfc3339()
        ],
    )
    .await?;
    let id = conn.last_insert_rowid();
    tracing::debug!(
        audit_id = id,
        student_id = entry.student_id,
        action = %entry.action,
        "audit entry appended"
    );
    Ok(id)
}

fn row_to_audit(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: row.get::<i64>(0)?,
        teacher_id: row.get::<i64>(1)?,
        student_id: row.get::<i64>(2)?,
        action: parse_enum(&row.get::<String>(3)?)?,
        old_marks: get_opt_marks(row, 4)?,
        new_marks: get_opt_marks(row, 5)?,
        timestamp: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl MarksService {
    /// Query audit entries with optional filters, in append order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(student_id) = filter.student_id {
            params.push(libsql::Value::Integer(student_id));
            conditions.push(format!("student_id = ?{}", params.len()));
        }
        if let Some(teacher_id) = filter.teacher_id {
            params.push(libsql::Value::Integer(teacher_id));
            conditions.push(format!("teacher_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT id, teacher_id, student_id, action, old_marks, new_marks, timestamp
             FROM audit_log {where_clause}
             ORDER BY id ASC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_audit(&row)?);
        }
        Ok(entries)
    }
}
