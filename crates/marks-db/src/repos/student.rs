//! Student repository: listing, the add-with-merge rule, edit, and delete.
//!
//! Every mutation runs under the service write lock inside one transaction
//! that also appends its audit entry.

use chrono::{DateTime, Utc};

use marks_core::entities::Student;
use marks_core::enums::AuditAction;
use marks_core::errors::CoreError;
use marks_core::marks::Marks;
use marks_core::validation::{DUPLICATE_STUDENT, MERGE_OVERFLOW, NAME_SUBJECT_TAKEN, StudentFields};

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_marks};
use crate::repos::audit::{NewAuditEntry, append_audit};
use crate::service::{MarksService, finish};

const STUDENT_COLUMNS: &str = "id, name, subject, marks, created_at, updated_at";

fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    Ok(Student {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        subject: row.get::<String>(2)?,
        marks: parse_marks(row.get::<i64>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// Result of [`MarksService::add_student`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// No record existed for the (name, subject) pair.
    Created(Student),
    /// Marks were added to an existing record.
    Merged { student: Student, previous: Marks },
}

impl AddOutcome {
    #[must_use]
    pub const fn student(&self) -> &Student {
        match self {
            Self::Created(student) | Self::Merged { student, .. } => student,
        }
    }

    #[must_use]
    pub fn into_student(self) -> Student {
        match self {
            Self::Created(student) | Self::Merged { student, .. } => student,
        }
    }
}

async fn find_student(conn: &libsql::Connection, id: i64) -> Result<Option<Student>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
            libsql::params![id],
        )
        .await?;
    rows.next().await?.as_ref().map(row_to_student).transpose()
}

async fn find_by_name_subject(
    conn: &libsql::Connection,
    name: &str,
    subject: &str,
) -> Result<Option<Student>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE name = ?1 AND subject = ?2"),
            libsql::params![name, subject],
        )
        .await?;
    rows.next().await?.as_ref().map(row_to_student).transpose()
}

/// Exact duplicate, then merge, then create. First matching branch wins.
async fn add_in_tx(
    conn: &libsql::Connection,
    teacher_id: i64,
    fields: &StudentFields,
    now: DateTime<Utc>,
) -> Result<AddOutcome, DatabaseError> {
    match find_by_name_subject(conn, &fields.name, &fields.subject).await? {
        Some(existing) if existing.marks == fields.marks => {
            Err(CoreError::conflict(DUPLICATE_STUDENT).into())
        }
        Some(existing) => {
            let total = existing
                .marks
                .checked_add(fields.marks)
                .ok_or_else(|| CoreError::validation(MERGE_OVERFLOW))?;
            conn.execute(
                "UPDATE students SET marks = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(total), now.to_rfc3339(), existing.id],
            )
            .await?;
            append_audit(
                conn,
                &NewAuditEntry {
                    teacher_id,
                    student_id: existing.id,
                    action: AuditAction::Update,
                    old_marks: Some(existing.marks),
                    new_marks: Some(total),
                    timestamp: now,
                },
            )
            .await?;
            let previous = existing.marks;
            Ok(AddOutcome::Merged {
                student: Student {
                    marks: total,
                    updated_at: now,
                    ..existing
                },
                previous,
            })
        }
        None => {
            conn.execute(
                "INSERT INTO students (name, subject, marks, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    fields.name.as_str(),
                    fields.subject.as_str(),
                    i64::from(fields.marks),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
            let id = conn.last_insert_rowid();
            append_audit(
                conn,
                &NewAuditEntry {
                    teacher_id,
                    student_id: id,
                    action: AuditAction::Create,
                    old_marks: None,
                    new_marks: Some(fields.marks),
                    timestamp: now,
                },
            )
            .await?;
            Ok(AddOutcome::Created(Student {
                id,
                name: fields.name.clone(),
                subject: fields.subject.clone(),
                marks: fields.marks,
                created_at: now,
                updated_at: now,
            }))
        }
    }
}

async fn edit_in_tx(
    conn: &libsql::Connection,
    teacher_id: i64,
    id: i64,
    fields: &StudentFields,
    now: DateTime<Utc>,
) -> Result<Student, DatabaseError> {
    let existing = find_student(conn, id)
        .await?
        .ok_or_else(|| CoreError::student_not_found(id))?;

    if let Some(other) = find_by_name_subject(conn, &fields.name, &fields.subject).await? {
        if other.id != id {
            return Err(CoreError::conflict(NAME_SUBJECT_TAKEN).into());
        }
    }

    conn.execute(
        "UPDATE students SET name = ?1, subject = ?2, marks = ?3, updated_at = ?4 WHERE id = ?5",
        libsql::params![
            fields.name.as_str(),
            fields.subject.as_str(),
            i64::from(fields.marks),
            now.to_rfc3339(),
            id
        ],
    )
    .await?;
    append_audit(
        conn,
        &NewAuditEntry {
            teacher_id,
            student_id: id,
            action: AuditAction::Edit,
            old_marks: Some(existing.marks),
            new_marks: Some(fields.marks),
            timestamp: now,
        },
    )
    .await?;

    Ok(Student {
        id,
        name: fields.name.clone(),
        subject: fields.subject.clone(),
        marks: fields.marks,
        created_at: existing.created_at,
        updated_at: now,
    })
}

/// Audit first, then remove the row.
async fn delete_in_tx(
    conn: &libsql::Connection,
    teacher_id: i64,
    id: i64,
    now: DateTime<Utc>,
) -> Result<Student, DatabaseError> {
    let existing = find_student(conn, id)
        .await?
        .ok_or_else(|| CoreError::student_not_found(id))?;

    append_audit(
        conn,
        &NewAuditEntry {
            teacher_id,
            student_id: id,
            action: AuditAction::Delete,
            old_marks: Some(existing.marks),
            new_marks: None,
            timestamp: now,
        },
    )
    .await?;
    conn.execute("DELETE FROM students WHERE id = ?1", libsql::params![id])
        .await?;
    Ok(existing)
}

impl MarksService {
    /// All students ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id ASC"),
                (),
            )
            .await?;
        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }

    /// Look up a student by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` wrapped in `DatabaseError::Core` if the
    /// id is unknown.
    pub async fn get_student(&self, id: i64) -> Result<Student, DatabaseError> {
        find_student(self.db().conn(), id)
            .await?
            .ok_or_else(|| CoreError::student_not_found(id).into())
    }

    /// Add marks for a (name, subject) pair, merging into an existing record.
    ///
    /// # Errors
    ///
    /// Wrapped in `DatabaseError::Core`:
    /// - `CoreError::Conflict` if an identical record exists;
    /// - `CoreError::Validation` if the merged total would exceed 100.
    ///
    /// Nothing is written in either case.
    pub async fn add_student(
        &self,
        teacher_id: i64,
        fields: &StudentFields,
    ) -> Result<AddOutcome, DatabaseError> {
        let _guard = self.lock_writes().await;
        let tx = self.begin().await?;
        let result = add_in_tx(&tx, teacher_id, fields, Utc::now()).await;
        let outcome = finish(tx, result).await?;

        match &outcome {
            AddOutcome::Created(student) => {
                tracing::info!(student_id = student.id, teacher_id, "student created");
            }
            AddOutcome::Merged { student, previous } => {
                tracing::info!(
                    student_id = student.id,
                    teacher_id,
                    %previous,
                    total = %student.marks,
                    "marks merged"
                );
            }
        }
        Ok(outcome)
    }

    /// Overwrite name, subject, and marks of an existing student.
    ///
    /// # Errors
    ///
    /// Wrapped in `DatabaseError::Core`:
    /// - `CoreError::NotFound` if the id is unknown;
    /// - `CoreError::Conflict` if another record already has the new
    ///   (name, subject) pair.
    pub async fn edit_student(
        &self,
        teacher_id: i64,
        id: i64,
        fields: &StudentFields,
    ) -> Result<Student, DatabaseError> {
        let _guard = self.lock_writes().await;
        let tx = self.begin().await?;
        let result = edit_in_tx(&tx, teacher_id, id, fields, Utc::now()).await;
        let student = finish(tx, result).await?;
        tracing::info!(student_id = id, teacher_id, "student edited");
        Ok(student)
    }

    /// Delete a student, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` wrapped in `DatabaseError::Core` if the
    /// id is unknown.
    pub async fn delete_student(&self, teacher_id: i64, id: i64) -> Result<Student, DatabaseError> {
        let _guard = self.lock_writes().await;
        let tx = self.begin().await?;
        let result = delete_in_tx(&tx, teacher_id, id, Utc::now()).await;
        let student = finish(tx, result).await?;
        tracing::info!(student_id = id, teacher_id, "student deleted");
        Ok(student)
    }
}
