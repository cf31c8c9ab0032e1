//! Teacher repository: the credential store.

use chrono::Utc;

use marks_core::entities::Teacher;
use marks_core::errors::CoreError;
use marks_core::validation::USERNAME_TAKEN;

use crate::error::{DatabaseError, is_constraint_violation};
use crate::helpers::parse_datetime;
use crate::service::MarksService;

const TEACHER_COLUMNS: &str = "id, username, password_hash, salt, created_at";

fn row_to_teacher(row: &libsql::Row) -> Result<Teacher, DatabaseError> {
    Ok(Teacher {
        id: row.get::<i64>(0)?,
        username: row.get::<String>(1)?,
        password_hash: row.get::<String>(2)?,
        salt: row.get::<String>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl MarksService {
    /// Create a teacher account from an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` ("Username already taken") wrapped in
    /// `DatabaseError::Core` if the username exists.
    pub async fn create_teacher(
        &self,
        username: &str,
        password_hash: &str,
        salt: &str,
    ) -> Result<Teacher, DatabaseError> {
        let _guard = self.lock_writes().await;

        // The UNIQUE index rejects duplicates, including ones written by
        // another process sharing the file.
        let now = Utc::now();
        let inserted = self
            .db()
            .conn()
            .execute(
                "INSERT INTO teachers (username, password_hash, salt, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![username, password_hash, salt, now.to_rfc3339()],
            )
            .await;
        match inserted {
            Ok(_) => {}
            Err(err) if is_constraint_violation(&err) => {
                return Err(CoreError::validation(USERNAME_TAKEN).into());
            }
            Err(err) => return Err(err.into()),
        }
        let id = self.db().conn().last_insert_rowid();

        tracing::info!(teacher_id = id, username, "teacher created");
        Ok(Teacher {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            salt: salt.to_string(),
            created_at: now,
        })
    }

    /// Look up a teacher by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = ?1"),
                libsql::params![id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_teacher).transpose()
    }

    /// Look up a teacher by exact username.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_teacher_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Teacher>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE username = ?1"),
                [username],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_teacher).transpose()
    }

    /// Replace a teacher's password hash and salt.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` wrapped in `DatabaseError::Core` if no
    /// teacher has this id.
    pub async fn update_teacher_credentials(
        &self,
        id: i64,
        password_hash: &str,
        salt: &str,
    ) -> Result<(), DatabaseError> {
        let _guard = self.lock_writes().await;
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE teachers SET password_hash = ?1, salt = ?2 WHERE id = ?3",
                libsql::params![password_hash, salt, id],
            )
            .await?;
        if changed == 0 {
            return Err(CoreError::NotFound {
                entity_type: "Teacher".to_string(),
                id: id.to_string(),
            }
            .into());
        }
        tracing::info!(teacher_id = id, "teacher credentials replaced");
        Ok(())
    }
}
