//! # marks-db
//!
//! libSQL persistence for the marks portal: teacher credentials, student
//! records, and the append-only audit log.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29). All repository methods
//! live on [`service::MarksService`]; every student mutation and its audit
//! entry are written in one transaction.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and its single connection. `:memory:` databases
/// only exist for the lifetime of that connection.
pub struct MarksDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl MarksDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let marks_db = Self { db, conn };
        marks_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(marks_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
