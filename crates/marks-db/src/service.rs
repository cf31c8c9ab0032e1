//! Service layer orchestrating database mutations with the audit log.
//!
//! `MarksService` wraps `MarksDb`. All repo methods are implemented as
//! `impl MarksService` in `crate::repos`.

use tokio::sync::{Mutex, MutexGuard};

use crate::MarksDb;
use crate::error::DatabaseError;

/// Orchestrates database mutations with the audit log.
///
/// Every mutation method follows this protocol:
/// 1. Acquire the write lock
/// 2. Begin transaction
/// 3. Read, check, and execute SQL
/// 4. Append audit entry (inside transaction)
/// 5. Commit, or roll back on any error
///
/// The write lock makes check-then-write sequences such as the marks merge
/// atomic with respect to other mutations sharing this connection.
pub struct MarksService {
    db: MarksDb,
    write_lock: Mutex<()>,
}

impl MarksService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = MarksDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Create from an existing `MarksDb`.
    #[must_use]
    pub fn from_db(db: MarksDb) -> Self {
        Self {
            db,
            write_lock: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &MarksDb {
        &self.db
    }

    /// Wait for exclusive write access.
    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Open a transaction on the shared connection. Call with the write lock held.
    pub(crate) async fn begin(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self.db.conn().transaction().await?)
    }
}

/// Commit `tx` if `result` is `Ok`, otherwise roll it back and return the error.
pub(crate) async fn finish<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::error!(%rollback, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
