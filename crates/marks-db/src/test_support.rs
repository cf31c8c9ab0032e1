//! Shared test utilities for marks-db unit tests.

use crate::service::MarksService;

/// Create an in-memory `MarksService`.
pub async fn test_service() -> MarksService {
    MarksService::new_local(":memory:").await.unwrap()
}

/// Create a teacher and return its id (audit entries need one).
pub async fn seed_teacher(svc: &MarksService, username: &str) -> i64 {
    svc.create_teacher(username, "hash", "salt").await.unwrap().id
}
