use chrono::{DateTime, Utc};

/// A teacher account. Created at signup; credentials replaced on password reset.
///
/// Not serializable: the hash and salt never leave the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub created_at: DateTime<Utc>,
}
