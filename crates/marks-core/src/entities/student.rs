use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marks::Marks;

/// A student's marks in one subject. `(name, subject)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub marks: Marks,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
