//! Entity structs for the portal's domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `marks-db/migrations/001_initial.sql`).

mod audit;
mod student;
mod teacher;

pub use audit::AuditEntry;
pub use student::Student;
pub use teacher::Teacher;
