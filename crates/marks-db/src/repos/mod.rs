//! Repository methods, one module per table, all on `MarksService`.

pub mod audit;
pub mod student;
pub mod teacher;
