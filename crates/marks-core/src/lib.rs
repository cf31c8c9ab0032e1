//! # marks-core
//!
//! Core types, validation, and error types for the marks portal.
//!
//! This crate provides the foundational types shared across all portal crates:
//! - Entity structs for teachers, students, and audit entries
//! - The `AuditAction` enum and the range-checked `Marks` value
//! - Field validation shared by the add and edit flows
//! - Cross-cutting error types
//! - JSON response payloads for the HTTP API

pub mod entities;
pub mod enums;
pub mod errors;
pub mod marks;
pub mod responses;
pub mod validation;
