//! # marks-web
//!
//! HTTP surface of the marks portal, built on axum.
//!
//! Pages (`/login`, `/register`, `/students`, ...) render HTML and report
//! errors inline; `/api/*` endpoints return `{success, ...}` JSON and answer
//! 401 without a valid `session_token` cookie.

pub mod cookies;
pub mod error;
pub mod extract;
pub mod pages;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
