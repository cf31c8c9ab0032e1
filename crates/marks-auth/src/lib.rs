//! # marks-auth
//!
//! Authentication for the marks portal.
//!
//! Provides salted SHA-256 password hashing, random session tokens, the
//! in-memory session store, and the signup/login/logout/forgot-password flows
//! built on the credential store in `marks-db`.

pub mod authenticator;
pub mod error;
pub mod password;
pub mod random;
pub mod session;

pub use authenticator::{Authenticator, ResetStep};
pub use error::AuthError;
pub use session::SessionStore;
