//! Signup, login, logout, session resolution, and password reset.

use std::sync::Arc;

use marks_core::entities::Teacher;
use marks_db::service::MarksService;

use crate::error::AuthError;
use crate::password::{hash_password, verify_password};
use crate::random::random_hex;
use crate::session::SessionStore;

pub const SIGNUP_FIELDS_REQUIRED: &str = "All fields required";
pub const RESET_FIELDS_REQUIRED: &str = "Please fill all required fields";
pub const USERNAME_NOT_FOUND: &str = "Username not found";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Fresh tokens colliding with a live one is astronomically unlikely; bound
/// the retry anyway.
const TOKEN_ATTEMPTS: usize = 4;

/// Which phase of the forgot-password flow completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStep {
    /// Phase 1: the account exists; ask for the new password.
    AccountConfirmed,
    /// Phase 2: credentials were replaced.
    PasswordReset,
}

/// Owns the session store and composes it with the credential store.
pub struct Authenticator {
    service: Arc<MarksService>,
    sessions: SessionStore,
}

impl Authenticator {
    #[must_use]
    pub fn new(service: Arc<MarksService>) -> Self {
        Self {
            service,
            sessions: SessionStore::new(),
        }
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Create a teacher account with a freshly salted hash.
    ///
    /// # Errors
    ///
    /// `AuthError::Validation` if a field is blank or the username is taken.
    pub async fn signup(&self, username: &str, password: &str) -> Result<Teacher, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::validation(SIGNUP_FIELDS_REQUIRED));
        }
        let hashed = hash_password(password, None)?;
        self.service
            .create_teacher(username, &hashed.hash, &hashed.salt)
            .await
            .map_err(AuthError::from_db)
    }

    /// Verify credentials and open a session. Returns the session token.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` for an unknown username or wrong password.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let username = username.trim();
        let Some(teacher) = self.service.find_teacher_by_username(username).await? else {
            tracing::warn!(username, "login for unknown username");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, &teacher.salt, &teacher.password_hash) {
            tracing::warn!(teacher_id = teacher.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        for _ in 0..TOKEN_ATTEMPTS {
            let token = random_hex()?;
            if self.sessions.insert_new(&token, teacher.id).await {
                tracing::info!(teacher_id = teacher.id, "session opened");
                return Ok(token);
            }
        }
        Err(AuthError::Random("could not allocate a unique session token".to_string()))
    }

    /// Close a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) {
        if let Some(teacher_id) = self.sessions.remove(token).await {
            tracing::info!(teacher_id, "session closed");
        }
    }

    /// Map a session token to its teacher.
    ///
    /// A token whose teacher no longer exists resolves to `None`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Database` if the teacher lookup fails.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<Teacher>, AuthError> {
        let Some(teacher_id) = self.sessions.get(token).await else {
            return Ok(None);
        };
        Ok(self.service.get_teacher(teacher_id).await?)
    }

    /// Like [`Self::resolve_session`], but a missing or stale session is an error.
    ///
    /// # Errors
    ///
    /// `AuthError::NotAuthenticated` when there is no live session.
    pub async fn require_session(&self, token: Option<&str>) -> Result<Teacher, AuthError> {
        match token {
            Some(token) => self
                .resolve_session(token)
                .await?
                .ok_or(AuthError::NotAuthenticated),
            None => Err(AuthError::NotAuthenticated),
        }
    }

    /// Forgot-password phase 1: confirm the account exists.
    ///
    /// This reveals whether a username is registered.
    ///
    /// # Errors
    ///
    /// `AuthError::Validation` for a blank or unknown username.
    pub async fn confirm_account(&self, username: &str) -> Result<Teacher, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::validation(RESET_FIELDS_REQUIRED));
        }
        self.service
            .find_teacher_by_username(username)
            .await?
            .ok_or_else(|| AuthError::validation(USERNAME_NOT_FOUND))
    }

    /// Forgot-password phase 2: replace the password with a freshly salted hash.
    ///
    /// Existing sessions stay open.
    ///
    /// # Errors
    ///
    /// `AuthError::Validation` for blank fields, an unknown username (checked
    /// first), or mismatched passwords.
    pub async fn reset_password(
        &self,
        username: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        if new_password.is_empty() || confirm_password.is_empty() {
            return Err(AuthError::validation(RESET_FIELDS_REQUIRED));
        }
        let teacher = self.confirm_account(username).await?;
        if new_password != confirm_password {
            return Err(AuthError::validation(PASSWORDS_DO_NOT_MATCH));
        }
        let hashed = hash_password(new_password, None)?;
        self.service
            .update_teacher_credentials(teacher.id, &hashed.hash, &hashed.salt)
            .await
            .map_err(AuthError::from_db)
    }

    /// Run whichever forgot-password phase the submitted fields call for.
    ///
    /// Username alone selects phase 1; username plus both passwords selects
    /// phase 2. Exactly one password field is a validation error.
    ///
    /// # Errors
    ///
    /// Same as [`Self::confirm_account`] and [`Self::reset_password`].
    pub async fn forgot_password(
        &self,
        username: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<ResetStep, AuthError> {
        match (new_password.is_empty(), confirm_password.is_empty()) {
            (true, true) => {
                self.confirm_account(username).await?;
                Ok(ResetStep::AccountConfirmed)
            }
            (false, false) => {
                self.reset_password(username, new_password, confirm_password)
                    .await?;
                Ok(ResetStep::PasswordReset)
            }
            _ => Err(AuthError::validation(RESET_FIELDS_REQUIRED)),
        }
    }
}
