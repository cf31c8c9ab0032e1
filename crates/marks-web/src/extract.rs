//! Request extractors resolving the session cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use std::convert::Infallible;

use marks_auth::AuthError;
use marks_core::entities::Teacher;

use crate::cookies::session_token;
use crate::error::ApiError;
use crate::state::AppState;

/// The raw session token, if the request carries one.
pub struct SessionToken(pub Option<String>);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self(session_token(&parts.headers, &state.session.cookie_name)))
    }
}

/// The logged-in teacher for `/api/*` routes. Rejects with a JSON 401.
pub struct ApiTeacher(pub Teacher);

impl FromRequestParts<AppState> for ApiTeacher {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, &state.session.cookie_name);
        let teacher = state.auth.require_session(token.as_deref()).await?;
        Ok(Self(teacher))
    }
}

/// The logged-in teacher for page routes. Redirects to `/login` otherwise.
pub struct PageTeacher(pub Teacher);

impl FromRequestParts<AppState> for PageTeacher {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, &state.session.cookie_name);
        match state.auth.require_session(token.as_deref()).await {
            Ok(teacher) => Ok(Self(teacher)),
            Err(AuthError::NotAuthenticated) => Err(Redirect::to("/login").into_response()),
            Err(err) => {
                let err = ApiError::from(err);
                Err(state.pages.error(err.status(), err.into_message()))
            }
        }
    }
}
