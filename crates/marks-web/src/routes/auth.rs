//! Login, registration, logout, and forgot-password pages.

use axum::Form;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use marks_auth::ResetStep;
use marks_auth::authenticator::USERNAME_NOT_FOUND;

use crate::cookies::{clear_session_cookie, session_cookie};
use crate::error::ApiError;
use crate::extract::SessionToken;
use crate::pages::{ForgotPasswordPage, LoginPage, RegisterPage};
use crate::state::AppState;

const REGISTERED_NOTICE: &str = "Account created. Please log in.";
const RESET_NOTICE: &str = "Password updated. Please log in.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForgotPasswordForm {
    pub username: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginQuery {
    pub registered: bool,
    pub reset: bool,
}

pub async fn login_page(State(state): State<AppState>, Query(query): Query<LoginQuery>) -> Response {
    let notice = if query.registered {
        Some(REGISTERED_NOTICE.to_string())
    } else if query.reset {
        Some(RESET_NOTICE.to_string())
    } else {
        None
    };
    state.pages.render(
        StatusCode::OK,
        "login",
        &LoginPage {
            notice,
            ..LoginPage::default()
        },
    )
}

pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match state.auth.login(&form.username, &form.password).await {
        Ok(token) => (
            [(header::SET_COOKIE, session_cookie(&state.session, &token))],
            Redirect::to("/students"),
        )
            .into_response(),
        Err(err) => {
            let err = ApiError::from(err);
            state.pages.render(
                err.status(),
                "login",
                &LoginPage {
                    error: Some(err.into_message()),
                    notice: None,
                    username: form.username,
                },
            )
        }
    }
}

pub async fn register_page(State(state): State<AppState>) -> Response {
    state
        .pages
        .render(StatusCode::OK, "register", &RegisterPage::default())
}

pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match state.auth.signup(&form.username, &form.password).await {
        Ok(_) => Redirect::to("/login?registered=true").into_response(),
        Err(err) => {
            let err = ApiError::from(err);
            state.pages.render(
                err.status(),
                "register",
                &RegisterPage {
                    error: Some(err.into_message()),
                    username: form.username,
                },
            )
        }
    }
}

/// Drop the session (if any) and clear the cookie.
pub async fn logout(State(state): State<AppState>, SessionToken(token): SessionToken) -> Response {
    if let Some(token) = token {
        state.auth.logout(&token).await;
    }
    (
        [(header::SET_COOKIE, clear_session_cookie(&state.session))],
        Redirect::to("/login"),
    )
        .into_response()
}

pub async fn forgot_password_page(State(state): State<AppState>) -> Response {
    state.pages.render(
        StatusCode::OK,
        "forgot_password",
        &ForgotPasswordPage::default(),
    )
}

pub async fn forgot_password_submit(
    State(state): State<AppState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Response {
    let result = state
        .auth
        .forgot_password(&form.username, &form.new_password, &form.confirm_password)
        .await;

    match result {
        Ok(ResetStep::PasswordReset) => Redirect::to("/login?reset=true").into_response(),
        Ok(ResetStep::AccountConfirmed) => state.pages.render(
            StatusCode::OK,
            "forgot_password",
            &ForgotPasswordPage {
                error: None,
                username: form.username,
                show_password_fields: true,
            },
        ),
        Err(err) => {
            let err = ApiError::from(err);
            // Keep the password fields once the account is known to exist.
            let passwords_submitted =
                !form.new_password.is_empty() || !form.confirm_password.is_empty();
            let show_password_fields = passwords_submitted
                && err.status() == StatusCode::BAD_REQUEST
                && err.message() != USERNAME_NOT_FOUND;
            state.pages.render(
                err.status(),
                "forgot_password",
                &ForgotPasswordPage {
                    error: Some(err.into_message()),
                    username: form.username,
                    show_password_fields,
                },
            )
        }
    }
}
