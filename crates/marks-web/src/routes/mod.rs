//! Route table.

mod api;
mod auth;
mod students;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full router around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(auth::login_page))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/register", get(auth::register_page).post(auth::register_submit))
        .route("/signup", get(auth::register_page).post(auth::register_submit))
        .route("/logout", get(auth::logout).post(auth::logout))
        .route(
            "/forgot-password",
            get(auth::forgot_password_page).post(auth::forgot_password_submit),
        )
        .route("/students", get(students::students_page))
        .route("/students/add", post(students::add_submit))
        .route("/students/delete/{id}", post(students::delete_submit))
        .route(
            "/students/edit/{id}",
            get(students::edit_page).post(students::edit_submit),
        )
        .route("/api/students", get(api::list_students))
        .route("/api/add", post(api::add_student))
        .route("/api/delete/{id}", post(api::delete_student))
        .route("/api/audit", get(api::audit_log))
        .route("/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
