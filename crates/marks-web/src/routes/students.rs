//! Student list and edit pages.
//!
//! The list page's add and delete forms post here and land back on
//! `/students`; rejected input re-renders the list with the message.

use axum::Form;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use marks_core::responses::StudentPayload;
use marks_core::validation::StudentFields;

use crate::error::ApiError;
use crate::extract::PageTeacher;
use crate::pages::{EditStudentPage, StudentsPage};
use crate::state::AppState;

/// Fields posted by the add and edit forms.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StudentForm {
    pub name: String,
    pub subject: String,
    pub marks: Option<String>,
}

pub async fn students_page(State(state): State<AppState>, PageTeacher(teacher): PageTeacher) -> Response {
    render_list(
        &state,
        StatusCode::OK,
        StudentsPage {
            username: teacher.username,
            ..StudentsPage::default()
        },
    )
    .await
}

/// Add or merge from the list page. A missing `marks` field counts as 0.
pub async fn add_submit(
    State(state): State<AppState>,
    PageTeacher(teacher): PageTeacher,
    Form(form): Form<StudentForm>,
) -> Response {
    let marks = form.marks.unwrap_or_else(|| "0".to_string());
    let result = match StudentFields::parse(&form.name, &form.subject, &marks) {
        Ok(fields) => state
            .service
            .add_student(teacher.id, &fields)
            .await
            .map(drop)
            .map_err(ApiError::from),
        Err(err) => Err(ApiError::from(err)),
    };

    match result {
        Ok(()) => Redirect::to("/students").into_response(),
        Err(err) if err.status() == StatusCode::BAD_REQUEST => {
            render_list(
                &state,
                err.status(),
                StudentsPage {
                    username: teacher.username,
                    error: Some(err.into_message()),
                    name: form.name,
                    subject: form.subject,
                    marks,
                    ..StudentsPage::default()
                },
            )
            .await
        }
        Err(err) => error_page(&state, err),
    }
}

pub async fn delete_submit(
    State(state): State<AppState>,
    PageTeacher(teacher): PageTeacher,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = match id {
        Ok(Path(id)) => state
            .service
            .delete_student(teacher.id, id)
            .await
            .map(drop)
            .map_err(ApiError::from),
        Err(_) => Err(ApiError::student_not_found()),
    };

    match result {
        Ok(()) => Redirect::to("/students").into_response(),
        Err(err) if err.status() == StatusCode::NOT_FOUND => {
            render_list(
                &state,
                err.status(),
                StudentsPage {
                    username: teacher.username,
                    error: Some(err.into_message()),
                    ..StudentsPage::default()
                },
            )
            .await
        }
        Err(err) => error_page(&state, err),
    }
}

/// Fill in the current rows and render the list page.
async fn render_list(state: &AppState, status: StatusCode, page: StudentsPage) -> Response {
    match state.service.list_students().await {
        Ok(students) => state.pages.render(
            status,
            "students",
            &StudentsPage {
                students: students.iter().map(StudentPayload::from).collect(),
                ..page
            },
        ),
        Err(err) => error_page(state, err.into()),
    }
}

fn error_page(state: &AppState, err: ApiError) -> Response {
    state.pages.error(err.status(), err.into_message())
}

pub async fn edit_page(
    State(state): State<AppState>,
    PageTeacher(_teacher): PageTeacher,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Ok(Path(id)) = id else {
        return error_page(&state, ApiError::student_not_found());
    };
    match state.service.get_student(id).await {
        Ok(student) => state.pages.render(
            StatusCode::OK,
            "edit_student",
            &EditStudentPage {
                id,
                name: student.name,
                subject: student.subject,
                marks: student.marks.to_string(),
                error: None,
            },
        ),
        Err(err) => error_page(&state, err.into()),
    }
}

/// Existence is checked before the submitted fields are validated.
pub async fn edit_submit(
    State(state): State<AppState>,
    PageTeacher(teacher): PageTeacher,
    id: Result<Path<i64>, PathRejection>,
    Form(form): Form<StudentForm>,
) -> Response {
    let Ok(Path(id)) = id else {
        return error_page(&state, ApiError::student_not_found());
    };
    if let Err(err) = state.service.get_student(id).await {
        return error_page(&state, err.into());
    }

    let marks = form.marks.clone().unwrap_or_default();
    let result = match StudentFields::parse(&form.name, &form.subject, &marks) {
        Ok(fields) => state
            .service
            .edit_student(teacher.id, id, &fields)
            .await
            .map_err(ApiError::from),
        Err(err) => Err(ApiError::from(err)),
    };

    match result {
        Ok(_) => Redirect::to("/students").into_response(),
        Err(err) if err.status() == StatusCode::BAD_REQUEST => state.pages.render(
            err.status(),
            "edit_student",
            &EditStudentPage {
                id,
                name: form.name,
                subject: form.subject,
                marks,
                error: Some(err.into_message()),
            },
        ),
        Err(err) => error_page(&state, err),
    }
}
