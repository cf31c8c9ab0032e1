//! JSON endpoints under `/api`. Every one requires a session.

use axum::Json;
use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::extract::{Form, Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use marks_core::enums::AuditAction;
use marks_core::responses::{AuditListResponse, DeleteResponse, StudentListResponse, StudentResponse};
use marks_core::validation::StudentFields;
use marks_db::repos::audit::AuditFilter;

use crate::error::ApiError;
use crate::extract::ApiTeacher;
use crate::routes::students::StudentForm;
use crate::state::AppState;

/// Query string accepted by `GET /api/audit`.
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub student_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub limit: Option<u32>,
}

pub async fn list_students(
    State(state): State<AppState>,
    ApiTeacher(_teacher): ApiTeacher,
) -> Result<Json<StudentListResponse>, ApiError> {
    let students = state.service.list_students().await?;
    Ok(Json(StudentListResponse::new(&students)))
}

/// A missing `marks` field counts as 0.
pub async fn add_student(
    State(state): State<AppState>,
    ApiTeacher(teacher): ApiTeacher,
    form: Result<Form<StudentForm>, FormRejection>,
) -> Result<Json<StudentResponse>, ApiError> {
    let Form(form) = form.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let marks = form.marks.as_deref().unwrap_or("0");
    let fields = StudentFields::parse(&form.name, &form.subject, marks)?;
    let outcome = state.service.add_student(teacher.id, &fields).await?;
    Ok(Json(StudentResponse::new(outcome.student())))
}

pub async fn delete_student(
    State(state): State<AppState>,
    ApiTeacher(teacher): ApiTeacher,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::student_not_found())?;
    let deleted = state.service.delete_student(teacher.id, id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        student_id: deleted.id,
    }))
}

pub async fn audit_log(
    State(state): State<AppState>,
    ApiTeacher(_teacher): ApiTeacher,
    query: Result<Query<AuditQuery>, QueryRejection>,
) -> Result<Json<AuditListResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let entries = state
        .service
        .query_audit(&AuditFilter {
            student_id: query.student_id,
            teacher_id: None,
            action: query.action,
            limit: query.limit,
        })
        .await?;
    Ok(Json(AuditListResponse::new(&entries)))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
