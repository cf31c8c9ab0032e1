//! `/api/*` endpoints exercised through the full router.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{body_json, test_app};

#[tokio::test]
async fn api_requires_a_session() {
    let app = test_app().await;

    let list = app.get("/api/students", None).await;
    assert_eq!(list.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(list).await,
        json!({"success": false, "message": "Not authenticated"})
    );

    let add = app
        .post_form("/api/add", None, "name=A&subject=Math&marks=40")
        .await;
    assert_eq!(add.status(), StatusCode::UNAUTHORIZED);

    let forged = app
        .post_form("/api/delete/1", Some("session_token=0123456789abcdef"), "")
        .await;
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);

    let audit = app.get("/api/audit", None).await;
    assert_eq!(audit.status(), StatusCode::UNAUTHORIZED);

    assert!(app.state.service.list_students().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_then_list() {
    let app = test_app().await;
    let cookie = app.login_as("ms_rao").await;

    let add = app
        .post_form("/api/add", Some(&cookie), "name=Asha&subject=Math&marks=40")
        .await;
    assert_eq!(add.status(), StatusCode::OK);
    let added = body_json(add).await;
    assert_eq!(added["success"], json!(true));
    assert_eq!(added["student"]["mark"], json!(40));
    let id = added["student"]["id"].clone();

    let list = app.get("/api/students", Some(&cookie)).await;
    assert_eq!(
        body_json(list).await,
        json!({
            "success": true,
            "students": [{"id": id, "name": "Asha", "subject": "Math", "mark": 40}]
        })
    );
}

#[tokio::test]
async fn add_merges_and_reports_rule_violations() {
    let app = test_app().await;
    let cookie = app.login_as("ms_rao").await;
    app.post_form("/api/add", Some(&cookie), "name=A&subject=Math&marks=40")
        .await;

    let merged = app
        .post_form("/api/add", Some(&cookie), "name=A&subject=Math&marks=30")
        .await;
    assert_eq!(body_json(merged).await["student"]["mark"], json!(70));

    let overflow = app
        .post_form("/api/add", Some(&cookie), "name=A&subject=Math&marks=31")
        .await;
    assert_eq!(overflow.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(overflow).await,
        json!({"success": false, "message": "Total marks cannot exceed 100"})
    );

    let duplicate = app
        .post_form("/api/add", Some(&cookie), "name=A&subject=Math&marks=70")
        .await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(duplicate).await["message"],
        json!("Student with same name, subject and marks already exists")
    );
}

#[tokio::test]
async fn add_validates_fields() {
    let app = test_app().await;
    let cookie = app.login_as("ms_rao").await;

    for (body, message) in [
        ("name=A&subject=Math&marks=abc", "Marks must be a number"),
        ("name=&subject=Math&marks=10", "All fields are required"),
        ("name=A&subject=Math&marks=150", "Marks must be between 0 and 100"),
    ] {
        let response = app.post_form("/api/add", Some(&cookie), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(response).await["message"], json!(message));
    }
    assert!(app.state.service.list_students().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_marks_count_as_zero() {
    let app = test_app().await;
    let cookie = app.login_as("ms_rao").await;
    let response = app
        .post_form("/api/add", Some(&cookie), "name=A&subject=Math")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["student"]["mark"], json!(0));
}

#[tokio::test]
async fn delete_and_audit() {
    let app = test_app().await;
    let cookie = app.login_as("ms_rao").await;
    let added = body_json(
        app.post_form("/api/add", Some(&cookie), "name=A&subject=Math&marks=40")
            .await,
    )
    .await;
    let id = added["student"]["id"].as_i64().unwrap();

    let deleted = app
        .post_form(&format!("/api/delete/{id}"), Some(&cookie), "")
        .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(
        body_json(deleted).await,
        json!({"success": true, "student_id": id})
    );

    let again = app
        .post_form(&format!("/api/delete/{id}"), Some(&cookie), "")
        .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(again).await,
        json!({"success": false, "message": "Student not found"})
    );

    let audit = body_json(
        app.get(&format!("/api/audit?student_id={id}"), Some(&cookie))
            .await,
    )
    .await;
    let actions: Vec<_> = audit["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| (e["action"].clone(), e["old_marks"].clone(), e["new_marks"].clone()))
        .collect();
    assert_eq!(
        actions,
        vec![
            (json!("create"), json!(null), json!(40)),
            (json!("delete"), json!(40), json!(null)),
        ]
    );

    let deletes_only = body_json(app.get("/api/audit?action=delete", Some(&cookie)).await).await;
    assert_eq!(deletes_only["entries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_numeric_delete_id_is_not_found() {
    let app = test_app().await;
    let cookie = app.login_as("ms_rao").await;
    let response = app.post_form("/api/delete/abc", Some(&cookie), "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_audit_query_is_a_bad_request() {
    let app = test_app().await;
    let cookie = app.login_as("ms_rao").await;
    let response = app.get("/api/audit?action=rename", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], json!(false));
}

#[tokio::test]
async fn health_needs_no_session() {
    let app = test_app().await;
    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));
}
