//! Integration tests for signup, login, logout, sessions, and password reset.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;

use marks_auth::authenticator::{
    PASSWORDS_DO_NOT_MATCH, RESET_FIELDS_REQUIRED, SIGNUP_FIELDS_REQUIRED, USERNAME_NOT_FOUND,
};
use marks_auth::{AuthError, Authenticator, ResetStep};
use marks_db::service::MarksService;

async fn test_auth() -> (Authenticator, Arc<MarksService>) {
    let svc = Arc::new(MarksService::new_local(":memory:").await.unwrap());
    (Authenticator::new(Arc::clone(&svc)), svc)
}

fn validation_message(err: AuthError) -> String {
    match err {
        AuthError::Validation(message) => message,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn signup_stores_salted_hash() {
    let (auth, svc) = test_auth().await;
    let teacher = auth.signup("  ms_rao ", "hunter2").await.unwrap();

    assert_eq!(teacher.username, "ms_rao");
    assert_eq!(teacher.salt.len(), 32);
    assert_ne!(teacher.password_hash, "hunter2");
    let stored = svc.find_teacher_by_username("ms_rao").await.unwrap().unwrap();
    assert_eq!(stored, teacher);
}

#[rstest]
#[case("", "pw")]
#[case("   ", "pw")]
#[case("ms_rao", "")]
#[tokio::test]
async fn signup_requires_both_fields(#[case] username: &str, #[case] password: &str) {
    let (auth, _svc) = test_auth().await;
    let err = auth.signup(username, password).await.unwrap_err();
    assert_eq!(validation_message(err), SIGNUP_FIELDS_REQUIRED);
}

#[tokio::test]
async fn signup_rejects_taken_username() {
    let (auth, _svc) = test_auth().await;
    auth.signup("ms_rao", "a").await.unwrap();
    let err = auth.signup("ms_rao", "b").await.unwrap_err();
    assert_eq!(validation_message(err), "Username already taken");
}

#[tokio::test]
async fn login_opens_a_resolvable_session() {
    let (auth, _svc) = test_auth().await;
    let teacher = auth.signup("ms_rao", "hunter2").await.unwrap();

    let token = auth.login("ms_rao", "hunter2").await.unwrap();
    assert_eq!(token.len(), 32);
    let resolved = auth.resolve_session(&token).await.unwrap().unwrap();
    assert_eq!(resolved.id, teacher.id);
}

#[tokio::test]
async fn wrong_password_creates_no_session() {
    let (auth, _svc) = test_auth().await;
    auth.signup("ms_rao", "hunter2").await.unwrap();

    let err = auth.login("ms_rao", "hunter3").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(auth.sessions().is_empty().await);
}

#[tokio::test]
async fn unknown_user_gets_the_same_error() {
    let (auth, _svc) = test_auth().await;
    let err = auth.login("ghost", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn each_login_gets_its_own_token() {
    let (auth, _svc) = test_auth().await;
    auth.signup("ms_rao", "pw").await.unwrap();
    let a = auth.login("ms_rao", "pw").await.unwrap();
    let b = auth.login("ms_rao", "pw").await.unwrap();
    assert_ne!(a, b);
    assert_eq!(auth.sessions().len().await, 2);
}

#[tokio::test]
async fn logout_ends_the_session_and_is_idempotent() {
    let (auth, _svc) = test_auth().await;
    auth.signup("ms_rao", "pw").await.unwrap();
    let token = auth.login("ms_rao", "pw").await.unwrap();

    auth.logout(&token).await;
    assert!(auth.resolve_session(&token).await.unwrap().is_none());
    auth.logout(&token).await;
    auth.logout("never-issued").await;
}

#[tokio::test]
async fn require_session_rejects_missing_and_unknown_tokens() {
    let (auth, _svc) = test_auth().await;
    assert!(matches!(
        auth.require_session(None).await,
        Err(AuthError::NotAuthenticated)
    ));
    assert!(matches!(
        auth.require_session(Some("deadbeef")).await,
        Err(AuthError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn stale_session_resolves_to_none() {
    let (auth, _svc) = test_auth().await;
    // A token pointing at a teacher id that was never created.
    assert!(auth.sessions().insert_new("stale", 999).await);
    assert!(auth.resolve_session("stale").await.unwrap().is_none());
}

#[tokio::test]
async fn forgot_password_phase_one_reveals_existence() {
    let (auth, _svc) = test_auth().await;
    auth.signup("ms_rao", "pw").await.unwrap();

    assert_eq!(
        auth.forgot_password("ms_rao", "", "").await.unwrap(),
        ResetStep::AccountConfirmed
    );
    let err = auth.forgot_password("ghost", "", "").await.unwrap_err();
    assert_eq!(validation_message(err), USERNAME_NOT_FOUND);
}

#[tokio::test]
async fn forgot_password_phase_two_replaces_credentials() {
    let (auth, svc) = test_auth().await;
    let before = auth.signup("ms_rao", "old").await.unwrap();

    assert_eq!(
        auth.forgot_password("ms_rao", "new", "new").await.unwrap(),
        ResetStep::PasswordReset
    );
    let after = svc.find_teacher_by_username("ms_rao").await.unwrap().unwrap();
    assert_ne!(after.salt, before.salt);
    assert!(matches!(
        auth.login("ms_rao", "old").await,
        Err(AuthError::InvalidCredentials)
    ));
    auth.login("ms_rao", "new").await.unwrap();
}

#[rstest]
#[case("ms_rao", "a", "b", PASSWORDS_DO_NOT_MATCH)]
#[case("ghost", "a", "b", USERNAME_NOT_FOUND)]
#[case("ms_rao", "a", "", RESET_FIELDS_REQUIRED)]
#[case("", "", "", RESET_FIELDS_REQUIRED)]
#[tokio::test]
async fn forgot_password_failures(
    #[case] username: &str,
    #[case] new_password: &str,
    #[case] confirm: &str,
    #[case] expected: &str,
) {
    let (auth, svc) = test_auth().await;
    let before = auth.signup("ms_rao", "old").await.unwrap();

    let err = auth
        .forgot_password(username, new_password, confirm)
        .await
        .unwrap_err();
    assert_eq!(validation_message(err), expected);
    let after = svc.find_teacher_by_username("ms_rao").await.unwrap().unwrap();
    assert_eq!(after, before);
}
