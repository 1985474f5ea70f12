//! Integration tests for staff account management.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json_auth, put_json_auth, token_for, user, FakeBackend,
    FakeData, RecordingMailer,
};
use serde_json::json;

fn staff() -> FakeData {
    FakeData {
        users: vec![
            user(1, "Grace", "GM"),
            user(2, "Mike", "Manager"),
            user(3, "Ade", "Admin"),
        ],
        ..Default::default()
    }
}

fn new_user() -> serde_json::Value {
    json!({
        "name": "Tobi",
        "email": "tobi@example.com",
        "password": "secret1",
        "role": "Admin",
        "department": "IT",
    })
}

// ---------------------------------------------------------------------------
// Test: create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gm_creates_user_and_welcome_email_is_sent() {
    let backend = FakeBackend::new(staff());
    let mailer = Arc::new(RecordingMailer::default());
    let app = common::build_test_app(backend.clone(), Some(mailer.clone()));

    let response = post_json_auth(app, "/api/v1/users", new_user(), &token_for(1, "GM")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "tobi@example.com");
    assert_eq!(json["data"]["role"], "Admin");
    assert!(json["data"].get("password").is_none());

    let created = backend.data.lock().unwrap().created_users.clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].department.as_deref(), Some("IT"));

    let sent = mailer.wait_for(1).await;
    assert_eq!(sent[0].to[0].address, "tobi@example.com");
    assert_eq!(sent[0].subject, "Welcome to the Helpdesk");
    assert!(sent[0].html.contains("http://portal.test/signin"));
}

#[tokio::test]
async fn only_gm_creates_users() {
    let backend = FakeBackend::new(staff());
    let app = common::build_test_app(backend.clone(), None);

    let response =
        post_json_auth(app, "/api/v1/users", new_user(), &token_for(2, "Manager")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn short_password_is_rejected() {
    let backend = FakeBackend::new(staff());
    let app = common::build_test_app(backend.clone(), None);
    let mut body = new_user();
    body["password"] = json!("12345");

    let response = post_json_auth(app, "/api/v1/users", body, &token_for(1, "GM")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let backend = FakeBackend::new(staff());
    let app = common::build_test_app(backend.clone(), None);
    let mut body = new_user();
    body["role"] = json!("Janitor");

    let response = post_json_auth(app, "/api/v1/users", body, &token_for(1, "GM")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(backend.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Test: list, update, password, delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_users_returns_everyone() {
    let app = common::build_test_app(FakeBackend::new(staff()), None);

    let response = get_auth(app, "/api/v1/users", &token_for(2, "Manager")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn manager_updates_user() {
    let backend = FakeBackend::new(staff());
    let app = common::build_test_app(backend.clone(), None);

    let response = put_json_auth(
        app,
        "/api/v1/users/3",
        json!({ "name": "Adebayo", "role": "Manager" }),
        &token_for(2, "Manager"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let users = backend.data.lock().unwrap().users.clone();
    assert_eq!(users[2].name, "Adebayo");
    assert_eq!(users[2].role, "Manager");
}

#[tokio::test]
async fn update_with_unknown_role_is_rejected() {
    let backend = FakeBackend::new(staff());
    let app = common::build_test_app(backend.clone(), None);

    let response = put_json_auth(
        app,
        "/api/v1/users/3",
        json!({ "role": "admin" }),
        &token_for(2, "Manager"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn password_change_is_validated() {
    let backend = FakeBackend::new(staff());

    let app = common::build_test_app(backend.clone(), None);
    let response = put_json_auth(
        app,
        "/api/v1/users/3/password",
        json!({ "password": "abc" }),
        &token_for(1, "GM"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(backend.clone(), None);
    let response = put_json_auth(
        app,
        "/api/v1/users/3/password",
        json!({ "password": "abcdef" }),
        &token_for(1, "GM"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(backend.calls(), vec!["PUT /users/3/password"]);
}

#[tokio::test]
async fn delete_user_returns_no_content() {
    let backend = FakeBackend::new(staff());
    let app = common::build_test_app(backend.clone(), None);

    let response = delete_auth(app, "/api/v1/users/3", &token_for(1, "GM")).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(backend.data.lock().unwrap().users.len(), 2);
}

#[tokio::test]
async fn cannot_delete_own_account() {
    let backend = FakeBackend::new(staff());
    let app = common::build_test_app(backend.clone(), None);

    let response = delete_auth(app, "/api/v1/users/1", &token_for(1, "GM")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "You cannot delete your own account"
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn deleting_unknown_user_is_not_found() {
    let app = common::build_test_app(FakeBackend::new(staff()), None);

    let response = delete_auth(app, "/api/v1/users/99", &token_for(1, "GM")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_cannot_delete_users() {
    let backend = FakeBackend::new(staff());
    let app = common::build_test_app(backend.clone(), None);

    let response = delete_auth(app, "/api/v1/users/2", &token_for(3, "Admin")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(backend.calls().is_empty());
}
