mod common;

use axum::http::{Method, StatusCode};
use common::{build_test_app, send_json, send_raw, JWT_SECRET};
use ctv_admin::utils::jwt::JwtKeys;
use serde_json::json;

#[tokio::test]
async fn register_then_login_issues_token() {
    let app = build_test_app();

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/register",
        json!({ "email": "admin@ctv.test", "password": "hunter2" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/login",
        json!({ "email": "admin@ctv.test", "password": "hunter2" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");

    let token = body["token"].as_str().unwrap();
    let claims = JwtKeys::new(JWT_SECRET, 24).verify(token).unwrap();
    assert_eq!(claims.email, "admin@ctv.test");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn duplicate_registration_is_400() {
    let app = build_test_app();
    let creds = json!({ "email": "admin@ctv.test", "password": "hunter2" });
    send_json(&app.router, Method::POST, "/api/register", creds.clone()).await;

    let (status, body) = send_json(&app.router, Method::POST, "/api/register", creds).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_get_identical_responses() {
    let app = build_test_app();
    send_json(
        &app.router,
        Method::POST,
        "/api/register",
        json!({ "email": "admin@ctv.test", "password": "hunter2" }),
    )
    .await;

    let wrong_password = send_json(
        &app.router,
        Method::POST,
        "/api/login",
        json!({ "email": "admin@ctv.test", "password": "nope" }),
    )
    .await;
    let unknown_email = send_json(
        &app.router,
        Method::POST,
        "/api/login",
        json!({ "email": "ghost@ctv.test", "password": "hunter2" }),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.1["error"], "Invalid credentials");
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn blank_credentials_are_400() {
    let app = build_test_app();

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/register",
        json!({ "email": "", "password": "x" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_without_json_content_type_is_400_with_error_body() {
    let app = build_test_app();

    let (status, body) = send_raw(
        &app.router,
        Method::POST,
        "/api/login",
        None,
        r#"{"email":"a@b.c","password":"pw"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].is_string());
}
