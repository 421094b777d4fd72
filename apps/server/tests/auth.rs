mod common;

use axum::http::Method;
use common::{body_json, build_test_router, register_and_login, send_json};

#[tokio::test]
async fn register_login_and_access_protected_route() {
    let (app, _tmp) = build_test_router().await;

    // Unauthorized request fails before reaching the handler
    let response = send_json(&app, Method::GET, "/api/v1/bets", None, None).await;
    assert_eq!(response.status(), 401);

    // Auth status is public and reports that auth is required
    let response = send_json(&app, Method::GET, "/api/v1/auth/status", None, None).await;
    assert_eq!(response.status(), 200);
    let json = body_json(response).await;
    assert_eq!(json["requiresAuth"], true);

    let token = register_and_login(&app, "alice", "super-secret").await;

    let response = send_json(&app, Method::GET, "/api/v1/bets", Some(&token), None).await;
    assert_eq!(response.status(), 200);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn register_never_returns_password_material() {
    let (app, _tmp) = build_test_router().await;

    let response = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(serde_json::json!({ "username": "alice", "password": "hunter2" })),
    )
    .await;
    assert_eq!(response.status(), 200);

    let json = body_json(response).await;
    assert_eq!(json["username"], "alice");
    assert!(json.get("passwordHash").is_none());
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn duplicate_username_conflicts_and_original_still_works() {
    let (app, _tmp) = build_test_router().await;

    let token = register_and_login(&app, "alice", "first-password").await;

    let response = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(serde_json::json!({ "username": "alice", "password": "second-password" })),
    )
    .await;
    assert_eq!(response.status(), 409);

    // The original credential keeps authenticating
    let response = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({ "username": "alice", "password": "first-password" })),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = send_json(&app, Method::GET, "/api/v1/bets", Some(&token), None).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn bad_credentials_are_rejected_uniformly() {
    let (app, _tmp) = build_test_router().await;

    register_and_login(&app, "alice", "super-secret").await;

    let wrong_password = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({ "username": "alice", "password": "nope" })),
    )
    .await;
    assert_eq!(wrong_password.status(), 401);

    let unknown_user = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({ "username": "mallory", "password": "nope" })),
    )
    .await;
    assert_eq!(unknown_user.status(), 401);

    // Same user-facing message for both failure modes
    let wrong_body = body_json(wrong_password).await;
    let unknown_body = body_json(unknown_user).await;
    assert_eq!(wrong_body["message"], unknown_body["message"]);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let (app, _tmp) = build_test_router().await;

    let response = send_json(
        &app,
        Method::GET,
        "/api/v1/bets",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn healthz_is_public() {
    let (app, _tmp) = build_test_router().await;

    let response = send_json(&app, Method::GET, "/api/v1/healthz", None, None).await;
    assert_eq!(response.status(), 200);
}
