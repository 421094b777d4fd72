use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};
use tempfile::TempDir;
use tower::ServiceExt;
use wagerbook_server::{api::app_router, build_state, config::Config};

/// Spins up a router backed by a throwaway database. The temp dir must stay
/// alive as long as the router is used.
pub async fn build_test_router() -> (Router, TempDir) {
    let tmp = tempfile::tempdir().unwrap();

    let mut secret_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut secret_bytes);

    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp
            .path()
            .join("test.db")
            .to_string_lossy()
            .into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(10),
        secret_key: BASE64.encode(secret_bytes),
        token_ttl: Duration::from_secs(3600),
    };

    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Registers a user and returns a bearer token for them.
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let response = send_json(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(response.status(), 200);

    let json = body_json(response).await;
    json["accessToken"].as_str().unwrap().to_string()
}
