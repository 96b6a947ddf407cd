//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! on top of a `#[sqlx::test]`-provided pool and sends requests to it via
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use stitchdesk_api::auth::jwt::JwtConfig;
use stitchdesk_api::config::ServerConfig;
use stitchdesk_api::router::build_app_router;
use stitchdesk_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// The JWT config used by the test app; tests that decode tokens must use
/// the same secret.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-long-enough-for-hmac".to_string(),
        token_expiry_days: 7,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

fn json_request(
    method: &str,
    path: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).expect("request must build")
}

pub async fn get(app: &Router, path: &str) -> Response<Body> {
    send(app, json_request("GET", path, None, None)).await
}

pub async fn get_auth(app: &Router, path: &str, token: &str) -> Response<Body> {
    send(app, json_request("GET", path, None, Some(token))).await
}

pub async fn post_json(app: &Router, path: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", path, Some(body), None)).await
}

pub async fn post_json_auth(
    app: &Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("POST", path, Some(body), Some(token))).await
}

pub async fn put_json_auth(
    app: &Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("PUT", path, Some(body), Some(token))).await
}

pub async fn put_auth(app: &Router, path: &str, token: &str) -> Response<Body> {
    send(app, json_request("PUT", path, None, Some(token))).await
}

pub async fn delete_auth(app: &Router, path: &str, token: &str) -> Response<Body> {
    send(app, json_request("DELETE", path, None, Some(token))).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register a user through the API and return `(token, user_id)`.
pub async fn register_user(app: &Router, email: &str, role: &str) -> (String, i64) {
    let body = serde_json::json!({
        "email": email,
        "password": "test_password_123!",
        "name": format!("Test {role}"),
        "role": role,
    });
    let response = post_json(app, "/auth/register", body).await;
    assert_eq!(
        response.status(),
        StatusCode::CREATED,
        "registration should succeed"
    );
    let json = body_json(response).await;
    let token = json["token"].as_str().expect("token present").to_string();
    let user_id = json["user"]["id"].as_i64().expect("user id present");
    (token, user_id)
}

/// A minimal valid order-creation payload with the given order number.
pub fn order_draft(order_number: &str) -> serde_json::Value {
    serde_json::json!({
        "order_number": order_number,
        "client_name": "Acme Corp",
        "product_name": "Crew polo",
        "sizes": [
            { "size": "M", "quantity": 3 },
            { "size": "L", "quantity": 2 },
        ],
    })
}
