//! HTTP-level integration tests for the auth endpoints.
//!
//! Cover registration, login, the register-then-login round trip, and the
//! collapse of every credential failure into the same 401.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, register_user, test_jwt_config};
use sqlx::PgPool;
use stitchdesk_api::auth::jwt::validate_token;

/// Registration returns 201 with a token and the public profile, and never
/// leaks the password hash.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "sales@acme.test",
        "password": "a-long-password",
        "name": "Dana Sales",
        "role": "sales",
        "organization": "Acme Corp",
    });
    let response = post_json(&app, "/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["email"], "sales@acme.test");
    assert_eq!(json["user"]["name"], "Dana Sales");
    assert_eq!(json["user"]["role"], "sales");
    assert_eq!(json["user"]["organization"], "Acme Corp");
    assert!(
        json["user"].get("password_hash").is_none(),
        "the password hash must never be serialized"
    );
}

/// Registering then immediately logging in succeeds, and the token's
/// decoded subject matches the created user's id.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_then_login_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_token, user_id) = register_user(&app, "roundtrip@test.com", "sales").await;

    let body = serde_json::json!({
        "email": "roundtrip@test.com",
        "password": "test_password_123!",
    });
    let response = post_json(&app, "/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user_id);

    let token = json["token"].as_str().expect("token present");
    let claims = validate_token(token, &test_jwt_config()).expect("token must validate");
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "roundtrip@test.com");
    assert_eq!(claims.role, "sales");
}

/// Duplicate email registration is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "dup@test.com", "sales").await;

    let body = serde_json::json!({
        "email": "dup@test.com",
        "password": "another-password",
        "name": "Second Account",
        "role": "production",
    });
    let response = post_json(&app, "/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].is_string(), "error body must be {{error}}");
}

/// Malformed registration input -- bad email, short password, unknown role
/// -- is a 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_validation(pool: PgPool) {
    let app = common::build_test_app(pool);

    let bad_email = serde_json::json!({
        "email": "not-an-email",
        "password": "long-enough-pw",
        "name": "X",
        "role": "sales",
    });
    let response = post_json(&app, "/auth/register", bad_email).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let short_password = serde_json::json!({
        "email": "short@test.com",
        "password": "short",
        "name": "X",
        "role": "sales",
    });
    let response = post_json(&app, "/auth/register", short_password).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_role = serde_json::json!({
        "email": "role@test.com",
        "password": "long-enough-pw",
        "name": "X",
        "role": "manager",
    });
    let response = post_json(&app, "/auth/register", bad_role).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Wrong password and unknown email both collapse into the same 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_failures_are_uniform(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "known@test.com", "sales").await;

    let wrong_password = serde_json::json!({
        "email": "known@test.com",
        "password": "incorrect",
    });
    let response = post_json(&app, "/auth/login", wrong_password).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let wrong_pw_body = body_json(response).await;

    let unknown_email = serde_json::json!({
        "email": "ghost@test.com",
        "password": "incorrect",
    });
    let response = post_json(&app, "/auth/login", unknown_email).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = body_json(response).await;

    assert_eq!(
        wrong_pw_body["error"], unknown_body["error"],
        "failure reasons must be indistinguishable"
    );
}

/// A successful login appends a notification for the user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_creates_notification(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "notify@test.com", "production").await;

    let body = serde_json::json!({
        "email": "notify@test.com",
        "password": "test_password_123!",
    });
    let response = post_json(&app, "/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"]
        .as_str()
        .expect("token present")
        .to_string();

    let response = get_auth(&app, "/notifications", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let titles: Vec<_> = list
        .as_array()
        .expect("list is an array")
        .iter()
        .map(|n| n["title"].as_str().unwrap_or_default().to_string())
        .collect();
    assert!(
        titles.contains(&"Login successful".to_string()),
        "login must append a notification, got {titles:?}"
    );
}
