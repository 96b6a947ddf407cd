//! Cross-cutting error-surface tests: every error body carries a single
//! `error` string, and every broken Authorization header collapses to 401.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{body_json, get, get_auth, register_user};
use sqlx::PgPool;
use tower::ServiceExt;

/// Missing token, non-Bearer scheme, and garbage tokens all produce 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_authorization_headers(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/orders").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method("GET")
        .uri("/orders")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .expect("request must build");
    let response = app.clone().oneshot(request).await.expect("request sends");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(&app, "/orders", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Error responses are a flat `{"error": "..."}` object.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_error_body_shape(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/orders").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert_eq!(
        json.as_object().expect("object").len(),
        1,
        "error bodies carry exactly one field"
    );
}

/// Resource lookups that miss return 404 with the same body shape.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_not_found_shape(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(&app, "lookup@test.com", "sales").await;

    let response = get_auth(&app, "/orders/424242", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

/// A token signed with a different secret is rejected even when otherwise
/// well formed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_foreign_signature_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_id) = register_user(&app, "victim@test.com", "sales").await;

    let foreign_config = stitchdesk_api::auth::jwt::JwtConfig {
        secret: "some-other-secret-entirely".to_string(),
        token_expiry_days: 7,
    };
    let forged = stitchdesk_api::auth::jwt::generate_token(
        user_id,
        "victim@test.com",
        "admin",
        &foreign_config,
    )
    .expect("token generation");

    let response = get_auth(&app, "/orders", &forged).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
