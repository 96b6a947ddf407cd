//! HTTP-level integration tests for the notification endpoints.
//!
//! Cover ownership scoping, the read-flag lifecycle, bulk mark-as-read
//! idempotence, and clear-all.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json_auth, put_auth, register_user,
};
use sqlx::PgPool;

/// Create a notification for the caller and return its id.
async fn create_notification(app: &axum::Router, token: &str, title: &str) -> i64 {
    let body = serde_json::json!({
        "title": title,
        "message": "something happened",
    });
    let response = post_json_auth(app, "/notifications", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().expect("id")
}

/// New notifications are unread, default to the `info` kind, and list
/// newest-first.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_and_list(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, user_id) = register_user(&app, "owner@test.com", "sales").await;

    let body = serde_json::json!({
        "title": "Fabric delayed",
        "message": "Supplier pushed the date",
        "type": "alert",
    });
    let response = post_json_auth(&app, "/notifications", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["user_id"], user_id);
    assert_eq!(created["type"], "alert");
    assert_eq!(created["is_read"], false);

    create_notification(&app, &token, "Second").await;

    let response = get_auth(&app, "/notifications", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Second", "newest first");
    assert_eq!(items[0]["type"], "info", "kind defaults to info");
}

/// An unknown notification type is a 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_kind_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(&app, "owner@test.com", "sales").await;

    let body = serde_json::json!({
        "title": "X",
        "message": "Y",
        "type": "urgent",
    });
    let response = post_json_auth(&app, "/notifications", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Marking one notification read returns the flipped flag; marking it
/// again still reports read=true.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_read(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(&app, "owner@test.com", "sales").await;
    let id = create_notification(&app, &token, "To read").await;

    let response = put_auth(&app, &format!("/notifications/{id}/read"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["read"], true);

    let response = put_auth(&app, &format!("/notifications/{id}/read"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["read"], true);
}

/// A notification owned by user A is invisible to user B: not listed, and
/// not mutable (404, never 200, never A's data).
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cross_user_isolation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token_a, _) = register_user(&app, "a@test.com", "sales").await;
    let (token_b, _) = register_user(&app, "b@test.com", "production").await;
    let id = create_notification(&app, &token_a, "Private to A").await;

    let response = get_auth(&app, "/notifications", &token_b).await;
    let list = body_json(response).await;
    assert!(
        list.as_array().expect("array").is_empty(),
        "B must not see A's notifications"
    );

    let response = put_auth(&app, &format!("/notifications/{id}/read"), &token_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A payload may redirect a notification to another user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_for_other_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token_a, _) = register_user(&app, "a@test.com", "sales").await;
    let (token_b, user_b) = register_user(&app, "b@test.com", "production").await;

    let body = serde_json::json!({
        "title": "Order assigned",
        "message": "OS-1001 is on your bench",
        "type": "message",
        "user_id": user_b,
    });
    let response = post_json_auth(&app, "/notifications", body, &token_a).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(&app, "/notifications", &token_b).await;
    let list = body_json(response).await;
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Order assigned");
}

/// mark-all-read flips everything once and is idempotent: the second call
/// reports zero.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_all_read_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(&app, "owner@test.com", "sales").await;
    create_notification(&app, &token, "One").await;
    create_notification(&app, &token, "Two").await;
    create_notification(&app, &token, "Three").await;

    let response = put_auth(&app, "/notifications/read-all", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 3);

    let response = get_auth(&app, "/notifications", &token).await;
    let list = body_json(response).await;
    assert!(
        list.as_array()
            .expect("array")
            .iter()
            .all(|n| n["is_read"] == true),
        "every notification must be read after the bulk update"
    );

    let response = put_auth(&app, "/notifications/read-all", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 0, "second call must be a no-op");
}

/// clear-all removes every record owned by the caller.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_clear_all(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(&app, "owner@test.com", "sales").await;
    create_notification(&app, &token, "One").await;
    create_notification(&app, &token, "Two").await;

    let response = delete_auth(&app, "/notifications", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);

    let response = get_auth(&app, "/notifications", &token).await;
    let list = body_json(response).await;
    assert!(list.as_array().expect("array").is_empty());
}
