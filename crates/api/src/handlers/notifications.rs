//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and operate only
//! on the caller's own records; ownership is enforced server-side, never
//! trusted from client-supplied ids.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use stitchdesk_core::error::CoreError;
use stitchdesk_core::types::DbId;
use stitchdesk_db::models::notification::{CreateNotification, Notification, ALL_KINDS, KIND_INFO};
use stitchdesk_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /notifications
///
/// List the caller's notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(notifications))
}

/// POST /notifications
///
/// Append a notification. The owner defaults to the caller; a `user_id` in
/// the payload redirects it (system-originated events). New notifications
/// are always unread.
pub async fn create_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    let kind = input.kind.as_deref().unwrap_or(KIND_INFO);
    if !ALL_KINDS.contains(&kind) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown notification type: {kind}"
        ))));
    }

    let owner = input.user_id.unwrap_or(auth.user_id);
    let notification =
        NotificationRepo::create(&state.pool, owner, &input.title, &input.message, kind).await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

/// PUT /notifications/{id}/read
///
/// Mark one notification as read. The ownership check is part of the
/// update predicate; a foreign or unknown id is a plain 404 that leaks
/// nothing about other users' records.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let notification = NotificationRepo::mark_read(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;

    Ok(Json(json!({
        "id": notification.id,
        "read": notification.is_read,
    })))
}

/// PUT /notifications/read-all
///
/// Flip every unread notification owned by the caller in one set-scoped
/// update. Idempotent: a second call reports a count of 0.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;

    Ok(Json(json!({
        "message": "All notifications marked as read",
        "count": count,
    })))
}

/// DELETE /notifications
///
/// Clear all of the caller's notifications.
pub async fn clear_all(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::clear_all(&state.pool, auth.user_id).await?;

    Ok(Json(json!({
        "message": "Notifications cleared",
        "count": count,
    })))
}
