//! Notification entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stitchdesk_core::types::{DbId, Timestamp};

/// Well-known notification kinds. Must match the CHECK constraint on
/// `notifications.kind`.
pub const KIND_INFO: &str = "info";
pub const KIND_SUCCESS: &str = "success";
pub const KIND_ALERT: &str = "alert";
pub const KIND_MESSAGE: &str = "message";

/// All valid notification kinds.
pub const ALL_KINDS: [&str; 4] = [KIND_INFO, KIND_SUCCESS, KIND_ALERT, KIND_MESSAGE];

/// A row from the `notifications` table. Serialized with the kind under a
/// `type` key, which is the wire name clients expect.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// Request body for `POST /notifications`.
///
/// `user_id` defaults to the caller; a payload may redirect the
/// notification to another user (system-originated events).
#[derive(Debug, Deserialize)]
pub struct CreateNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub user_id: Option<DbId>,
}
