//! Route definitions for the `/notifications` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /          -> list own
/// POST   /          -> create
/// DELETE /          -> clear all
/// PUT    /{id}/read -> mark one read
/// PUT    /read-all  -> mark all read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notifications::list_notifications)
                .post(notifications::create_notification)
                .delete(notifications::clear_all),
        )
        .route("/{id}/read", put(notifications::mark_read))
        .route("/read-all", put(notifications::mark_all_read))
}
