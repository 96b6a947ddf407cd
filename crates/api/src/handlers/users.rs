//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::Json;
use stitchdesk_core::error::CoreError;
use stitchdesk_core::roles::Role;
use stitchdesk_core::types::DbId;
use stitchdesk_db::models::user::{PublicUser, UpdateUserProfile};
use stitchdesk_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /users/me
///
/// The authenticated caller's own profile.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<PublicUser>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(user.into()))
}

/// GET /users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PublicUser>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// PUT /users/{id}
///
/// Update a profile: one's own, or anyone's as an admin. Only the display
/// name and organization are mutable.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<Json<PublicUser>> {
    if auth.user_id != id && auth.role != Role::Admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only edit your own profile".into(),
        )));
    }

    let user = UserRepo::update_profile(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = auth.user_id, target = id, "Profile updated");

    Ok(Json(user.into()))
}
