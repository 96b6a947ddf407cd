//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stitchdesk_core::error::CoreError;
use stitchdesk_core::roles::Role;
use stitchdesk_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated principal extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Every failure mode -- missing header, malformed `Bearer` prefix, bad
/// signature, expired token, unknown role -- collapses into the same 401
/// with no detail about which check failed.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's email address.
    pub email: String,
    /// The user's role.
    pub role: Role,
}

fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized("Authentication required".into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(unauthorized)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| unauthorized())?;

        let role: Role = claims.role.parse().map_err(|_| unauthorized())?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            role,
        })
    }
}
