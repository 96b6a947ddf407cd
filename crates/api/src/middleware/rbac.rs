//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stitchdesk_core::error::CoreError;
use stitchdesk_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `sales` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// Order sheets are authored by the sales desk; admins may act on their
/// behalf.
pub struct RequireSales(pub AuthUser);

impl FromRequestParts<AppState> for RequireSales {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin && user.role != Role::Sales {
            return Err(AppError::Core(CoreError::Forbidden(
                "Sales or Admin role required".into(),
            )));
        }
        Ok(RequireSales(user))
    }
}
