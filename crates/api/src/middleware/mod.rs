//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireSales`] -- Requires `sales` or `admin` role.

pub mod auth;
pub mod rbac;
