pub mod auth;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 create account (public)
/// /auth/login                    authenticate (public)
///
/// /orders                        list, create sheet
/// /orders/{id}                   get, update, delete
///
/// /users/me                      current profile
/// /users/{id}                    get, update
///
/// /notifications                 list own, create, clear all
/// /notifications/{id}/read       mark one read
/// /notifications/read-all        mark all read
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/orders", orders::router())
        .nest("/users", users::router())
        .nest("/notifications", notifications::router())
}
