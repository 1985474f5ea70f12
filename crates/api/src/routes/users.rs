use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User management routes mounted at `/users`.
///
/// ```text
/// GET    /                  -> list_users
/// POST   /                  -> create_user
/// PUT    /{id}              -> update_user
/// DELETE /{id}              -> delete_user
/// PUT    /{id}/password     -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", put(users::update_user).delete(users::delete_user))
        .route("/{id}/password", put(users::change_password))
}
