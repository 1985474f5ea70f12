//! Routes open to visitors without a token.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{submission, track};
use crate::state::AppState;

/// Public routes merged into `/api/v1`.
///
/// ```text
/// GET  /form-options                   -> get_form_options
/// GET  /track?email=                   -> track_tickets
/// POST /track/{ticket_id}/comments     -> add_visitor_comment
/// ```
///
/// Ticket submission (`POST /tickets`) lives in the tickets router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/form-options", get(submission::get_form_options))
        .route("/track", get(track::track_tickets))
        .route(
            "/track/{ticket_id}/comments",
            post(track::add_visitor_comment),
        )
}
