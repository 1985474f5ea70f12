use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{assignment, comments, submission, tickets};
use crate::state::AppState;

/// Ticket routes mounted at `/tickets`.
///
/// ```text
/// POST /                      -> submit_ticket (public)
/// GET  /view                  -> view_tickets
/// GET  /unassigned            -> unassigned_tickets
/// GET  /assigned              -> assigned_tickets
/// PUT  /{id}/status           -> update_status
/// GET  /{id}/comments         -> list_comments
/// POST /{id}/comments         -> add_staff_comment
/// POST /{id}/assignment       -> assign_or_reassign
/// PUT  /{id}/assign           -> assign_ticket
/// PUT  /{id}/reassign         -> reassign_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submission::submit_ticket))
        .route("/view", get(tickets::view_tickets))
        .route("/unassigned", get(tickets::unassigned_tickets))
        .route("/assigned", get(tickets::assigned_tickets))
        .route("/{id}/status", put(tickets::update_status))
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::add_staff_comment),
        )
        .route("/{id}/assignment", post(assignment::assign_or_reassign))
        .route("/{id}/assign", put(assignment::assign_ticket))
        .route("/{id}/reassign", put(assignment::reassign_ticket))
}
