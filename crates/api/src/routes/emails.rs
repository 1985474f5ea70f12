use axum::routing::post;
use axum::Router;

use crate::handlers::emails;
use crate::state::AppState;

/// Email relay, mounted at the root next to `/health` because browser
/// clients already post to `/api/emails`.
///
/// ```text
/// POST /api/emails     -> send_email
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/api/emails", post(emails::send_email))
}
