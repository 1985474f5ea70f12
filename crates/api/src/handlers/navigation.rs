use axum::Json;
use helpdesk_core::navigation::{navigation_for, Navigation};

use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

/// GET /api/v1/me/navigation
///
/// Sidebar sections and dashboard quick actions for the caller's role.
pub async fn me_navigation(user: AuthUser) -> Json<DataResponse<Navigation>> {
    Json(DataResponse {
        data: navigation_for(&user.role),
    })
}
