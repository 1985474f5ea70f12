//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! satisfy the corresponding rule in `helpdesk_core::roles`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use helpdesk_core::error::CoreError;
use helpdesk_core::roles;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(&str) -> bool,
    message: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !allowed(&user.role) {
        tracing::debug!(user_id = user.user_id, role = %user.role, "Access denied");
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(user)
}

/// Any staff role (Superadmin, GM, Manager, Admin).
///
/// ```ignore
/// async fn staff_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, roles::is_staff, "Staff role required")
            .await
            .map(RequireStaff)
    }
}

/// GM or Manager.
pub struct RequireManagement(pub AuthUser);

impl FromRequestParts<AppState> for RequireManagement {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, roles::is_management, "GM or Manager role required")
            .await
            .map(RequireManagement)
    }
}

/// Roles allowed to assign and reassign tickets.
pub struct RequireAssigner(pub AuthUser);

impl FromRequestParts<AppState> for RequireAssigner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(
            parts,
            state,
            roles::can_assign,
            "Superadmin, GM or Manager role required",
        )
        .await
        .map(RequireAssigner)
    }
}

/// The General Manager only. Used for account creation.
pub struct RequireGm(pub AuthUser);

impl FromRequestParts<AppState> for RequireGm {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, roles::can_add_users, "GM role required")
            .await
            .map(RequireGm)
    }
}
