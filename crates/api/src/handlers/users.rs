//! Handlers for staff account management.
//!
//! Listing is open to every role that assigns tickets (the assign screens
//! need the user dropdown). Creating accounts is reserved for the GM;
//! editing and deleting for GM and Manager.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use helpdesk_backend::models::{NewUser, UpdatePassword, UpdateUser};
use helpdesk_core::error::CoreError;
use helpdesk_core::roles::VALID_ROLES;
use helpdesk_core::types::DbId;
use helpdesk_core::user::User;
use helpdesk_mail::templates::WelcomeData;
use helpdesk_mail::{Address, EmailTemplate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAssigner, RequireGm, RequireManagement};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request body for `PUT /users/{id}/password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserCreated {
    pub name: String,
    pub email: String,
    pub role: String,
    pub message: &'static str,
}

fn check_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {VALID_ROLES:?}"
        )))
    }
}

fn validation_error(e: validator::ValidationErrors) -> CoreError {
    CoreError::Validation(e.to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
pub async fn list_users(
    RequireAssigner(_user): RequireAssigner,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = state.backend.list_users().await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/users
///
/// Create an account and send the new user a welcome email with the
/// sign-in link.
pub async fn create_user(
    RequireGm(admin): RequireGm,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserCreated>>)> {
    input.validate().map_err(validation_error)?;
    check_role(&input.role)?;

    let new_user = NewUser {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_string(),
        password: input.password,
        role: input.role,
        department: input.department.filter(|d| !d.trim().is_empty()),
        phone: input.phone.filter(|p| !p.trim().is_empty()),
    };
    state.backend.create_user(&new_user).await?;
    tracing::info!(created_by = admin.user_id, email = %new_user.email, role = %new_user.role, "User created");

    state.notifier.notify(
        Address::new(new_user.name.clone(), new_user.email.clone()),
        EmailTemplate::Welcome(WelcomeData {
            name: new_user.name.clone(),
            login_url: Some(state.config.login_url()),
        }),
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserCreated {
                name: new_user.name,
                email: new_user.email,
                role: new_user.role,
                message: "User created successfully",
            },
        }),
    ))
}

/// PUT /api/v1/users/{id}
///
/// Absent fields are left unchanged.
pub async fn update_user(
    RequireManagement(admin): RequireManagement,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<StatusCode> {
    if let Some(role) = input.role.as_deref() {
        check_role(role)?;
    }
    state.backend.update_user(id, &input).await?;
    tracing::info!(user_id = id, updated_by = admin.user_id, "User updated");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/users/{id}/password
pub async fn change_password(
    RequireManagement(admin): RequireManagement,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    input.validate().map_err(validation_error)?;
    state
        .backend
        .update_password(
            id,
            &UpdatePassword {
                password: input.password,
            },
        )
        .await?;
    tracing::info!(user_id = id, updated_by = admin.user_id, "User password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    RequireManagement(admin): RequireManagement,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(CoreError::Validation("You cannot delete your own account".into()).into());
    }
    state.backend.delete_user(id).await?;
    tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn known_roles_accepted() {
        for role in VALID_ROLES {
            assert!(check_role(role).is_ok());
        }
    }

    #[test]
    fn role_check_is_case_sensitive() {
        assert_matches!(check_role("gm"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn short_password_fails_validation() {
        let req = ChangePasswordRequest {
            password: "12345".into(),
        };
        assert!(req.validate().is_err());
    }
}
