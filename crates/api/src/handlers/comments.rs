//! Staff comments on tickets.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use helpdesk_backend::models::NewComment;
use helpdesk_core::comment::{normalize_content, Comment, MAX_COMMENT_LENGTH};
use helpdesk_core::error::CoreError;
use helpdesk_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for adding a comment.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAdded {
    pub ticket_id: DbId,
    pub message: &'static str,
}

/// Trimmed comment body, rejecting blank and oversized input.
pub(crate) fn comment_body(content: &str) -> Result<String, CoreError> {
    let content = normalize_content(content)
        .ok_or_else(|| CoreError::Validation("Comment cannot be empty".into()))?;
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(content.to_string())
}

/// GET /api/v1/tickets/{id}/comments
pub async fn list_comments(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    let comments = state.backend.list_comments(ticket_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/tickets/{id}/comments
///
/// Staff comments are stored with `isAdmin = true`.
pub async fn add_staff_comment(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Json(input): Json<CommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentAdded>>)> {
    let content = comment_body(&input.content)?;

    state
        .backend
        .add_comment(&NewComment {
            ticket_id,
            content,
            is_admin: true,
        })
        .await?;
    tracing::info!(ticket_id, user_id = user.user_id, "Staff comment added");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CommentAdded {
                ticket_id,
                message: "Comment added",
            },
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn comment_body_is_trimmed() {
        assert_eq!(comment_body("  thanks  ").unwrap(), "thanks");
    }

    #[test]
    fn blank_comment_rejected() {
        assert_matches!(comment_body(" \n "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn oversized_comment_rejected() {
        let long = "a".repeat(MAX_COMMENT_LENGTH + 1);
        assert_matches!(comment_body(&long), Err(CoreError::Validation(_)));
    }
}
