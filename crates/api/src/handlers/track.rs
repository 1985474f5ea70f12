//! Public ticket tracking: a visitor looks up their tickets by email and
//! follows up with comments.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use futures::future::join_all;
use helpdesk_backend::models::NewComment;
use helpdesk_core::comment::Comment;
use helpdesk_core::error::CoreError;
use helpdesk_core::ticket::{map_backend_ticket, BackendTicket, Ticket};
use helpdesk_core::types::DbId;
use helpdesk_core::user::User;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::comments::{comment_body, CommentAdded};
use crate::notifications::spawn_comment_notice;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    pub email: Option<String>,
}

/// Assignee details shown to the visitor. Internal fields (role, phone)
/// are left out.
#[derive(Debug, Serialize)]
pub struct AssigneeSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

impl From<&User> for AssigneeSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrackedTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub assignee: Option<AssigneeSummary>,
    pub comments: Vec<Comment>,
}

/// Body of a visitor comment. `email` must match the ticket's email.
#[derive(Debug, Deserialize)]
pub struct VisitorCommentRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub content: String,
}

fn required_email(email: Option<&str>) -> AppResult<&str> {
    email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("Email is required.".into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/track?email=
///
/// Every ticket submitted from `email`, with its assignee and comments.
/// A failed assignee or comment lookup leaves that part empty instead of
/// failing the page.
pub async fn track_tickets(
    State(state): State<AppState>,
    Query(query): Query<TrackQuery>,
) -> AppResult<Json<DataResponse<Vec<TrackedTicket>>>> {
    let email = required_email(query.email.as_deref())?;
    let raw = state.backend.list_tickets_by_email(email).await?;

    let details = join_all(raw.iter().map(|ticket| enrich(&state, ticket))).await;

    let now = Utc::now();
    let tracked = raw
        .iter()
        .zip(details)
        .map(|(ticket, (assignee, comments))| {
            let names: HashMap<DbId, String> = assignee
                .iter()
                .map(|u| (u.id, u.name.clone()))
                .collect();
            TrackedTicket {
                ticket: map_backend_ticket(ticket, &names, now),
                assignee: assignee.as_ref().map(AssigneeSummary::from),
                comments,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(count = tracked.len(), "Tracked tickets loaded");
    Ok(Json(DataResponse { data: tracked }))
}

async fn enrich(state: &AppState, ticket: &BackendTicket) -> (Option<User>, Vec<Comment>) {
    let assignee = async {
        let id = ticket.assigned_to?;
        match state.backend.get_user(id).await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(ticket_id = ticket.id, assignee_id = id, error = %e, "Assignee lookup failed");
                None
            }
        }
    };
    let comments = async {
        state
            .backend
            .list_comments(ticket.id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(ticket_id = ticket.id, error = %e, "Comment lookup failed");
                Vec::new()
            })
    };
    futures::join!(assignee, comments)
}

/// POST /api/v1/track/{ticket_id}/comments
///
/// A visitor follow-up. The ticket must belong to the given email; the
/// assignee is notified by email.
pub async fn add_visitor_comment(
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Json(input): Json<VisitorCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentAdded>>)> {
    let email = required_email(Some(input.email.as_str()))?;
    let content = comment_body(&input.content)?;

    let ticket = state
        .backend
        .list_tickets_by_email(email)
        .await?
        .into_iter()
        .find(|t| t.id == ticket_id)
        .ok_or(CoreError::NotFound {
            entity: "Ticket",
            id: ticket_id,
        })?;

    state
        .backend
        .add_comment(&NewComment {
            ticket_id,
            content: content.clone(),
            is_admin: false,
        })
        .await?;
    tracing::info!(ticket_id, "Visitor comment added");

    let commenter = input
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| email.to_string());
    spawn_comment_notice(
        state.backend.clone(),
        state.notifier.clone(),
        ticket,
        commenter,
        content,
        state.config.ticket_view_url(),
    );

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
