//! Assign / reassign workflow.
//!
//! The decision endpoint looks at the ticket's current assignee and calls
//! exactly one of the backend's assign or reassign endpoints. The explicit
//! endpoints serve the Superadmin screens, which already know which of the
//! two they want.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use helpdesk_core::assignment::{validate_selection, AssignmentAction};
use helpdesk_core::error::CoreError;
use helpdesk_core::ticket::{map_backend_ticket, BackendTicket};
use helpdesk_core::types::DbId;
use helpdesk_core::user::{find_by_id, name_index, User};
use helpdesk_mail::templates::{TicketAssignedData, TicketReassignedData};
use helpdesk_mail::EmailTemplate;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAssigner;
use crate::notifications::{actor_name, user_address};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the assignment endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub user_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentOutcome {
    pub action: &'static str,
    pub ticket_id: DbId,
    pub user_id: DbId,
    pub message: String,
}

/// Everything an assignment needs, fetched in one round.
struct Selection {
    users: Vec<User>,
    ticket: BackendTicket,
    assignee: User,
}

async fn load_selection(
    state: &AppState,
    ticket_id: Option<DbId>,
    user_id: Option<DbId>,
) -> AppResult<Selection> {
    let (ticket_id, user_id) = validate_selection(ticket_id, user_id)?;

    let (users, tickets) =
        futures::try_join!(state.backend.list_users(), state.backend.list_tickets())?;

    let ticket = tickets
        .into_iter()
        .find(|t| t.id == ticket_id)
        .ok_or(CoreError::NotFound {
            entity: "Ticket",
            id: ticket_id,
        })?;
    let assignee = find_by_id(&users, user_id)
        .cloned()
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;

    Ok(Selection {
        users,
        ticket,
        assignee,
    })
}

async fn perform(
    state: &AppState,
    action: AssignmentAction,
    selection: Selection,
    actor_id: DbId,
) -> AppResult<Json<DataResponse<AssignmentOutcome>>> {
    let Selection {
        users,
        ticket,
        assignee,
    } = selection;

    tracing::info!(
        action = action.as_str(),
        path = %action.endpoint_path(ticket.id),
        body = %action.payload(assignee.id),
        actor_id,
        "Applying ticket assignment",
    );
    state
        .backend
        .apply_assignment(action, ticket.id, assignee.id)
        .await?;

    let title = ticket.display_title().to_string();
    let by = actor_name(&users, actor_id);
    let template = match action {
        AssignmentAction::Assign => EmailTemplate::TicketAssigned(TicketAssignedData {
            name: assignee.name.clone(),
            title,
            assigned_by: by,
            ticket_id: ticket.id.into(),
        }),
        AssignmentAction::Reassign => EmailTemplate::TicketReassigned(TicketReassignedData {
            name: assignee.name.clone(),
            title,
            reassigned_by: by,
            ticket_id: ticket.id.into(),
        }),
    };
    state.notifier.notify(user_address(&assignee), template);

    Ok(Json(DataResponse {
        data: AssignmentOutcome {
            action: action.as_str(),
            ticket_id: ticket.id,
            user_id: assignee.id,
            message: action.success_message(ticket.id, &assignee.name),
        },
    }))
}

/// POST /api/v1/tickets/{id}/assignment
///
/// Assign when the ticket shows as unassigned, reassign otherwise.
pub async fn assign_or_reassign(
    RequireAssigner(actor): RequireAssigner,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Json(input): Json<AssignmentRequest>,
) -> AppResult<Json<DataResponse<AssignmentOutcome>>> {
    let selection = load_selection(&state, Some(ticket_id), input.user_id).await?;

    let view = map_backend_ticket(&selection.ticket, &name_index(&selection.users), Utc::now());
    let action = AssignmentAction::decide(&view.assigned_to);

    perform(&state, action, selection, actor.user_id).await
}

/// PUT /api/v1/tickets/{id}/assign
pub async fn assign_ticket(
    RequireAssigner(actor): RequireAssigner,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Json(input): Json<AssignmentRequest>,
) -> AppResult<Json<DataResponse<AssignmentOutcome>>> {
    let selection = load_selection(&state, Some(ticket_id), input.user_id).await?;
    perform(&state, AssignmentAction::Assign, selection, actor.user_id).await
}

/// PUT /api/v1/tickets/{id}/reassign
pub async fn reassign_ticket(
    RequireAssigner(actor): RequireAssigner,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Json(input): Json<AssignmentRequest>,
) -> AppResult<Json<DataResponse<AssignmentOutcome>>> {
    let selection = load_selection(&state, Some(ticket_id), input.user_id).await?;
    perform(&state, AssignmentAction::Reassign, selection, actor.user_id).await
}
