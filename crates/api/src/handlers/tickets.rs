//! Staff ticket lists and status changes.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use helpdesk_core::filter::{unique_values, FilterField, TicketFilter, TicketFilterParams};
use helpdesk_core::roles;
use helpdesk_core::ticket::{
    map_backend_tickets, validate_status, BackendTicket, Ticket, STATUS_RESOLVED,
};
use helpdesk_core::types::DbId;
use helpdesk_core::user::{name_index, User};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAssigner, RequireStaff};
use crate::notifications::spawn_resolution_notice;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// The ticket table plus the values its filter dropdowns offer.
///
/// `departments` and `statuses` are collected before filtering so the
/// dropdowns do not shrink as filters are applied.
#[derive(Debug, Serialize)]
pub struct TicketListing {
    pub tickets: Vec<Ticket>,
    pub departments: Vec<String>,
    pub statuses: Vec<String>,
    pub total: usize,
}

/// Request body for `PUT /tickets/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChanged {
    pub ticket_id: DbId,
    pub status: String,
}

fn to_view(raw: &[BackendTicket], users: &[User]) -> Vec<Ticket> {
    map_backend_tickets(raw, &name_index(users), Utc::now())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tickets/view?start_date=&end_date=&department=&status=
///
/// GM and Manager see every ticket; other staff see the tickets assigned
/// to them. Users and tickets are fetched concurrently.
pub async fn view_tickets(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<TicketFilterParams>,
) -> AppResult<Json<DataResponse<TicketListing>>> {
    let filter = TicketFilter::try_from(params)?;

    let (users, raw) = if roles::sees_all_tickets(&user.role) {
        futures::try_join!(state.backend.list_users(), state.backend.list_tickets())?
    } else {
        futures::try_join!(
            state.backend.list_users(),
            state.backend.list_tickets_assigned_to(user.user_id)
        )?
    };

    let tickets = to_view(&raw, &users);
    let departments = unique_values(&tickets, FilterField::Department);
    let statuses = unique_values(&tickets, FilterField::Status);
    let tickets = filter.apply(tickets);

    tracing::debug!(
        user_id = user.user_id,
        fetched = raw.len(),
        shown = tickets.len(),
        "Ticket view loaded",
    );

    Ok(Json(DataResponse {
        data: TicketListing {
            total: tickets.len(),
            tickets,
            departments,
            statuses,
        },
    }))
}

/// GET /api/v1/tickets/unassigned
pub async fn unassigned_tickets(
    RequireAssigner(_user): RequireAssigner,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Ticket>>>> {
    let (users, raw) = futures::try_join!(
        state.backend.list_users(),
        state.backend.list_unassigned_tickets()
    )?;
    Ok(Json(DataResponse {
        data: to_view(&raw, &users),
    }))
}

/// GET /api/v1/tickets/assigned
///
/// Tickets that already have an assignee, for the reassign screen.
pub async fn assigned_tickets(
    RequireAssigner(_user): RequireAssigner,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Ticket>>>> {
    let (users, mut raw) =
        futures::try_join!(state.backend.list_users(), state.backend.list_tickets())?;
    raw.retain(BackendTicket::is_assigned);
    Ok(Json(DataResponse {
        data: to_view(&raw, &users),
    }))
}

/// PUT /api/v1/tickets/{id}/status
///
/// Resolving a ticket emails its assignee. The email is a side effect: the
/// status change is reported as soon as the backend accepts it.
pub async fn update_status(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<StatusChanged>>> {
    validate_status(&input.status)?;

    state.backend.update_status(ticket_id, &input.status).await?;
    tracing::info!(ticket_id, user_id = user.user_id, status = %input.status, "Ticket status updated");

    if input.status == STATUS_RESOLVED {
        spawn_resolution_notice(
            state.backend.clone(),
            state.notifier.clone(),
            ticket_id,
            user.user_id,
        );
    }

    Ok(Json(DataResponse {
        data: StatusChanged {
            ticket_id,
            status: input.status,
        },
    }))
}
