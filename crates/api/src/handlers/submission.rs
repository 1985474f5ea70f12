//! Public ticket submission.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use helpdesk_backend::models::CreatedTicket;
use helpdesk_core::form_options::{form_options, FormOptions};
use helpdesk_core::submission::NewTicketSubmission;
use helpdesk_mail::templates::TicketSubmissionData;
use helpdesk_mail::{Address, EmailTemplate};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

const HELPDESK_ADMIN_NAME: &str = "Helpdesk Admin";

/// GET /api/v1/form-options
pub async fn get_form_options() -> Json<DataResponse<FormOptions>> {
    Json(DataResponse {
        data: form_options(),
    })
}

/// POST /api/v1/tickets
///
/// Validate the visitor's form, create the ticket on the backend and let
/// the helpdesk admin know about it.
pub async fn submit_ticket(
    State(state): State<AppState>,
    Json(input): Json<NewTicketSubmission>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedTicket>>)> {
    input.check()?;

    let created = state.backend.create_ticket(&input).await?;
    tracing::info!(
        ticket_id = ?created.id,
        department = %input.department,
        category = %input.category,
        "Ticket submitted",
    );

    if let Some(admin_email) = state.config.helpdesk_admin_email.as_deref() {
        match created.id {
            Some(ticket_id) => {
                state.notifier.notify(
                    Address::new(HELPDESK_ADMIN_NAME, admin_email),
                    EmailTemplate::TicketSubmission(TicketSubmissionData {
                        name: input.name.clone(),
                        title: input.title.clone(),
                        details: input.details.clone(),
                        ticket_id: ticket_id.into(),
                    }),
                );
            }
            None => tracing::warn!("Backend returned no ticket id, submission email skipped"),
        }
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}
