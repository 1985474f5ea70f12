//! Email relay.
//!
//! Staff screens send transactional email through this endpoint instead of
//! talking to SMTP themselves. A plain request either carries raw HTML in
//! `message` or names one of the fixed templates. With
//! `action = "resolve_ticket"` the ticket is first marked `Resolved` on the
//! backend and a `ticket_resolved` email then goes to the user named in
//! `templateData`; sender, recipients and subject are optional in that mode.

use axum::extract::State;
use axum::Json;
use helpdesk_core::ticket::STATUS_RESOLVED;
use helpdesk_mail::templates::{TicketId, TicketResolvedData};
use helpdesk_mail::{compose, Address, EmailTemplate, OutgoingEmail, SendEmailRequest};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

pub const ACTION_SEND: &str = "send";
pub const ACTION_RESOLVE_TICKET: &str = "resolve_ticket";

/// Shown as "Resolved By" when `templateData` does not name anyone.
const DEFAULT_RESOLVED_BY: &str = "Admin";

/// Body of `POST /api/emails`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRelayRequest {
    #[serde(default)]
    pub action: Option<String>,
    /// Required by `resolve_ticket`.
    #[serde(default)]
    pub ticket_id: Option<TicketId>,
    #[serde(flatten)]
    pub email: SendEmailRequest,
}

/// `templateData` of a `resolve_ticket` request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolveTicketData {
    #[serde(default)]
    ticket_id: Option<TicketId>,
    user: ResolvedUser,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    resolved_by: Option<String>,
}

/// The ticket owner. Extra user fields (`id`, `role`) are ignored.
#[derive(Debug, Deserialize)]
struct ResolvedUser {
    #[serde(default)]
    name: String,
    email: String,
}

#[derive(Debug, Serialize)]
pub struct EmailSent {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/emails
///
/// Nothing is sent and no ticket is touched unless the request is complete
/// and a mailer is configured.
pub async fn send_email(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<EmailRelayRequest>,
) -> AppResult<Json<EmailSent>> {
    let email = match input.action.as_deref().map(str::trim) {
        None | Some("") | Some(ACTION_SEND) => {
            let email = compose(&input.email)?;
            require_mailer(&state)?;
            email
        }
        Some(ACTION_RESOLVE_TICKET) => resolve_ticket(&state, &user, &input).await?,
        Some(other) => {
            return Err(AppError::BadRequest(format!("Unknown action '{other}'")));
        }
    };

    state.notifier.deliver(&email).await?;
    tracing::info!(
        user_id = user.user_id,
        to = %email.recipient_list(),
        subject = %email.subject,
        "Email relayed",
    );

    Ok(Json(EmailSent {
        success: true,
        message: "Email sent!",
    }))
}

fn require_mailer(state: &AppState) -> AppResult<()> {
    if state.notifier.is_enabled() {
        Ok(())
    } else {
        Err(AppError::ServiceUnavailable("Email is not configured".into()))
    }
}

/// Mark the ticket resolved and build the `ticket_resolved` email for its
/// owner. Any `template` or `message` on the request is ignored.
async fn resolve_ticket(
    state: &AppState,
    user: &AuthUser,
    input: &EmailRelayRequest,
) -> AppResult<OutgoingEmail> {
    let data: ResolveTicketData = input
        .email
        .template_data
        .clone()
        .ok_or_else(|| {
            AppError::BadRequest("templateData is required for resolve_ticket".into())
        })
        .and_then(|value| {
            serde_json::from_value(value).map_err(|e| {
                AppError::BadRequest(format!("Invalid templateData for resolve_ticket: {e}"))
            })
        })?;

    let ticket_id = data
        .ticket_id
        .or(input.ticket_id)
        .ok_or_else(|| AppError::BadRequest("ticketId is required for resolve_ticket".into()))?;
    if data.user.email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "templateData.user.email is required for resolve_ticket".into(),
        ));
    }
    require_mailer(state)?;

    state
        .backend
        .update_status(ticket_id.0, STATUS_RESOLVED)
        .await?;
    tracing::info!(ticket_id = ticket_id.0, user_id = user.user_id, "Ticket resolved via email relay");

    let template = EmailTemplate::TicketResolved(TicketResolvedData {
        name: data.user.name.trim().to_string(),
        title: data.title.unwrap_or_default(),
        ticket_id,
        resolved_by: data
            .resolved_by
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RESOLVED_BY.to_string()),
    });
    let from = input
        .email
        .sender
        .clone()
        .filter(|s| !s.is_blank())
        .unwrap_or_else(|| state.notifier.sender().clone());
    let to = Address::new(data.user.name, data.user.email.trim());

    Ok(OutgoingEmail::from_template(from, to, &template))
}
