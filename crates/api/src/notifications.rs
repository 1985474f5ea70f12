//! Email side effects of portal actions.
//!
//! Notifications never block or roll back the action that caused them:
//! they run on detached tasks and failures are only logged.

use std::sync::Arc;

use helpdesk_backend::HelpdeskBackend;
use helpdesk_core::error::CoreError;
use helpdesk_core::ticket::{BackendTicket, DEFAULT_ACTOR};
use helpdesk_core::types::DbId;
use helpdesk_core::user::{find_by_id, User};
use helpdesk_mail::templates::{TicketCommentData, TicketResolvedData};
use helpdesk_mail::{Address, EmailTemplate, Mailer, OutgoingEmail};
use tokio::task::JoinHandle;

use crate::error::{AppError, AppResult};

const DEFAULT_FROM_NAME: &str = "Helpdesk System";
const DEFAULT_FROM_ADDRESS: &str = "noreply@helpdesk.local";

/// Handle to the configured [`Mailer`], if any.
#[derive(Clone)]
pub struct Notifier {
    mailer: Option<Arc<dyn Mailer>>,
    from: Address,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, from: Address) -> Self {
        Self {
            mailer: Some(mailer),
            from,
        }
    }

    /// A notifier that drops every email.
    pub fn disabled() -> Self {
        Self {
            mailer: None,
            from: Address::new(DEFAULT_FROM_NAME, DEFAULT_FROM_ADDRESS),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    /// Sender used for portal-originated notifications.
    pub fn sender(&self) -> &Address {
        &self.from
    }

    /// Deliver `email` and wait for the result.
    pub async fn deliver(&self, email: &OutgoingEmail) -> AppResult<()> {
        let mailer = self
            .mailer
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable("Email is not configured".into()))?;
        mailer.send(email).await?;
        Ok(())
    }

    /// Render `template` for `to` and send it on a detached task.
    ///
    /// Returns `None` when email is disabled.
    pub fn notify(&self, to: Address, template: EmailTemplate) -> Option<JoinHandle<()>> {
        let template_name = template.name();
        let Some(mailer) = self.mailer.clone() else {
            tracing::debug!(template = template_name, "Email disabled, notification skipped");
            return None;
        };

        let email = OutgoingEmail::from_template(self.from.clone(), to, &template);
        Some(tokio::spawn(async move {
            match mailer.send(&email).await {
                Ok(()) => tracing::info!(
                    template = template_name,
                    to = %email.recipient_list(),
                    "Notification sent"
                ),
                Err(e) => tracing::warn!(
                    template = template_name,
                    to = %email.recipient_list(),
                    error = %e,
                    "Notification failed"
                ),
            }
        }))
    }
}

/// Display name of the acting staff member.
pub fn actor_name(users: &[User], actor_id: DbId) -> String {
    find_by_id(users, actor_id)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| DEFAULT_ACTOR.to_string())
}

pub fn user_address(user: &User) -> Address {
    Address::new(user.name.clone(), user.email.clone())
}

/// Tell the assignee of `ticket_id` that it was resolved by `actor_id`.
///
/// Looks up the ticket and users itself so the status change can answer
/// immediately.
pub fn spawn_resolution_notice(
    backend: Arc<dyn HelpdeskBackend>,
    notifier: Notifier,
    ticket_id: DbId,
    actor_id: DbId,
) -> Option<JoinHandle<()>> {
    if !notifier.is_enabled() {
        return None;
    }
    Some(tokio::spawn(async move {
        if let Err(e) = resolution_notice(backend.as_ref(), &notifier, ticket_id, actor_id).await {
            tracing::warn!(ticket_id, error = %e, "Resolution notice failed");
        }
    }))
}

async fn resolution_notice(
    backend: &dyn HelpdeskBackend,
    notifier: &Notifier,
    ticket_id: DbId,
    actor_id: DbId,
) -> AppResult<()> {
    let (tickets, users) = futures::try_join!(backend.list_tickets(), backend.list_users())?;
    let ticket = tickets
        .iter()
        .find(|t| t.id == ticket_id)
        .ok_or(CoreError::NotFound {
            entity: "Ticket",
            id: ticket_id,
        })?;

    let Some(assignee) = ticket.assigned_to.and_then(|id| find_by_id(&users, id)) else {
        tracing::debug!(ticket_id, "Resolved ticket has no known assignee, no notice sent");
        return Ok(());
    };

    let template = EmailTemplate::TicketResolved(TicketResolvedData {
        name: assignee.name.clone(),
        title: ticket.display_title().to_string(),
        ticket_id: ticket_id.into(),
        resolved_by: actor_name(&users, actor_id),
    });
    let email = OutgoingEmail::from_template(
        notifier.sender().clone(),
        user_address(assignee),
        &template,
    );
    notifier.deliver(&email).await
}

/// Tell the assignee of `ticket` that a visitor commented on it.
pub fn spawn_comment_notice(
    backend: Arc<dyn HelpdeskBackend>,
    notifier: Notifier,
    ticket: BackendTicket,
    commenter_name: String,
    comment: String,
    ticket_link: String,
) -> Option<JoinHandle<()>> {
    let assignee_id = ticket.assigned_to?;
    if !notifier.is_enabled() {
        return None;
    }
    Some(tokio::spawn(async move {
        let assignee = match backend.get_user(assignee_id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(ticket_id = ticket.id, assignee_id, error = %e, "Comment notice skipped");
                return;
            }
        };
        let template = EmailTemplate::TicketComment(TicketCommentData {
            assignee_name: assignee.name.clone(),
            commenter_name,
            ticket_title: ticket.display_title().to_string(),
            comment,
            ticket_link,
        });
        let email =
            OutgoingEmail::from_template(notifier.sender().clone(), user_address(&assignee), &template);
        if let Err(e) = notifier.deliver(&email).await {
            tracing::warn!(ticket_id = ticket.id, error = %e, "Comment notice failed");
        }
    }))
}
