//! Assign / reassign decision.
//!
//! A ticket whose current assignee is [`UNASSIGNED`] goes through the
//! backend's assign endpoint; any other ticket goes through reassign. The
//! two calls differ only in path and payload field name.

use serde_json::json;

use crate::error::CoreError;
use crate::ticket::UNASSIGNED;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentAction {
    Assign,
    Reassign,
}

impl AssignmentAction {
    /// Pick the action for a ticket given its current assignee label.
    pub fn decide(current_assignee: &str) -> Self {
        if current_assignee == UNASSIGNED {
            Self::Assign
        } else {
            Self::Reassign
        }
    }

    /// Backend path for this action, relative to the API base. The last
    /// segment is [`as_str`](Self::as_str).
    pub fn endpoint_path(self, ticket_id: DbId) -> String {
        format!("/tickets/{ticket_id}/{}", self.as_str())
    }

    /// Name of the user-id field in the request body.
    pub fn payload_field(self) -> &'static str {
        match self {
            Self::Assign => "assigned_to",
            Self::Reassign => "new_assigned_to",
        }
    }

    pub fn payload(self, user_id: DbId) -> serde_json::Value {
        json!({ (self.payload_field()): user_id })
    }

    pub fn success_message(self, ticket_id: DbId, assignee_name: &str) -> String {
        match self {
            Self::Assign => format!("Ticket {ticket_id} assigned to {assignee_name}."),
            Self::Reassign => format!("Ticket {ticket_id} reassigned to {assignee_name}."),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Reassign => "reassign",
        }
    }
}

/// Both a ticket and a user must be chosen before anything is sent.
pub fn validate_selection(
    ticket_id: Option<DbId>,
    user_id: Option<DbId>,
) -> Result<(DbId, DbId), CoreError> {
    match (ticket_id, user_id) {
        (Some(t), Some(u)) if t > 0 && u > 0 => Ok((t, u)),
        _ => Err(CoreError::Validation(
            "Please select both a ticket and a user.".into(),
        )),
    }
}
