//! Request and response bodies specific to the backend wire format.
//!
//! Entity shapes shared with the rest of the portal (tickets, users,
//! comments, metrics) live in `helpdesk_core`, and so do the assign and
//! reassign bodies ([`helpdesk_core::assignment::AssignmentAction::payload`]).

use helpdesk_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Body of `PUT /tickets/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub status: String,
}

/// Body of `POST /comments`. `is_admin` is true for staff comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub ticket_id: DbId,
    pub content: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `PUT /users/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `PUT /users/{id}/password`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePassword {
    pub password: String,
}

/// Response of `POST /tickets`. Older backends only echo a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatedTicket {
    #[serde(default, alias = "ticketId")]
    pub id: Option<DbId>,
    #[serde(default)]
    pub message: Option<String>,
}
