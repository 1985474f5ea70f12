//! Ticket shapes and the backend-to-view mapping.
//!
//! The backend serves tickets as loosely populated rows ([`BackendTicket`]);
//! the portal works with a fully populated view shape ([`Ticket`]) where
//! every missing field has been replaced by a display default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_OPEN: &str = "Open";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_RESOLVED: &str = "Resolved";
pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_UNRESOLVED: &str = "Unresolved";
pub const STATUS_CLOSED: &str = "Closed";

/// Every status string the backend is known to store.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_OPEN,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_PENDING,
    STATUS_UNRESOLVED,
    STATUS_CLOSED,
];

/// Statuses staff can pick from on the ticket view screen.
pub const SELECTABLE_STATUSES: &[&str] = &[STATUS_OPEN, STATUS_IN_PROGRESS, STATUS_RESOLVED];

/// Assignee label used when a ticket has no (known) assignee.
pub const UNASSIGNED: &str = "Unassigned";

// ---------------------------------------------------------------------------
// Display defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_TITLE: &str = "Untitled Ticket";
pub const DEFAULT_DETAILS: &str = "No details provided";
pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_DEPARTMENT: &str = "General";
pub const DEFAULT_ACTOR: &str = "System";

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid ticket status '{}'. Must be one of: {:?}",
            status, VALID_STATUSES
        )))
    }
}

// ---------------------------------------------------------------------------
// Backend shape
// ---------------------------------------------------------------------------

/// A ticket row as returned by the backend. Only `id` is guaranteed.
///
/// Older rows carry the title in `name`; newer ones send `title` and use
/// `name` for the submitter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendTicket {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<DbId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "description")]
    pub details: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "subCategory")]
    pub sub_category: Option<String>,
    #[serde(default, rename = "otherSubCategory")]
    pub other_sub_category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl BackendTicket {
    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }

    /// `title`, else the legacy `name`, else [`DEFAULT_TITLE`].
    pub fn display_title(&self) -> &str {
        non_blank(&self.title)
            .or_else(|| non_blank(&self.name))
            .unwrap_or(DEFAULT_TITLE)
    }
}

// ---------------------------------------------------------------------------
// View shape
// ---------------------------------------------------------------------------

/// A ticket in the shape the portal screens consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: DbId,
    pub title: String,
    pub details: String,
    pub date: String,
    pub assigned_to: String,
    pub assignee_id: Option<DbId>,
    pub status: String,
    pub category: String,
    pub sub_category: String,
    pub other_sub_category: Option<String>,
    pub created_by: String,
    pub department: String,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub email: String,
}

impl Ticket {
    pub fn is_unassigned(&self) -> bool {
        self.assigned_to == UNASSIGNED
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Map a backend row to the view shape, filling display defaults.
///
/// `user_names` resolves `assigned_to` ids; an id with no matching user is
/// shown as [`UNASSIGNED`]. `now` stands in for a missing `created_at`.
pub fn map_backend_ticket(
    raw: &BackendTicket,
    user_names: &HashMap<DbId, String>,
    now: Timestamp,
) -> Ticket {
    let department = non_blank(&raw.department)
        .unwrap_or(DEFAULT_DEPARTMENT)
        .to_string();

    let assigned_to = raw
        .assigned_to
        .and_then(|id| user_names.get(&id).cloned())
        .unwrap_or_else(|| UNASSIGNED.to_string());

    Ticket {
        id: raw.id,
        title: raw.display_title().to_string(),
        details: non_blank(&raw.details)
            .unwrap_or(DEFAULT_DETAILS)
            .to_string(),
        date: non_blank(&raw.created_at)
            .map(str::to_string)
            .unwrap_or_else(|| now.to_rfc3339()),
        assigned_to,
        assignee_id: raw.assigned_to,
        status: non_blank(&raw.status).unwrap_or(STATUS_PENDING).to_string(),
        category: non_blank(&raw.category)
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string(),
        sub_category: non_blank(&raw.sub_category)
            .unwrap_or(department.as_str())
            .to_string(),
        other_sub_category: non_blank(&raw.other_sub_category).map(str::to_string),
        created_by: non_blank(&raw.created_by)
            .unwrap_or(DEFAULT_ACTOR)
            .to_string(),
        email: non_blank(&raw.email).unwrap_or(DEFAULT_ACTOR).to_string(),
        image: raw.image.clone(),
        images: raw.image.iter().cloned().collect(),
        department,
    }
}

/// Map a batch of backend rows, preserving order.
pub fn map_backend_tickets(
    raw: &[BackendTicket],
    user_names: &HashMap<DbId, String>,
    now: Timestamp,
) -> Vec<Ticket> {
    raw.iter()
        .map(|t| map_backend_ticket(t, user_names, now))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
