use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A comment on a ticket. `is_admin` marks comments written by staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: DbId,
    pub ticket_id: DbId,
    pub content: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub created_at: String,
}

/// Maximum comment body length accepted from visitors and staff.
pub const MAX_COMMENT_LENGTH: usize = 5_000;

/// Trim and check a comment body. Returns `None` for blank input.
pub fn normalize_content(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
