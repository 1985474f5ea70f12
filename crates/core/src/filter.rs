//! Ticket list filtering.
//!
//! A ticket passes a [`TicketFilter`] iff every non-empty constraint holds:
//! its calendar date lies in `[start_date, end_date]` (inclusive), and its
//! department and status equal the selected values. Tickets whose date
//! cannot be parsed never pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::CoreError;
use crate::ticket::Ticket;

/// Raw filter values as they arrive in a query string. Blank strings mean
/// "no constraint".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilterParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

/// A validated filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub department: Option<String>,
    pub status: Option<String>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_filter_date(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, CoreError> {
    match blank_to_none(value) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                CoreError::Validation(format!("{field} must be a date in YYYY-MM-DD format"))
            }),
    }
}

impl TryFrom<TicketFilterParams> for TicketFilter {
    type Error = CoreError;

    fn try_from(params: TicketFilterParams) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: parse_filter_date("start_date", params.start_date)?,
            end_date: parse_filter_date("end_date", params.end_date)?,
            department: blank_to_none(params.department),
            status: blank_to_none(params.status),
        })
    }
}

impl TicketFilter {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.department.is_none()
            && self.status.is_none()
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        let Some(date) = parse_ticket_date(&ticket.date) else {
            return false;
        };
        if self.start_date.is_some_and(|start| date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| date > end) {
            return false;
        }
        if self
            .department
            .as_deref()
            .is_some_and(|d| ticket.department != d)
        {
            return false;
        }
        if self.status.as_deref().is_some_and(|s| ticket.status != s) {
            return false;
        }
        true
    }

    /// Keep the tickets that match, preserving order.
    pub fn apply(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        tickets.into_iter().filter(|t| self.matches(t)).collect()
    }
}

/// Reduce a backend timestamp to its UTC calendar date.
///
/// Accepts RFC 3339 (offsets are normalised to UTC), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS` (both with optional fractional seconds, read as
/// UTC) and bare `YYYY-MM-DD`.
pub fn parse_ticket_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Which ticket field to collect for a filter dropdown.
#[derive(Debug, Clone, Copy)]
pub enum FilterField {
    Department,
    Status,
}

/// Distinct values of `field` in first-seen order.
pub fn unique_values(tickets: &[Ticket], field: FilterField) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in tickets {
        let value = match field {
            FilterField::Department => &t.department,
            FilterField::Status => &t.status,
        };
        if !out.iter().any(|v| v == value) {
            out.push(value.clone());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn ticket(id: i64, department: &str, status: &str, date: &str) -> Ticket {
        Ticket {
            id,
            title: format!("Ticket {id}"),
            details: String::new(),
            date: date.to_string(),
            assigned_to: "Unassigned".into(),
            assignee_id: None,
            status: status.into(),
            category: "General".into(),
            sub_category: "General".into(),
            other_sub_category: None,
            created_by: "System".into(),
            department: department.into(),
            image: None,
            images: vec![],
            email: "System".into(),
        }
    }

    fn filter(params: TicketFilterParams) -> TicketFilter {
        TicketFilter::try_from(params).unwrap()
    }

    #[test]
    fn department_only_filter_keeps_matching_department() {
        let tickets = vec![
            ticket(1, "IT", "Open", "2024-03-01T09:00:00Z"),
            ticket(2, "HR", "Open", "2024-03-01T09:00:00Z"),
        ];
        let f = filter(TicketFilterParams {
            department: Some("IT".into()),
            status: Some(String::new()),
            ..Default::default()
        });

        let out = f.apply(tickets);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn empty_filter_passes_every_parsable_ticket() {
        let f = TicketFilter::default();
        assert!(f.is_empty());
        assert!(f.matches(&ticket(1, "IT", "Open", "2024-03-01")));
        assert!(f.matches(&ticket(2, "HR", "Closed", "2023-12-31 23:59:59")));
    }

    #[test]
    fn unparsable_date_never_passes() {
        let f = TicketFilter::default();
        assert!(!f.matches(&ticket(1, "IT", "Open", "not a date")));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let f = filter(TicketFilterParams {
            start_date: Some("2024-03-01".into()),
            end_date: Some("2024-03-31".into()),
            ..Default::default()
        });
        assert!(f.matches(&ticket(1, "IT", "Open", "2024-03-01T00:00:00Z")));
        assert!(f.matches(&ticket(2, "IT", "Open", "2024-03-31T23:59:59Z")));
        assert!(!f.matches(&ticket(3, "IT", "Open", "2024-02-29T23:59:59Z")));
        assert!(!f.matches(&ticket(4, "IT", "Open", "2024-04-01T00:00:00Z")));
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        // 00:30 at +01:00 is still the previous day in UTC.
        assert_eq!(
            parse_ticket_date("2024-03-01T00:30:00+01:00"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn constraints_are_conjunctive() {
        let f = filter(TicketFilterParams {
            department: Some("IT".into()),
            status: Some("Resolved".into()),
            ..Default::default()
        });
        assert!(f.matches(&ticket(1, "IT", "Resolved", "2024-01-01")));
        assert!(!f.matches(&ticket(2, "IT", "Open", "2024-01-01")));
        assert!(!f.matches(&ticket(3, "HR", "Resolved", "2024-01-01")));
    }

    #[test]
    fn malformed_filter_date_is_rejected() {
        let result = TicketFilter::try_from(TicketFilterParams {
            start_date: Some("03/01/2024".into()),
            ..Default::default()
        });
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn unique_values_preserve_first_seen_order() {
        let tickets = vec![
            ticket(1, "IT", "Open", "2024-01-01"),
            ticket(2, "HR", "Resolved", "2024-01-01"),
            ticket(3, "IT", "Open", "2024-01-01"),
        ];
        assert_eq!(unique_values(&tickets, FilterField::Department), vec!["IT", "HR"]);
        assert_eq!(unique_values(&tickets, FilterField::Status), vec!["Open", "Resolved"]);
    }
}
