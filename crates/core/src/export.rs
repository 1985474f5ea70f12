//! Spreadsheet export of the full ticket list.

use std::collections::HashMap;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::CoreError;
use crate::ticket::{BackendTicket, UNASSIGNED};
use crate::types::DbId;

pub const EXPORT_FILE_NAME: &str = "all_tickets.xlsx";

pub const EXPORT_COLUMNS: [&str; 14] = [
    "ID",
    "Name",
    "Email",
    "Assigned To",
    "Phone",
    "Location",
    "Department",
    "Status",
    "Category",
    "SubCategory",
    "Other SubCategory",
    "Title",
    "Details",
    "Created At",
];

impl From<XlsxError> for CoreError {
    fn from(e: XlsxError) -> Self {
        CoreError::Internal(format!("xlsx export failed: {e}"))
    }
}

fn assignee_label(ticket: &BackendTicket, names: &HashMap<DbId, String>) -> String {
    match ticket.assigned_to {
        None => UNASSIGNED.to_string(),
        Some(id) => names.get(&id).cloned().unwrap_or_else(|| id.to_string()),
    }
}

/// Text cells for one row, in [`EXPORT_COLUMNS`] order after the id.
fn row_cells(ticket: &BackendTicket, names: &HashMap<DbId, String>) -> [String; 13] {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        text(&ticket.name),
        text(&ticket.email),
        assignee_label(ticket, names),
        text(&ticket.phone),
        text(&ticket.location),
        text(&ticket.department),
        text(&ticket.status),
        text(&ticket.category),
        text(&ticket.sub_category),
        text(&ticket.other_sub_category),
        text(&ticket.title),
        text(&ticket.details),
        text(&ticket.created_at),
    ]
}

/// Write every ticket to a single-sheet workbook and return the file bytes.
/// Images are never exported.
pub fn tickets_to_xlsx(
    tickets: &[BackendTicket],
    names: &HashMap<DbId, String>,
) -> Result<Vec<u8>, CoreError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Tickets")?;

    for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (i, ticket) in tickets.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_number(row, 0, ticket.id as f64)?;
        for (offset, cell) in row_cells(ticket, names).iter().enumerate() {
            worksheet.write_string(row, offset as u16 + 1, cell)?;
        }
    }

    worksheet.set_freeze_panes(1, 0)?;

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_assignee_is_unassigned() {
        let t = BackendTicket {
            id: 1,
            ..Default::default()
        };
        assert_eq!(assignee_label(&t, &HashMap::new()), "Unassigned");
    }

    #[test]
    fn assignee_resolves_to_name_or_id() {
        let names = HashMap::from([(7, "Tunde".to_string())]);
        let mut t = BackendTicket {
            id: 1,
            assigned_to: Some(7),
            ..Default::default()
        };
        assert_eq!(assignee_label(&t, &names), "Tunde");
        t.assigned_to = Some(9);
        assert_eq!(assignee_label(&t, &names), "9");
    }

    #[test]
    fn row_follows_column_order() {
        let t = BackendTicket {
            id: 3,
            name: Some("Bola".into()),
            title: Some("Flat tyre".into()),
            created_at: Some("2024-05-01T10:00:00Z".into()),
            ..Default::default()
        };
        let cells = row_cells(&t, &HashMap::new());
        assert_eq!(cells.len() + 1, EXPORT_COLUMNS.len());
        assert_eq!(cells[0], "Bola");
        assert_eq!(cells[2], "Unassigned");
        assert_eq!(cells[10], "Flat tyre");
        assert_eq!(cells[12], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn workbook_is_a_zip_archive() {
        let tickets = vec![BackendTicket {
            id: 1,
            title: Some("Leaking tap".into()),
            ..Default::default()
        }];
        let bytes = tickets_to_xlsx(&tickets, &HashMap::new()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
