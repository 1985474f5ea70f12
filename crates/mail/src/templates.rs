//! The fixed notification templates.
//!
//! Each template is a variant of [`EmailTemplate`] carrying its own data.
//! On the wire a template travels as `{"template": "<name>", "templateData": {...}}`.
//! Every interpolated value is HTML-escaped before it reaches the markup.

use std::fmt;

use helpdesk_core::markup::html_escape;
use helpdesk_core::types::DbId;
use serde::{Deserialize, Deserializer, Serialize};

const BODY_BG: &str = "#f3f4f6";
const BODY_BG_LIGHT: &str = "#f9fafb";
const BUTTON_STYLE: &str = "display:inline-block;background-color:#007bff;padding:10px 20px;border-radius:5px;color:#fff;text-decoration:none";
const FOOTNOTE_STYLE: &str = "margin-top:20px;font-size:14px;color:#666";

// ---------------------------------------------------------------------------
// Ticket id
// ---------------------------------------------------------------------------

/// A ticket id in template data. Senders pass either a number or a numeric
/// string (optionally prefixed with `#`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TicketId(pub DbId);

impl<'de> Deserialize<'de> for TicketId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(DbId),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(TicketId(n)),
            Raw::Text(s) => s
                .trim()
                .trim_start_matches('#')
                .parse()
                .map(TicketId)
                .map_err(|_| serde::de::Error::custom(format!("invalid ticket id '{s}'"))),
        }
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DbId> for TicketId {
    fn from(id: DbId) -> Self {
        TicketId(id)
    }
}

// ---------------------------------------------------------------------------
// Template data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeData {
    pub name: String,
    /// Sign-in link for the button. Omitted from the email when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSubmissionData {
    pub name: String,
    pub title: String,
    pub details: String,
    pub ticket_id: TicketId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketAssignedData {
    pub name: String,
    pub title: String,
    pub assigned_by: String,
    pub ticket_id: TicketId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketReassignedData {
    pub name: String,
    pub title: String,
    pub reassigned_by: String,
    pub ticket_id: TicketId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResolvedData {
    pub name: String,
    pub title: String,
    pub ticket_id: TicketId,
    pub resolved_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCommentData {
    pub assignee_name: String,
    pub commenter_name: String,
    pub ticket_title: String,
    pub comment: String,
    pub ticket_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "template", content = "templateData", rename_all = "snake_case")]
pub enum EmailTemplate {
    Welcome(WelcomeData),
    TicketSubmission(TicketSubmissionData),
    TicketAssigned(TicketAssignedData),
    TicketReassigned(TicketReassignedData),
    TicketResolved(TicketResolvedData),
    TicketComment(TicketCommentData),
}

impl EmailTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome(_) => "welcome",
            Self::TicketSubmission(_) => "ticket_submission",
            Self::TicketAssigned(_) => "ticket_assigned",
            Self::TicketReassigned(_) => "ticket_reassigned",
            Self::TicketResolved(_) => "ticket_resolved",
            Self::TicketComment(_) => "ticket_comment",
        }
    }

    /// Subject line used when the portal sends this template on its own.
    pub fn default_subject(&self) -> String {
        match self {
            Self::Welcome(_) => "Welcome to the Helpdesk".to_string(),
            Self::TicketSubmission(d) => format!("New Ticket Submitted: {}", d.title),
            Self::TicketAssigned(d) => format!("Ticket #{} Assigned to You", d.ticket_id),
            Self::TicketReassigned(d) => format!("Ticket #{} Reassigned", d.ticket_id),
            Self::TicketResolved(d) => format!("Ticket #{} Resolved", d.ticket_id),
            Self::TicketComment(d) => format!("New Comment on: {}", d.ticket_title),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Wrap `content` in the shared page: tinted body, 600px white card.
fn layout(body_bg: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"></head>
<body style="background-color:{body_bg};padding:20px;font-family:Arial,Helvetica,sans-serif">
<div style="max-width:600px;margin:0 auto;background-color:#ffffff;padding:20px;border-radius:10px">
{content}
</div>
</body>
</html>"#
    )
}

fn heading(text: &str, centered: bool) -> String {
    let align = if centered { "text-align:center;" } else { "" };
    format!(r#"<h1 style="{align}color:#333">{text}</h1>"#)
}

fn paragraph(html: &str) -> String {
    format!("<p>{html}</p>")
}

fn labelled(label: &str, value: &str) -> String {
    format!("<p><strong>{label}:</strong> {value}</p>")
}

fn footnote(html: &str) -> String {
    format!(r#"<p style="{FOOTNOTE_STYLE}">{html}</p>"#)
}

fn button(href: &str, label: &str) -> String {
    format!(
        r#"<div style="text-align:center;margin-top:20px"><a href="{}" style="{BUTTON_STYLE}">{label}</a></div>"#,
        html_escape(href)
    )
}

fn render_welcome(d: &WelcomeData) -> String {
    let mut body = heading("Welcome to Our Platform!", true);
    body += &paragraph(&format!("Dear {},", html_escape(&d.name)));
    body += &paragraph(
        "We are excited to have you on board! Your account has been created successfully.",
    );
    if let Some(url) = &d.login_url {
        body += &button(url, "Log in to Your Account");
    }
    body += &footnote("If you have any questions, reply to this email and our support team will help.");
    layout(BODY_BG, &body)
}

fn render_submission(d: &TicketSubmissionData) -> String {
    let mut body = heading("New Ticket Submitted", true);
    body += &paragraph("Dear Admin,");
    body += &paragraph(&format!(
        "<strong>{}</strong> has submitted a new ticket.",
        html_escape(&d.name)
    ));
    body += &labelled("Ticket ID", &d.ticket_id.to_string());
    body += &labelled("Title", &html_escape(&d.title));
    body += &paragraph("<strong>Details:</strong>");
    body += &paragraph(&html_escape(&d.details));
    body += &footnote("Please log in to the admin dashboard to take action.");
    layout(BODY_BG_LIGHT, &body)
}

fn render_assigned(d: &TicketAssignedData) -> String {
    let mut body = heading(&format!("Hello {},", html_escape(&d.name)), false);
    body += &paragraph("You have been assigned a new support ticket:");
    body += &format!(
        "<ul><li><strong>Ticket ID:</strong> #{}</li><li><strong>Title:</strong> {}</li><li><strong>Assigned By:</strong> {}</li></ul>",
        d.ticket_id,
        html_escape(&d.title),
        html_escape(&d.assigned_by),
    );
    body += &paragraph(
        "Please log in to your dashboard to view more details and begin processing the ticket.",
    );
    body += &paragraph("Thank you!");
    layout(BODY_BG, &body)
}

fn render_reassigned(d: &TicketReassignedData) -> String {
    let mut body = heading("Ticket Reassigned", false);
    body += &paragraph(&format!("Hello {},", html_escape(&d.name)));
    body += &paragraph(&format!(
        "Your ticket <strong>#{} - {}</strong> has been reassigned by {}.",
        d.ticket_id,
        html_escape(&d.title),
        html_escape(&d.reassigned_by),
    ));
    body += &paragraph("Please check your dashboard for more details.");
    layout(BODY_BG, &body)
}

fn render_resolved(d: &TicketResolvedData) -> String {
    let mut body = heading("Ticket Resolved", true);
    body += &paragraph(&format!("Hi {},", html_escape(&d.name)));
    body += &paragraph("Your support ticket has been marked as <strong>resolved</strong>.");
    body += &labelled("Ticket ID", &format!("#{}", d.ticket_id));
    body += &labelled("Title", &html_escape(&d.title));
    body += &labelled("Resolved By", &html_escape(&d.resolved_by));
    body += &paragraph(
        "If the issue is not fully resolved, please reach out to the staff via their details on the dashboard.",
    );
    body += &footnote("Thank you for using our support service.");
    layout(BODY_BG_LIGHT, &body)
}

fn render_comment(d: &TicketCommentData) -> String {
    let mut body = heading("New Comment on Your Assigned Ticket", true);
    body += &paragraph(&format!("Hi {},", html_escape(&d.assignee_name)));
    body += &paragraph(&format!(
        "<strong>{}</strong> added a comment to <strong>{}</strong>.",
        html_escape(&d.commenter_name),
        html_escape(&d.ticket_title),
    ));
    body += &format!(
        r#"<div style="background-color:#f9fafb;padding:15px;border-radius:8px;border:1px solid #e5e7eb;margin-top:15px"><p style="font-style:italic;color:#333">"{}"</p></div>"#,
        html_escape(&d.comment)
    );
    body += &button(&d.ticket_link, "View Ticket");
    body += &footnote("If you have questions, reply to this email.");
    layout(BODY_BG, &body)
}

/// Render a template to a complete HTML document.
pub fn render(template: &EmailTemplate) -> String {
    match template {
        EmailTemplate::Welcome(d) => render_welcome(d),
        EmailTemplate::TicketSubmission(d) => render_submission(d),
        EmailTemplate::TicketAssigned(d) => render_assigned(d),
        EmailTemplate::TicketReassigned(d) => render_reassigned(d),
        EmailTemplate::TicketResolved(d) => render_resolved(d),
        EmailTemplate::TicketComment(d) => render_comment(d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn template_travels_adjacently_tagged() {
        let t: EmailTemplate = serde_json::from_value(json!({
            "template": "ticket_assigned",
            "templateData": {
                "name": "Tunde",
                "title": "Broken AC",
                "assignedBy": "Admin",
                "ticketId": "42"
            }
        }))
        .unwrap();
        assert_eq!(t.name(), "ticket_assigned");
        match &t {
            EmailTemplate::TicketAssigned(d) => assert_eq!(d.ticket_id, TicketId(42)),
            other => panic!("unexpected template {other:?}"),
        }
    }

    #[test]
    fn ticket_id_accepts_number_or_hash_prefixed_string() {
        assert_eq!(serde_json::from_value::<TicketId>(json!(7)).unwrap(), TicketId(7));
        assert_eq!(serde_json::from_value::<TicketId>(json!("#8")).unwrap(), TicketId(8));
        assert!(serde_json::from_value::<TicketId>(json!("abc")).is_err());
    }

    #[test]
    fn unknown_template_name_is_rejected() {
        let r = serde_json::from_value::<EmailTemplate>(json!({
            "template": "newsletter",
            "templateData": {}
        }));
        assert!(r.is_err());
    }

    #[test]
    fn rendered_values_are_escaped() {
        let html = render(&EmailTemplate::TicketComment(TicketCommentData {
            assignee_name: "Ngozi".into(),
            commenter_name: "<script>alert(1)</script>".into(),
            ticket_title: "Leak & drip".into(),
            comment: "\"urgent\"".into(),
            ticket_link: "https://portal/track?x=1&y=2".into(),
        }));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Leak &amp; drip"));
        assert!(html.contains("href=\"https://portal/track?x=1&amp;y=2\""));
    }

    #[test]
    fn resolved_uses_light_body_and_600px_card() {
        let html = render(&EmailTemplate::TicketResolved(TicketResolvedData {
            name: "Ada".into(),
            title: "Tyre".into(),
            ticket_id: TicketId(3),
            resolved_by: "Bayo".into(),
        }));
        assert!(html.contains("background-color:#f9fafb"));
        assert!(html.contains("max-width:600px"));
        assert!(html.contains("#3"));
    }

    #[test]
    fn welcome_button_only_with_login_url() {
        let without = render(&EmailTemplate::Welcome(WelcomeData {
            name: "Chi".into(),
            login_url: None,
        }));
        assert!(!without.contains("Log in to Your Account"));
        let with = render(&EmailTemplate::Welcome(WelcomeData {
            name: "Chi".into(),
            login_url: Some("https://portal/signin".into()),
        }));
        assert!(with.contains("Log in to Your Account"));
    }
}
