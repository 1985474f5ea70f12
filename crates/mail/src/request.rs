//! Relay requests and their conversion into a deliverable email.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::address::Address;
use crate::error::EmailError;
use crate::templates::{render, EmailTemplate};
use crate::text::html_to_text;

/// Body of the email relay endpoint.
///
/// The historical field name `reciepients` is accepted alongside
/// `recipients`. Either `message` (raw HTML) or `template` plus
/// `templateData` must be present; a template wins over a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[serde(default)]
    pub sender: Option<Address>,
    #[serde(default, alias = "recipients")]
    pub reciepients: Vec<Address>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub template_data: Option<serde_json::Value>,
}

impl SendEmailRequest {
    /// Decode `template` + `templateData` into a typed template, if given.
    pub fn parsed_template(&self) -> Result<Option<EmailTemplate>, EmailError> {
        let Some(name) = self.template.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        let data = self.template_data.clone().unwrap_or_else(|| json!({}));
        serde_json::from_value(json!({ "template": name, "templateData": data }))
            .map(Some)
            .map_err(|e| EmailError::InvalidTemplate(format!("{name}: {e}")))
    }
}

/// A fully rendered email ready for a [`crate::Mailer`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub from: Address,
    pub to: Vec<Address>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl OutgoingEmail {
    /// Render `template` for a single recipient with its default subject.
    pub fn from_template(from: Address, to: Address, template: &EmailTemplate) -> Self {
        let html = render(template);
        Self {
            from,
            to: vec![to],
            subject: template.default_subject(),
            text: html_to_text(&html),
            html,
        }
    }

    /// Recipients joined for logging.
    pub fn recipient_list(&self) -> String {
        self.to
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validate a relay request and render it.
pub fn compose(request: &SendEmailRequest) -> Result<OutgoingEmail, EmailError> {
    let sender = request
        .sender
        .as_ref()
        .filter(|s| !s.is_blank())
        .ok_or(EmailError::MissingFields)?;
    let subject = non_blank(request.subject.as_deref()).ok_or(EmailError::MissingFields)?;
    if request.reciepients.is_empty() || request.reciepients.iter().any(Address::is_blank) {
        return Err(EmailError::MissingFields);
    }

    let html = match request.parsed_template()? {
        Some(template) => render(&template),
        None => non_blank(request.message.as_deref())
            .ok_or(EmailError::MissingFields)?
            .to_string(),
    };

    Ok(OutgoingEmail {
        from: sender.clone(),
        to: request.reciepients.clone(),
        subject: subject.to_string(),
        text: html_to_text(&html),
        html,
    })
}
