//! Delivery seam and the SMTP implementation.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::address::Address;
use crate::config::EmailConfig;
use crate::error::EmailError;
use crate::request::OutgoingEmail;

/// Anything that can deliver an [`OutgoingEmail`].
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
}

fn mailbox(address: &Address) -> Result<Mailbox, EmailError> {
    let email = address
        .address
        .trim()
        .parse()
        .map_err(|_| EmailError::InvalidAddress(address.address.clone()))?;
    let name = Some(address.name.clone()).filter(|n| !n.is_empty());
    Ok(Mailbox::new(name, email))
}

/// Build a `multipart/alternative` message (plain text first, then HTML).
pub fn build_message(email: &OutgoingEmail) -> Result<Message, EmailError> {
    let mut builder = Message::builder()
        .from(mailbox(&email.from)?)
        .subject(email.subject.as_str());
    for recipient in &email.to {
        builder = builder.to(mailbox(recipient)?);
    }
    builder
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))
        .map_err(|e| EmailError::Build(e.to_string()))
}

/// [`Mailer`] over an async SMTP connection pool.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| EmailError::Transport(format!("SMTP relay error: {e}")))?
        .port(config.port);

        let builder = match (&config.username, &config.password) {
            (Some(user), Some(pass)) => {
                builder.credentials(Credentials::new(user.clone(), pass.clone()))
            }
            _ => builder,
        };

        tracing::info!(
            host = %config.host,
            port = config.port,
            secure = config.secure,
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let message = build_message(email)?;
        tracing::info!(to = %email.recipient_list(), subject = %email.subject, "Sending email");
        self.transport
            .send(message)
            .await
            .map_err(|e| EmailError::Transport(e.to_string()))?;
        tracing::info!(to = %email.recipient_list(), "Email sent");
        Ok(())
    }
}
