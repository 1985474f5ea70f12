//! Transactional email for the helpdesk portal.
//!
//! - [`templates`] -- the six fixed notification templates and their HTML.
//! - [`request`] -- the relay request shape and [`request::compose`].
//! - [`transport`] -- the [`Mailer`] seam and its SMTP implementation.

pub mod address;
pub mod config;
pub mod error;
pub mod request;
pub mod templates;
pub mod text;
pub mod transport;

pub use address::Address;
pub use config::EmailConfig;
pub use error::EmailError;
pub use request::{compose, OutgoingEmail, SendEmailRequest};
pub use templates::{render, EmailTemplate};
pub use transport::{Mailer, SmtpMailer};
