#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// Sender, recipients or subject missing, or neither a message nor a
    /// template supplied.
    #[error("Missing required email fields")]
    MissingFields,

    #[error("Invalid email template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid email address '{0}'")]
    InvalidAddress(String),

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Failed to send email: {0}")]
    Transport(String),
}

impl EmailError {
    /// True for errors caused by the caller's input rather than delivery.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFields | Self::InvalidTemplate(_) | Self::InvalidAddress(_)
        )
    }
}
