use crate::address::Address;

const DEFAULT_PORT: u16 = 587;
const DEFAULT_FROM_NAME: &str = "Helpdesk System";
const DEFAULT_FROM_ADDRESS: &str = "noreply@helpdesk.local";

/// SMTP settings. Absent entirely when `MAIL_HOST` is unset, in which case
/// the portal runs without email.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Implicit TLS when true, STARTTLS otherwise.
    pub secure: bool,
    /// Sender used for notifications the portal originates itself.
    pub from: Address,
}

impl EmailConfig {
    /// Load SMTP configuration from environment variables.
    ///
    /// | Env Var             | Default                  |
    /// |---------------------|--------------------------|
    /// | `MAIL_HOST`         | -- (email disabled)      |
    /// | `MAIL_PORT`         | `587`                    |
    /// | `MAIL_USER`         | none                     |
    /// | `MAIL_PASSWORD`     | none                     |
    /// | `MAIL_SECURE`       | `true`                   |
    /// | `MAIL_FROM_NAME`    | `Helpdesk System`        |
    /// | `MAIL_FROM_ADDRESS` | `noreply@helpdesk.local` |
    ///
    /// # Panics
    ///
    /// Panics if `MAIL_PORT` or `MAIL_SECURE` cannot be parsed.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("MAIL_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())?;

        let port: u16 = std::env::var("MAIL_PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .expect("MAIL_PORT must be a valid u16");

        let secure: bool = std::env::var("MAIL_SECURE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("MAIL_SECURE must be true or false");

        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        Some(Self {
            host,
            port,
            username: non_empty("MAIL_USER"),
            password: non_empty("MAIL_PASSWORD"),
            secure,
            from: Address::new(
                non_empty("MAIL_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.into()),
                non_empty("MAIL_FROM_ADDRESS").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.into()),
            ),
        })
    }
}
