use std::sync::Arc;

use helpdesk_backend::HelpdeskBackend;

use crate::config::ServerConfig;
use crate::notifications::Notifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The external REST backend that owns all helpdesk data.
    pub backend: Arc<dyn HelpdeskBackend>,
    /// Email side effects. Disabled when SMTP is not configured.
    pub notifier: Notifier,
}
