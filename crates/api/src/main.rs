use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use helpdesk_api::config::ServerConfig;
use helpdesk_api::notifications::Notifier;
use helpdesk_api::router::build_app_router;
use helpdesk_api::state::AppState;
use helpdesk_backend::{BackendConfig, RestBackend};
use helpdesk_mail::{EmailConfig, SmtpMailer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpdesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Backend ---
    let backend_config = BackendConfig::from_env();
    let backend = RestBackend::new(&backend_config).expect("Invalid API_BASE_URL");
    tracing::info!(base_url = %backend.base_url(), "Helpdesk backend client created");

    // --- Email ---
    let notifier = match EmailConfig::from_env() {
        Some(email_config) => {
            let mailer = SmtpMailer::new(&email_config).expect("Invalid SMTP configuration");
            Notifier::new(Arc::new(mailer), email_config.from.clone())
        }
        None => {
            tracing::warn!("MAIL_HOST not set, email notifications disabled");
            Notifier::disabled()
        }
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        backend: Arc::new(backend),
        notifier,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
