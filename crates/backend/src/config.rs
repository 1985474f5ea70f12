/// Default base URL of the backend REST API.
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Connection settings for the external backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL every endpoint path is appended to, e.g. `http://host:5000/api`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load backend configuration from environment variables.
    ///
    /// | Env Var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `API_BASE_URL`         | `http://localhost:5000/api`  |
    /// | `BACKEND_TIMEOUT_SECS` | `15`                         |
    ///
    /// # Panics
    ///
    /// Panics if `BACKEND_TIMEOUT_SECS` is not a valid `u64`.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());

        let timeout_secs: u64 = std::env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("BACKEND_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            timeout_secs,
        }
    }
}
