use playlife_storage::StorageConfig;

use crate::auth::jwt::JwtConfig;

/// Default request body limit (10 MiB). Larger than the 5 MiB image rule so
/// oversized images get the domain error instead of a bare 413.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default idle lifetime of an in-memory wizard (2 hours).
const DEFAULT_WIZARD_IDLE_SECS: u64 = 2 * 60 * 60;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests get to drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Request body limit in bytes, applied to every route.
    pub max_upload_bytes: usize,
    /// Wizards untouched for longer than this are dropped.
    pub wizard_idle_secs: u64,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_UPLOAD_BYTES`      | `10485760`                 |
    /// | `WIZARD_IDLE_SECS`      | `7200`                     |
    ///
    /// JWT and object storage settings are read by [`JwtConfig::from_env`]
    /// and [`StorageConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let wizard_idle_secs: u64 = std::env::var("WIZARD_IDLE_SECS")
            .unwrap_or_else(|_| DEFAULT_WIZARD_IDLE_SECS.to_string())
            .parse()
            .expect("WIZARD_IDLE_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let storage = StorageConfig::from_env().expect("Invalid object storage configuration");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_upload_bytes,
            wizard_idle_secs,
            jwt,
            storage,
        }
    }
}
