//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for qrcodes-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8000"`).
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://qrcodes.db?mode=rwc"`).
    /// `sqlite::memory:` gives a throwaway database.
    pub database_url: String,

    /// Upper bound of pooled SQLite connections.
    pub db_max_connections: u32,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Directory for daily-rolling log files; stdout when `None`.
    pub log_dir: Option<String>,

    /// Comma-separated list of allowed CORS origins; `None` allows any.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI JSON document.
    pub enable_swagger: bool,

    /// Largest accepted request body in bytes; larger bodies get 413.
    pub max_body_bytes: usize,

    /// Directory served under `/static` (scripts, styles, manifest).
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_owned(),
            database_url: "sqlite://qrcodes.db?mode=rwc".to_owned(),
            db_max_connections: 5,
            log_level: "info".to_owned(),
            log_json: false,
            log_dir: None,
            cors_allowed_origins: None,
            enable_swagger: true,
            max_body_bytes: 2 * 1024 * 1024,
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_owned(),
        }
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env_or("QRCODES_BIND", &defaults.bind_address),
            database_url: env_or("QRCODES_DATABASE_URL", &defaults.database_url),
            db_max_connections: parse_env("QRCODES_DB_MAX_CONNECTIONS", defaults.db_max_connections),
            log_level: env_or("QRCODES_LOG", &defaults.log_level),
            log_json: env_flag("QRCODES_LOG_JSON", defaults.log_json),
            log_dir: env_opt("QRCODES_LOG_DIR"),
            cors_allowed_origins: env_opt("QRCODES_CORS_ORIGINS"),
            enable_swagger: env_flag("QRCODES_ENABLE_SWAGGER", defaults.enable_swagger),
            max_body_bytes: parse_env("QRCODES_MAX_BODY_BYTES", defaults.max_body_bytes),
            static_dir: env_or("QRCODES_STATIC_DIR", &defaults.static_dir),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| parse_flag(&v).unwrap_or(default))
        .unwrap_or(default)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
