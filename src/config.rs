//! Configuration loading and constants.
//!
//! All runtime configuration comes from environment variables, read once at
//! startup into an immutable `AppConfig`. Defines constants for the HTTP
//! listener, Postgres connection defaults, CORS allow-list fallback, message
//! listing limits, and logging.

use std::str::FromStr;

// =============================================================================
// HTTP Listener
// =============================================================================

/// Default port for the HTTP listener (`PORT`)
pub const DEFAULT_HTTP_PORT: u16 = 3001;

/// Listen address; TLS termination belongs to the reverse proxy in front
pub const HTTP_LISTEN_HOST: &str = "0.0.0.0";

// =============================================================================
// Postgres Connection
// =============================================================================

/// Default Postgres host (`PGHOST`)
pub const DEFAULT_PG_HOST: &str = "localhost";

/// Default Postgres port (`PGPORT`)
pub const DEFAULT_PG_PORT: u16 = 5432;

/// Maximum connections held by the pool
pub const POOL_MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// Message Store
// =============================================================================

/// Upper bound on rows returned by the message listing endpoint
pub const MESSAGE_LIST_LIMIT: i64 = 100;

// =============================================================================
// CORS
// =============================================================================

/// Origins permitted when `CORS_ORIGIN` is not set
pub const DEFAULT_CORS_ORIGINS: [&str; 2] =
    ["https://ruudjuffermans.nl", "http://localhost:3000"];

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "message_board=debug,tower_http=debug";

/// Root configuration, assembled from the environment at startup and
/// immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http: HttpServerConfig,
    pub db: DbConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// Postgres connection parameters, following the libpq `PG*` variable names
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub tls_mode: TlsMode,
}

/// Whether connections to Postgres negotiate TLS.
///
/// `Prefer` and `Require` encrypt the connection but do not verify the server
/// certificate. That relaxed trust is intentional: the database lives on a
/// private network and certificate management is out of scope here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    Disable,
    Prefer,
    Require,
}

impl FromStr for TlsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(TlsMode::Disable),
            "prefer" => Ok(TlsMode::Prefer),
            "require" => Ok(TlsMode::Require),
            other => Err(format!("unknown TLS mode '{}'", other)),
        }
    }
}

/// CORS allow-list configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins permitted to make cross-origin browser requests (exact match)
    pub allowed_origins: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log output format, from `LOG_FORMAT`
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl AppConfig {
    /// Read the full configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            http: HttpServerConfig {
                host: HTTP_LISTEN_HOST.to_string(),
                port: parse_var("PORT", DEFAULT_HTTP_PORT)?,
            },
            db: DbConfig {
                host: env_or("PGHOST", DEFAULT_PG_HOST),
                port: parse_var("PGPORT", DEFAULT_PG_PORT)?,
                database: require_var("PGDATABASE")?,
                user: require_var("PGUSER")?,
                password: env_or("PGPASSWORD", ""),
                tls_mode: parse_var("PGSSLMODE", TlsMode::Prefer)?,
            },
            cors: CorsConfig {
                allowed_origins: match std::env::var("CORS_ORIGIN") {
                    Ok(raw) => parse_origins(&raw)?,
                    Err(_) => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
                },
            },
            logging: LoggingConfig {
                format: parse_var("LOG_FORMAT", LogFormat::Text)?,
            },
        })
    }
}

/// Split a comma-separated `CORS_ORIGIN` value into an allow-list.
///
/// Entries are trimmed and empty entries dropped; an entirely empty value is
/// rejected rather than silently allowing nothing.
pub fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        return Err(ConfigError::Invalid {
            var: "CORS_ORIGIN",
            message: "no origins listed".to_string(),
        });
    }

    for origin in &origins {
        if !origin.is_ascii() || origin.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGIN",
                message: format!("'{}' is not a valid origin", origin),
            });
        }
    }

    Ok(origins)
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn require_var(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tls_mode_parses_known_values() {
        assert_eq!("disable".parse::<TlsMode>().unwrap(), TlsMode::Disable);
        assert_eq!("prefer".parse::<TlsMode>().unwrap(), TlsMode::Prefer);
        assert_eq!("require".parse::<TlsMode>().unwrap(), TlsMode::Require);
        assert!("verify-full".parse::<TlsMode>().is_err());
    }

    #[test]
    fn origins_split_on_commas_and_trim() {
        let origins =
            parse_origins("https://ruudjuffermans.nl, http://localhost:3000").unwrap();
        assert_eq!(
            origins,
            vec![
                "https://ruudjuffermans.nl".to_string(),
                "http://localhost:3000".to_string()
            ]
        );
    }

    #[test]
    fn origins_drop_empty_entries() {
        let origins = parse_origins("https://a.example,,https://b.example,").unwrap();
        assert_eq!(origins.len(), 2);
    }

    #[test]
    fn empty_origin_list_is_rejected() {
        assert!(parse_origins("").is_err());
        assert!(parse_origins(" , ").is_err());
    }

    #[test]
    fn origin_with_whitespace_is_rejected() {
        assert!(parse_origins("https://a.example/extra path").is_err());
    }

    #[test]
    fn log_format_parses() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
    }
}
