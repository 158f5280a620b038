//! Service configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Port used when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 3000;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Interface to bind (default: "0.0.0.0").
    pub host: String,

    /// Port to listen on (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL. When unset, the libpq variables
    /// (`PGHOST`, `PGPORT`, `PGUSER`, `PGPASSWORD`, `PGDATABASE`) are used.
    pub database_url: Option<String>,

    /// Maximum pooled database connections (default: 10).
    pub database_max_connections: u32,

    /// Seconds to wait for a pooled connection (default: 5).
    pub database_acquire_timeout_seconds: u64,

    /// Apply embedded migrations at startup (default: true).
    pub run_migrations: bool,

    /// Directory holding the built frontend (default: "client-dist").
    pub static_dir: PathBuf,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Missing or unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT").unwrap_or(defaults.port),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            database_acquire_timeout_seconds: parse_var(
                &lookup,
                "DATABASE_ACQUIRE_TIMEOUT_SECONDS",
            )
            .unwrap_or(defaults.database_acquire_timeout_seconds),
            run_migrations: lookup("RUN_MIGRATIONS")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.run_migrations),
            static_dir: lookup("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            cors_origins: lookup("CORS_ORIGINS").map_or(defaults.cors_origins, |origins| {
                origins.split(',').map(|s| s.trim().to_string()).collect()
            }),
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES")
                .unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }

    /// The `host:port` pair to bind.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The file served for any path without a matching asset.
    #[must_use]
    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }

    /// Pool acquire timeout.
    #[must_use]
    pub fn database_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.database_acquire_timeout_seconds)
    }

    /// Build PostgreSQL connection options.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is set but malformed.
    pub fn pg_connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.database_url {
            Some(url) => PgConnectOptions::from_str(url),
            None => Ok(PgConnectOptions::new()),
        }
    }
}

/// Parse a trimmed variable, treating unparseable values as unset.
fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            database_url: None,
            database_max_connections: 10,
            database_acquire_timeout_seconds: 5,
            run_migrations: true,
            static_dir: PathBuf::from("client-dist"),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
