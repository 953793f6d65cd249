use std::fmt;
use std::str::FromStr;

/// Which [`villa_db::store::VillaStore`] backend the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process-local list, lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" | "inmemory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "Unknown store backend '{other}'. Must be one of: postgres, memory"
            )),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Postgres => f.write_str("postgres"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Store backend (default: `postgres`).
    pub store: StoreBackend,
    /// PostgreSQL connection string. Required when `store` is `postgres`.
    pub database_url: Option<String>,
    /// Maximum pooled database connections (default: `20`).
    pub db_max_connections: u32,
    /// Whether the in-memory store starts with the starter villas (default: `true`).
    pub seed_villas: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `VILLA_STORE`          | `postgres`                 |
    /// | `DATABASE_URL`         | (none)                     |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `SEED_VILLAS`          | `true`                     |
    ///
    /// Panics on unparseable values; misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = env_parse("PORT", "3000");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_parse("REQUEST_TIMEOUT_SECS", "30");
        let store: StoreBackend = env_parse("VILLA_STORE", "postgres");
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let db_max_connections: u32 = env_parse("DB_MAX_CONNECTIONS", "20");
        let seed_villas: bool = env_parse("SEED_VILLAS", "true");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            database_url,
            db_max_connections,
            seed_villas,
        }
    }
}

fn env_parse<T>(key: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.into());
    raw.parse()
        .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}"))
}
