use std::str::FromStr;
use std::time::Duration;

use itam_db::PoolSettings;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight work after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Database pool sizing and recycling.
    pub db_pool: PoolSettings,
    /// Lifetime of cached public responses in seconds (default: `300`).
    pub cache_ttl_secs: u64,
    /// How often expired cache entries are purged (default: `60`).
    pub cache_sweep_interval_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// First admin account, created at startup if missing.
    pub admin_seed: Option<AdminSeed>,
}

/// Credentials for the bootstrap admin account.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Read `name`, falling back to `default`, and parse it.
///
/// # Panics
///
/// Panics with the variable name if the value does not parse.
fn env_or<T>(name: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .unwrap_or_else(|e| panic!("{name} has an invalid value '{raw}': {e}"))
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `8080`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`      | `60`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`     | `30`                    |
    /// | `DB_MAX_CONNECTIONS`        | `25`                    |
    /// | `DB_MIN_CONNECTIONS`        | `5`                     |
    /// | `DB_MAX_LIFETIME_SECS`      | `3600`                  |
    /// | `DB_IDLE_TIMEOUT_SECS`      | `1800`                  |
    /// | `CACHE_TTL_SECS`            | `300`                   |
    /// | `CACHE_SWEEP_INTERVAL_SECS` | `60`                    |
    /// | `ADMIN_EMAIL`               | unset                   |
    /// | `ADMIN_PASSWORD`            | unset                   |
    /// | `ADMIN_NAME`                | `Admin`                 |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", "8080");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let db_pool = PoolSettings {
            max_connections: env_or("DB_MAX_CONNECTIONS", "25"),
            min_connections: env_or("DB_MIN_CONNECTIONS", "5"),
            max_lifetime: Duration::from_secs(env_or("DB_MAX_LIFETIME_SECS", "3600")),
            idle_timeout: Duration::from_secs(env_or("DB_IDLE_TIMEOUT_SECS", "1800")),
        };

        let admin_seed = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminSeed {
                    email,
                    password,
                    name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".into()),
                })
            }
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "60"),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", "30"),
            db_pool,
            cache_ttl_secs: env_or("CACHE_TTL_SECS", "300"),
            cache_sweep_interval_secs: env_or("CACHE_SWEEP_INTERVAL_SECS", "60"),
            jwt: JwtConfig::from_env(),
            admin_seed,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
