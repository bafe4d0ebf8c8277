//! Configuration management for Flowerbed.
//!
//! Loads configuration from environment variables (and an optional `.env`
//! file) once per process.

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub owner_cookie: OwnerCookieConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub public_url: String,
}

impl ServerConfig {
    /// Whether cookies should carry the `Secure` attribute.
    pub fn is_https(&self) -> bool {
        self.public_url.starts_with("https://")
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct OwnerCookieConfig {
    /// Lifetime of the ownership cookie (default: 365 days)
    pub max_age_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "8000").parse().unwrap_or(8000),
                public_url: env_or("PUBLIC_URL", "http://localhost:8000"),
            },
            database: DatabaseConfig {
                path: env_or("DATABASE_PATH", "./data/flowerbed.db"),
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", "10")
                    .parse()
                    .unwrap_or(10),
            },
            owner_cookie: OwnerCookieConfig {
                max_age_days: env_or("OWNER_COOKIE_MAX_AGE_DAYS", "365")
                    .parse()
                    .unwrap_or(365),
            },
        }
    }

    /// Fixed configuration for tests, independent of the environment.
    #[cfg(test)]
    pub(crate) fn sample(public_url: &str) -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 9000,
                public_url: public_url.into(),
            },
            database: DatabaseConfig {
                path: ":memory:".into(),
                max_connections: 1,
            },
            owner_cookie: OwnerCookieConfig { max_age_days: 365 },
        }
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
