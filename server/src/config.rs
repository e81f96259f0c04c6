//! Configuration management for the todo server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is honoured by the binary.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use todo_sqlite::{DatabaseConfig, DEFAULT_DATABASE_PATH};

/// Default tracing filter when neither `RUST_LOG` nor `LOG_LEVEL` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,todo_server=debug,sqlx=warn";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `HOST`/`PORT` do not form a socket address.
    #[error("Invalid bind address {0:?}")]
    InvalidAddress(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// SQLite configuration
    pub database: DatabaseConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Tracing filter directive (e.g. `info,todo_server=debug`)
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                log_level: DEFAULT_LOG_FILTER.to_string(),
                shutdown_timeout: 30,
            },
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or(defaults.server.host),
                port: parse_var("PORT").unwrap_or(defaults.server.port),
                log_level: env::var("LOG_LEVEL").unwrap_or(defaults.server.log_level),
                shutdown_timeout: parse_var("SHUTDOWN_TIMEOUT")
                    .unwrap_or(defaults.server.shutdown_timeout),
            },
            database: DatabaseConfig {
                path: env::var("DATABASE_PATH")
                    .map_or_else(|_| PathBuf::from(DEFAULT_DATABASE_PATH), PathBuf::from),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
            },
        }
    }

    /// Socket address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] if `host:port` does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server.host, self.server.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }

    /// Graceful shutdown timeout.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}
