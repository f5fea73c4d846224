//! Server configuration.
//!
//! Every option can be given as a command-line flag or through its
//! environment variable; flags win.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Storage backend selected at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Process-local maps; data is lost on exit.
    Memory,
    /// `PostgreSQL` through Diesel.
    Postgres,
}

/// Configuration for the `tasklink-server` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "tasklink-server", version, about = "Task relationship tracker")]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[arg(long, env = "TASKLINK_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Storage backend.
    #[arg(long, env = "TASKLINK_STORAGE", value_enum, default_value_t = StorageBackend::Memory)]
    pub storage: StorageBackend,

    /// `PostgreSQL` connection URL, required by the `postgres` backend.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "TASKLINK_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,

    /// Log filter directive, for example `info` or `tasklink=debug`.
    #[arg(long, env = "TASKLINK_LOG", default_value = "info")]
    pub log: String,
}

/// Errors raised by configuration validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The `postgres` backend was chosen without a database URL.
    #[error("the postgres storage backend requires DATABASE_URL or --database-url")]
    MissingDatabaseUrl,

    /// The connection pool would be empty.
    #[error("pool size must be at least 1")]
    EmptyPool,

    /// The log filter directive does not parse.
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidLogFilter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },
}

impl ServerConfig {
    /// Checks cross-field constraints clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when the `postgres` backend
    /// has no URL, [`ConfigError::EmptyPool`] for a zero pool size, and
    /// [`ConfigError::InvalidLogFilter`] for a malformed log directive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        self.log_filter()?;
        if self.storage == StorageBackend::Postgres
            && self.database_url.as_deref().is_none_or(str::is_empty)
        {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(())
    }

    /// Builds the tracing filter from the `log` directive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogFilter`] when the directive does not
    /// parse.
    pub fn log_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log).map_err(|err| ConfigError::InvalidLogFilter {
            directive: self.log.clone(),
            reason: err.to_string(),
        })
    }
}
