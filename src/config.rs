//! # Configuration
//!
//! Layered service configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. `config/local.toml` (optional)
//! 4. Environment variables prefixed `ROUTE_SERVICE`, with `__` between
//!    nesting levels, e.g. `ROUTE_SERVICE__SERVER__PORT=9090`
//!
//! A `.env` file in the working directory is loaded into the environment
//! first if present.

use crate::infrastructure::routing::osrm::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT, OsrmConfig,
};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ROUTE_SERVICE";

/// Directory searched for configuration files.
pub const CONFIG_DIR: &str = "config";

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or the values did not deserialize.
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// Host and port do not form a socket address.
    #[error("invalid listen address: {0}")]
    InvalidAddress(String),
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Routing provider.
    pub routing: RoutingConfig,
    /// Log output.
    pub log: LogConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

/// Routing provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoutingConfig {
    /// Provider base URL.
    pub base_url: String,
    /// Routing profile.
    pub profile: String,
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
    /// User-Agent header value.
    pub user_agent: String,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from `.env`, the `config/` directory and the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a present file is malformed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from(
            Path::new(CONFIG_DIR),
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Loads configuration from the given directory and environment source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a present file is malformed or a value
    /// has the wrong type.
    pub fn load_from(config_dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let config = defaults()?
            .add_source(File::from(config_dir.join("default")).required(false))
            .add_source(File::from(config_dir.join("local")).required(false))
            .add_source(environment)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Returns the socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAddress` if host and port do not parse.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("routing.base_url", DEFAULT_BASE_URL)?
        .set_default("routing.profile", DEFAULT_PROFILE)?
        .set_default("routing.timeout_ms", DEFAULT_TIMEOUT_MS)?
        .set_default("routing.user_agent", DEFAULT_USER_AGENT)?
        .set_default("log.json", false)
}

impl From<&RoutingConfig> for OsrmConfig {
    fn from(routing: &RoutingConfig) -> Self {
        OsrmConfig::new(routing.base_url.clone())
            .with_profile(routing.profile.clone())
            .with_timeout(Duration::from_millis(routing.timeout_ms))
            .with_user_agent(routing.user_agent.clone())
    }
}
