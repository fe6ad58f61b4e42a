//! Configuration management for streambridge.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "streambridge";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "STREAMBRIDGE_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `STREAMBRIDGE_`, sections split
///    on `__`, e.g. `STREAMBRIDGE_SERVER__PORT`)
/// 2. TOML config file at `~/.config/streambridge/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Path prefix for all routes, e.g. `/api`.
    pub route_prefix: Option<String>,
    /// Allow cross-origin requests from any origin.
    pub cors_enabled: bool,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7071,
            route_prefix: None,
            cors_enabled: true,
            max_body_bytes: 1024 * 1024, // 1MB
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `STREAMBRIDGE_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(Error::ConfigValidation {
                message: format!("host must be an IP address, got '{}'", self.server.host),
            });
        }

        if self.server.max_body_bytes == 0 {
            return Err(Error::ConfigValidation {
                message: "max_body_bytes must be greater than 0".to_string(),
            });
        }

        if let Some(prefix) = self.route_prefix() {
            if !prefix.starts_with('/') || prefix.ends_with('/') {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "route_prefix must start with '/' and not end with '/', got '{prefix}'"
                    ),
                });
            }
        }

        Ok(())
    }

    /// Get the socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|e| Error::ConfigValidation {
                message: format!("invalid host '{}': {e}", self.server.host),
            })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Get the route prefix, treating an empty string as unset.
    #[must_use]
    pub fn route_prefix(&self) -> Option<&str> {
        self.server
            .route_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
    }
}
