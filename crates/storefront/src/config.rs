//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local demo instance.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_SEED_DEMO_DATA` - Seed demo products/users/carts on startup
//!   (default: true)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Whether to seed the in-memory stores with demo data
    pub seed_demo_data: bool,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let seed_demo_data = parse_bool("STOREFRONT_SEED_DEMO_DATA", true)?;

        Ok(Self {
            host,
            port,
            seed_demo_data,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            seed_demo_data: true,
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean environment variable, accepting `true/false/1/0`.
fn parse_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(value) => match value.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected true/false/1/0, got '{other}'"),
            )),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            seed_demo_data: false,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_get_env_or_default_missing() {
        assert_eq!(
            get_env_or_default("MINIMART_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }

    #[test]
    fn test_parse_bool_missing_uses_default() {
        assert!(parse_bool("MINIMART_TEST_UNSET_BOOL", true).unwrap());
        assert!(!parse_bool("MINIMART_TEST_UNSET_BOOL", false).unwrap());
    }
}
