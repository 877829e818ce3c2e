//! Configuration management for the ticket service.
//!
//! This module handles loading and validating configuration from environment variables,
//! with an optional `.env` file loaded first.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration for the ticket service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    /// Bearer token every request must present
    pub api_token: String,

    /// Ticket cache TTL in seconds (default: 60)
    pub cache_ttl_secs: u64,

    /// How often expired cache entries are released, in seconds (default: 60)
    pub cache_sweep_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the process environment is read. Loading a `.env` file is left
    /// to the binary.
    ///
    /// Required environment variables:
    /// - `API_TOKEN`: Bearer token for request authorization
    ///
    /// Optional environment variables:
    /// - `BIND_ADDR`: Listen address (default: 0.0.0.0:8080)
    /// - `CACHE_TTL_SECS`: Cache TTL in seconds (default: 60)
    /// - `CACHE_SWEEP_INTERVAL_SECS`: Sweep interval in seconds (default: 60)
    pub fn from_env() -> ConfigResult<Self> {
        let api_token =
            env::var("API_TOKEN").map_err(|_| ConfigError::MissingVar("API_TOKEN".to_string()))?;

        if api_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "API_TOKEN".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let bind_addr = Self::parse_env_addr("BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let cache_ttl_secs = Self::parse_env_positive_u64("CACHE_TTL_SECS", 60)?;
        let cache_sweep_interval_secs =
            Self::parse_env_positive_u64("CACHE_SWEEP_INTERVAL_SECS", 60)?;

        Ok(Config {
            bind_addr,
            api_token,
            cache_ttl_secs,
            cache_sweep_interval_secs,
        })
    }

    /// The ticket cache TTL.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// The cache sweep interval.
    pub fn cache_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_interval_secs)
    }

    /// Parse an environment variable as a u64 greater than zero, with a default value.
    fn parse_env_positive_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        let value = match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            })?,
            Err(_) => default,
        };

        if value == 0 {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }
        Ok(value)
    }

    /// Parse an environment variable as a socket address with a default value.
    fn parse_env_addr(var_name: &str, default: &str) -> ConfigResult<SocketAddr> {
        let raw = env::var(var_name).unwrap_or_else(|_| default.to_string());
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a socket address like 0.0.0.0:8080, got {}: {}", raw, e),
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_token: String::new(),
            cache_ttl_secs: 60,
            cache_sweep_interval_secs: 60,
        }
    }
}
