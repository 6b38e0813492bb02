//! Server configuration loaded from the environment.

use std::env;

use thiserror::Error;

use crate::auth::AuthConfig;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_STORAGE_ROOT: &str = "storage";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Settings shared by the server and the helper binaries.
///
/// | Env Var             | Default     |
/// |---------------------|-------------|
/// | `DATABASE_URL`      | `app.db`    |
/// | `ADDRESS`           | `127.0.0.1` |
/// | `PORT`              | `8080`      |
/// | `JWT_SECRET`        | required    |
/// | `TOKEN_TTL_MINUTES` | `60`        |
/// | `STORAGE_ROOT`      | `storage`   |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    pub storage_root: String,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port_raw = var("PORT", &DEFAULT_PORT.to_string());
        let port = port_raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
            name: "PORT",
            value: port_raw.clone(),
        })?;

        let ttl_raw = var("TOKEN_TTL_MINUTES", &DEFAULT_TOKEN_TTL_MINUTES.to_string());
        let token_ttl_minutes = ttl_raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|ttl| *ttl > 0)
            .ok_or_else(|| ConfigError::Invalid {
                name: "TOKEN_TTL_MINUTES",
                value: ttl_raw.clone(),
            })?;

        let secret = lookup("JWT_SECRET")
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            address: var("ADDRESS", DEFAULT_ADDRESS),
            port,
            storage_root: var("STORAGE_ROOT", DEFAULT_STORAGE_ROOT),
            auth: AuthConfig {
                secret,
                token_ttl_minutes,
            },
        })
    }
}
