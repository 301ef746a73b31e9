//! Runtime configuration from `RECIPE_BOX_*` environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

pub const ADDR_VAR: &str = "RECIPE_BOX_ADDR";
pub const PUBLIC_URL_VAR: &str = "RECIPE_BOX_PUBLIC_URL";
pub const BCRYPT_COST_VAR: &str = "RECIPE_BOX_BCRYPT_COST";

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000/uploads/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Socket address the HTTP server binds to.
    pub addr: String,
    /// Prefix of every uploaded image URL. Always ends with `/`.
    pub public_url: String,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let addr = load(&lookup, ADDR_VAR, defaults.addr)?;
        let mut public_url: String = load(&lookup, PUBLIC_URL_VAR, defaults.public_url)?;
        if !public_url.ends_with('/') {
            public_url.push('/');
        }

        let bcrypt_cost = load(&lookup, BCRYPT_COST_VAR, defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: BCRYPT_COST_VAR.to_string(),
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".to_string(),
            });
        }

        Ok(Self {
            addr,
            public_url,
            bcrypt_cost,
        })
    }
}

fn load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            value,
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
