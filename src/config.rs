//! Runtime settings for [`DeliverySystem`](crate::lifecycle::DeliverySystem).

use std::env;
use thiserror::Error;

/// Environment variable overriding [`DeskConfig::channel_capacity`].
pub const CHANNEL_CAPACITY_VAR: &str = "PARCEL_DESK_CHANNEL_CAPACITY";

const DEFAULT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidCapacity { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeskConfig {
    /// Bound of every actor's request channel. Callers wait while it is full.
    pub channel_capacity: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl DeskConfig {
    /// Defaults, overridden by any variables set in the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(CHANNEL_CAPACITY_VAR) {
            config.channel_capacity = match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidCapacity {
                        var: CHANNEL_CAPACITY_VAR,
                        value,
                    })
                }
            };
        }
        Ok(config)
    }
}
