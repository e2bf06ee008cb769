//! Configuration from environment variables

use crate::error::ConfigError;
use axapi_client::{ClientConfig, DEFAULT_TIMEOUT};
use std::time::Duration;

/// Everything the tool needs to run
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    pub client: ClientConfig,
    /// 0 = error, 1 = info, 2+ = debug
    pub verbosity: u8,
}

impl SnapshotConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let device = required("ACOS_DEVICE")?;
        let username = required("ACOS_USERNAME")?;
        let password = required("ACOS_PASSWORD")?;

        let verbosity = match lookup("ACOS_VERBOSITY") {
            Some(value) => value.trim().parse::<u8>().map_err(|e| ConfigError::Invalid {
                name: "ACOS_VERBOSITY",
                value: value.clone(),
                reason: e.to_string(),
            })?,
            None => 0,
        };

        let timeout = match lookup("ACOS_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(value.trim().parse::<u64>().map_err(|e| {
                ConfigError::Invalid {
                    name: "ACOS_TIMEOUT_SECS",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?),
            None => DEFAULT_TIMEOUT,
        };

        let insecure = match lookup("ACOS_INSECURE") {
            Some(value) => parse_flag("ACOS_INSECURE", &value)?,
            None => false,
        };

        Ok(Self {
            client: ClientConfig::new(device, username, password)
                .with_timeout(timeout)
                .with_accept_invalid_certs(insecure),
            verbosity,
        })
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
