//! Application configuration.
//!
//! Values come from the environment (a `.env` file is loaded by the binary
//! through dotenvy). Unset variables take the defaults below.

use std::env;
use std::net::IpAddr;

use crate::error::{ConfigError, ConfigResult};

pub const ENV_HOST: &str = "ROSTERLOAD_HOST";
pub const ENV_PORT: &str = "ROSTERLOAD_PORT";
pub const ENV_MAX_UPLOAD_BYTES: &str = "ROSTERLOAD_MAX_UPLOAD_BYTES";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Maximum roster upload size (5 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: Option<IpAddr> = parse_var(&lookup, ENV_HOST, "not an IP address")?;
        let port: Option<u16> = parse_var(&lookup, ENV_PORT, "not a port number")?;
        let max_upload_bytes: Option<usize> =
            parse_var(&lookup, ENV_MAX_UPLOAD_BYTES, "not a byte count")?;

        if max_upload_bytes == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: ENV_MAX_UPLOAD_BYTES.to_string(),
                value: "0".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let defaults = Self::default();
        Ok(Self {
            host: host.unwrap_or(defaults.host),
            port: port.unwrap_or(defaults.port),
            max_upload_bytes: max_upload_bytes.unwrap_or(defaults.max_upload_bytes),
        })
    }

    /// Same configuration on another port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Parse `key` if it is set to a non-blank value.
fn parse_var<T, F>(lookup: &F, key: &str, message: &str) -> ConfigResult<Option<T>>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
                message: message.to_string(),
            }),
    }
}
