//! Process configuration read from the environment.

use std::num::ParseIntError;

use thiserror::Error;

use catalog_observability::{LogFormat, ParseLogFormatError};

/// Token accepted by the write gate when `API_TOKEN` is not set.
pub const DEV_API_TOKEN: &str = "dev-token";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT `{value}`: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid LOG_FORMAT: {0}")]
    LogFormat(#[from] ParseLogFormatError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Bearer token required by create/update/delete.
    pub api_token: String,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_token: DEV_API_TOKEN.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    /// Read `HOST`, `PORT`, `API_TOKEN`, and `LOG_FORMAT` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        let log_format = match get("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            api_token: get("API_TOKEN").unwrap_or(defaults.api_token),
            log_format,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_dev_token(&self) -> bool {
        self.api_token == DEV_API_TOKEN
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert!(config.uses_dev_token());
    }

    #[test]
    fn reads_every_setting() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("API_TOKEN", "s3cret"),
            ("LOG_FORMAT", "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.api_token, "s3cret");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.uses_dev_token());
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = ApiConfig::from_lookup(lookup(&[("PORT", ""), ("API_TOKEN", "  ")])).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.uses_dev_token());
    }

    #[test]
    fn rejects_bad_port() {
        let err = ApiConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "http"));

        let err = ApiConfig::from_lookup(lookup(&[("PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = ApiConfig::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::LogFormat(_)));
    }
}
