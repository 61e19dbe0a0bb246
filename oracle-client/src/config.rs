//! Environment-driven client configuration.

use oracle_stream::DEFAULT_MAX_LINE_BYTES;

use crate::client::{OracleClient, Route};

/// Base URL of the project or gateway. Required.
pub const ENV_BASE_URL: &str = "ORACLE_BASE_URL";
/// Bearer token. Optional.
pub const ENV_API_KEY: &str = "ORACLE_API_KEY";
/// `relay` (default) or `gateway`.
pub const ENV_ROUTE: &str = "ORACLE_ROUTE";
/// Decoder line cap in bytes.
pub const ENV_MAX_LINE_BYTES: &str = "ORACLE_MAX_LINE_BYTES";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is absent or empty.
    #[error("missing required setting {0}")]
    Missing(&'static str),
    /// A setting could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Setting name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Settings needed to build an [`OracleClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    /// Project or gateway base URL.
    pub base_url: String,
    /// Bearer token, if any.
    pub api_key: Option<String>,
    /// Endpoint shape.
    pub route: Route,
    /// Decoder line cap.
    pub max_line_bytes: usize,
}

impl OracleConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = non_empty(ENV_BASE_URL).ok_or(ConfigError::Missing(ENV_BASE_URL))?;
        let api_key = non_empty(ENV_API_KEY);
        let route = match non_empty(ENV_ROUTE) {
            Some(value) => value.parse::<Route>().map_err(|_| ConfigError::Invalid {
                name: ENV_ROUTE,
                value,
            })?,
            None => Route::default(),
        };
        let max_line_bytes = match non_empty(ENV_MAX_LINE_BYTES) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: ENV_MAX_LINE_BYTES,
                        value,
                    });
                }
            },
            None => DEFAULT_MAX_LINE_BYTES,
        };

        Ok(Self {
            base_url,
            api_key,
            route,
            max_line_bytes,
        })
    }

    /// Build a client from these settings.
    #[must_use]
    pub fn into_client(self) -> OracleClient {
        let client = OracleClient::new(self.base_url)
            .route(self.route)
            .max_line_bytes(self.max_line_bytes);
        match self.api_key {
            Some(key) => client.api_key(key),
            None => client,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = OracleConfig::from_lookup(lookup(&[(ENV_BASE_URL, "https://p.example.co")])).unwrap();
        assert_eq!(config.base_url, "https://p.example.co");
        assert_eq!(config.api_key, None);
        assert_eq!(config.route, Route::Relay);
        assert_eq!(config.max_line_bytes, DEFAULT_MAX_LINE_BYTES);
    }

    #[test]
    fn full_config() {
        let config = OracleConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://gw.example.dev"),
            (ENV_API_KEY, "sk-test"),
            (ENV_ROUTE, "gateway"),
            (ENV_MAX_LINE_BYTES, "65536"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.route, Route::Gateway);
        assert_eq!(config.max_line_bytes, 65536);

        let client = config.into_client();
        assert_eq!(client.route, Route::Gateway);
        assert_eq!(client.api_key.as_deref(), Some("sk-test"));
        assert_eq!(client.decoder.max_line_bytes, 65536);
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let err = OracleConfig::from_lookup(lookup(&[(ENV_BASE_URL, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_BASE_URL)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = OracleConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://x"),
            (ENV_ROUTE, "smoke-signal"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: ENV_ROUTE, .. }));

        let err = OracleConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://x"),
            (ENV_MAX_LINE_BYTES, "0"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for ORACLE_MAX_LINE_BYTES: \"0\"");
    }
}
