//! Client configuration.
//!
//! The API prefix is the only externally configurable value. It is read
//! from `API_PREFIX` when present and otherwise falls back to the local
//! development server.

use std::time::Duration;

/// Prefix prepended to every request path.
pub const API_PREFIX: &str = "http://localhost:5000";

/// Environment variable that overrides [`API_PREFIX`].
pub const API_PREFIX_ENV: &str = "API_PREFIX";

/// How long a request may take before it is reported as timed out.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(100_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_prefix: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_prefix: API_PREFIX.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Build a config from the process environment. A missing or empty
    /// `API_PREFIX` keeps the default prefix.
    pub fn from_env() -> Self {
        Self::from_prefix_var(std::env::var(API_PREFIX_ENV).ok())
    }

    fn from_prefix_var(value: Option<String>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(prefix) => Self::default().with_api_prefix(prefix),
            None => Self::default(),
        }
    }

    /// The prefix is used verbatim; it is not normalized.
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_server() {
        let config = ClientConfig::default();
        assert_eq!(config.api_prefix, "http://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(100));
    }

    #[test]
    fn prefix_variable_overrides_default() {
        let config = ClientConfig::from_prefix_var(Some("https://api.example.com".to_string()));
        assert_eq!(config.api_prefix, "https://api.example.com");
        assert_eq!(config.timeout, REQUEST_TIMEOUT);
    }

    #[test]
    fn empty_prefix_variable_is_ignored() {
        assert_eq!(ClientConfig::from_prefix_var(Some(String::new())), ClientConfig::default());
        assert_eq!(ClientConfig::from_prefix_var(None), ClientConfig::default());
    }

    #[test]
    fn trailing_slash_is_kept() {
        let config = ClientConfig::default().with_api_prefix("http://localhost:5000/");
        assert_eq!(config.api_prefix, "http://localhost:5000/");
    }
}
