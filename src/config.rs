//! Client configuration
//!
//! Loaded from TOML, from the environment, or built in code. Every field has
//! a default, so an empty document is a valid configuration.

use crate::error::{FeedError, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "FEED_API_URL";
/// Environment variable holding the bearer token
pub const ENV_TOKEN: &str = "FEED_API_TOKEN";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "FEED_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the feed authority's REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token of the authenticated user
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("feed-sdk/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `FEED_API_URL`, `FEED_API_TOKEN` and
    /// `FEED_API_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.is_empty()) {
            config.token = Some(token);
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|_| FeedError::Config(format!("{ENV_TIMEOUT_SECS} is not a number: {timeout}")))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(FeedError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(FeedError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("feed-sdk/"));
    }

    #[test]
    fn test_toml_overrides() {
        let config = ClientConfig::from_toml_str(
            r#"
base_url = "https://feed.example.com/api/"
token = "abc"
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.endpoint("/posts"), "https://feed.example.com/api/posts");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ClientConfig::from_toml_str(r#"base_url = "ftp://x""#),
            Err(FeedError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_toml_str("timeout_secs = 0"),
            Err(FeedError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_toml_str("timeout_secs = \"soon\""),
            Err(FeedError::Config(_))
        ));
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "https://api.example.com"),
            (ENV_TOKEN, "tok"),
            (ENV_TIMEOUT_SECS, " 12 "),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(config.timeout_secs, 12);

        let bad = ClientConfig::from_lookup(|k| (k == ENV_TIMEOUT_SECS).then(|| "later".to_string()));
        assert!(matches!(bad, Err(FeedError::Config(_))));
    }
}
