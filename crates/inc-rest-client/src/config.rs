//! Client configuration, read from the environment

use std::time::Duration;
use url::Url;

use crate::error::{RestClientError, RestClientResult};

/// Environment variable holding the backend base URL
pub const BASE_URL_ENV: &str = "INC_UX_BASE_URL";
/// Environment variable enabling bearer-token attachment (`1` or `true`)
pub const ATTACH_TOKEN_ENV: &str = "INC_UX_ATTACH_TOKEN";
/// Backend address used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";

/// Settings fixed for the lifetime of a [`crate::RestClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub user_agent: String,
    pub attach_token: bool,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a config for the given base URL with default settings
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            user_agent: concat!("inc-rest-client/", env!("CARGO_PKG_VERSION")).to_string(),
            attach_token: false,
            timeout: None,
        }
    }

    /// Create a config from a base URL string
    pub fn from_url(base_url: &str) -> RestClientResult<Self> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    /// Read the config from the process environment
    pub fn from_env() -> RestClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> RestClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::from_url(base_url.trim())?;

        if let Some(raw) = lookup(ATTACH_TOKEN_ENV) {
            config.attach_token = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(RestClientError::Config(format!(
                        "{} must be a boolean, got {:?}",
                        ATTACH_TOKEN_ENV, other
                    )))
                }
            };
        }

        Ok(config)
    }

    pub fn with_attach_token(mut self, attach: bool) -> Self {
        self.attach_token = attach;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_url(DEFAULT_BASE_URL).expect("default base URL is valid")
    }
}

/// Endpoint paths are relative (`api/...`), so the base must end with `/`
/// for `Url::join` to append rather than replace the last segment.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
