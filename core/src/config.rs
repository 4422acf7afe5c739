//! API endpoint configuration.
//!
//! The base URL and access token are external configuration rather than
//! compiled-in constants. `from_env` follows the usual `VAR` with default
//! fallback pattern; only the token has no default.

use std::fmt;
use std::time::Duration;

use crate::error::ApiError;

/// Default public endpoint of the superhero API.
pub const DEFAULT_BASE_URL: &str = "https://superheroapi.com/api";

pub const BASE_URL_ENV: &str = "HEROIQ_API_BASE_URL";
pub const TOKEN_ENV: &str = "HEROIQ_API_TOKEN";
pub const TIMEOUT_ENV: &str = "HEROIQ_API_TIMEOUT_SECS";

/// Where requests go and which access token is embedded in their path.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_token: String,
    /// Transport timeout. `None` keeps the transport's default.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load configuration from `HEROIQ_API_BASE_URL`, `HEROIQ_API_TOKEN` and
    /// `HEROIQ_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let token = lookup(TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("{TOKEN_ENV} is not set")))?;

        let mut config = Self::new(&base_url, token.trim());
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("{TIMEOUT_ENV} must be whole seconds, got {raw:?}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
