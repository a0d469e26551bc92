//! Configuration and environment selection for the SKI-PEM endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CscaError, CscaResult};

/// Which deployment of the SKI-PEM endpoint to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = CscaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(CscaError::Config {
                message: format!("unknown environment {other:?} (expected staging or production)"),
            }),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CscaConfig {
    /// Production API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Staging API base URL.
    #[serde(default = "default_staging_api_url")]
    pub staging_api_url: String,

    /// Request timeout in seconds, enforced by the transport.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.self.xyz".to_string()
}

fn default_staging_api_url() -> String {
    "https://api.staging.self.xyz".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for CscaConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            staging_api_url: default_staging_api_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl CscaConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `CERTLOC_API_URL` | Production base URL |
    /// | `CERTLOC_API_URL_STAGING` | Staging base URL |
    /// | `CERTLOC_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("CERTLOC_API_URL").unwrap_or_else(|_| default_api_url()),
            staging_api_url: std::env::var("CERTLOC_API_URL_STAGING")
                .unwrap_or_else(|_| default_staging_api_url()),
            timeout_secs: std::env::var("CERTLOC_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    /// Set the production base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the staging base URL.
    pub fn with_staging_api_url(mut self, url: impl Into<String>) -> Self {
        self.staging_api_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Base URL for `environment`, without a trailing slash.
    pub fn base_url(&self, environment: Environment) -> &str {
        let url = match environment {
            Environment::Staging => &self.staging_api_url,
            Environment::Production => &self.api_url,
        };
        url.trim_end_matches('/')
    }

    /// Check that both base URLs are absolute http(s) URLs.
    pub fn validate(&self) -> CscaResult<()> {
        for (name, raw) in [
            ("api_url", &self.api_url),
            ("staging_api_url", &self.staging_api_url),
        ] {
            let parsed = url::Url::parse(raw).map_err(|e| CscaError::Config {
                message: format!("{name} {raw:?} is not a valid URL: {e}"),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(CscaError::Config {
                    message: format!("{name} {raw:?} must use http or https"),
                });
            }
        }
        Ok(())
    }
}
