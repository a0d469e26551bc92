//! Client for the remote SKI-PEM mapping.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::{debug, info};

use crate::error::{CscaError, CscaResult};
use crate::table::TrustAnchorTable;
use crate::types::{CscaConfig, Environment};

mod http;

use http::HttpBackend;

/// User-Agent sent with every request.
pub const CSCA_USER_AGENT: &str = concat!("certloc-csca/", env!("CARGO_PKG_VERSION"));

/// Path of the SKI→PEM mapping below the API base URL.
pub const SKI_PEM_PATH: &str = "/ski-pem";

/// Client for fetching the SKI-PEM table.
#[derive(Debug, Clone)]
pub struct CscaClient {
    http: HttpBackend,
    config: CscaConfig,
}

impl CscaClient {
    pub fn new(config: CscaConfig) -> CscaResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CSCA_USER_AGENT));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| CscaError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http: HttpBackend { client },
            config,
        })
    }

    pub fn from_env() -> CscaResult<Self> {
        Self::new(CscaConfig::from_env())
    }

    /// Full SKI-PEM URL for `environment`.
    pub fn ski_pem_url(&self, environment: Environment) -> String {
        format!("{}{}", self.config.base_url(environment), SKI_PEM_PATH)
    }

    /// Fetch the complete SKI→PEM table for `environment`.
    ///
    /// One request, no retry. Transport, status and decoding failures are
    /// all returned as [`CscaError::Fetch`] carrying the cause.
    pub async fn fetch_table(&self, environment: Environment) -> CscaResult<TrustAnchorTable> {
        let url = self.ski_pem_url(environment);
        debug!(url = %url, environment = %environment, "fetching SKI-PEM mapping");

        let table = self
            .http
            .fetch_ski_pem(&url)
            .await
            .map_err(|source| CscaError::Fetch {
                url: url.clone(),
                source,
            })?;

        info!(url = %url, entries = table.len(), "fetched SKI-PEM mapping");
        Ok(table)
    }

    pub fn config(&self) -> &CscaConfig {
        &self.config
    }
}

/// Fetch the SKI-PEM table using configuration from the environment.
pub async fn fetch_trust_anchor_table(environment: Environment) -> CscaResult<TrustAnchorTable> {
    CscaClient::from_env()?.fetch_table(environment).await
}
