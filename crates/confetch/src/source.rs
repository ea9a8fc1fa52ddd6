//! Network source for the canonical configuration resource.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, USER_AGENT};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

pub const DEFAULT_USER_AGENT: &str = concat!("confetch/", env!("CARGO_PKG_VERSION"));

/// Configurable options for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Overall timeout for the request.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,

    /// Custom HTTP headers sent with every request.
    pub headers: HeaderMap,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            headers: HeaderMap::new(),
        }
    }
}

/// A single idempotent retrieval of the configuration resource.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch(&self) -> Result<Value, FetchError>;
}

/// HTTP implementation of [`ConfigSource`] over a fixed URL.
///
/// One GET per call, no retries: a failed attempt surfaces as an error and the
/// caller decides whether stale data covers it.
pub struct HttpSource {
    client: Client,
    url: Url,
    config: SourceConfig,
}

impl HttpSource {
    /// Create a source with default options.
    pub fn new(url: Url) -> Result<Self, FetchError> {
        Self::with_config(url, SourceConfig::default())
    }

    /// Create a source with custom options.
    pub fn with_config(url: Url, config: SourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url,
            config,
        })
    }

    /// Use an externally constructed client (shared connection pool, proxy).
    pub fn with_client(client: Client, url: Url, config: SourceConfig) -> Self {
        Self {
            client,
            url,
            config,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ConfigSource for HttpSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(USER_AGENT, self.config.user_agent.as_str())
            .headers(self.config.headers.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status,
                url: self.url.to_string(),
            });
        }

        let payload = response.json::<Value>().await?;
        debug!(url = %self.url, "Fetched remote config");
        Ok(payload)
    }
}
