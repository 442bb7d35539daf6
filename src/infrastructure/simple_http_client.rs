//! HTTP client for fetching listing pages, feed pages and detail pages
//!
//! One request per call: no retries, no rate limiting. Timeouts, transport
//! failures and non-2xx statuses all surface as `FetchError`.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::infrastructure::config::{defaults, HttpConfig};
use crate::infrastructure::fetcher::{DocumentFetcher, FetchError};

/// Configuration for HTTP client behavior
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Whether to follow redirects
    pub follow_redirects: bool,
}

impl HttpClientConfig {
    pub fn from_http_config(http_config: &HttpConfig) -> Self {
        Self {
            timeout_seconds: http_config.timeout_seconds,
            user_agent: http_config.user_agent.clone(),
            follow_redirects: http_config.follow_redirects,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::USER_AGENT.to_string(),
            follow_redirects: true,
        }
    }
}

/// reqwest-backed `DocumentFetcher`
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client from the `http` config section
    pub fn from_http_config(http_config: &HttpConfig) -> Result<Self, FetchError> {
        Self::with_config(HttpClientConfig::from_http_config(http_config))
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .gzip(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| FetchError::Transport {
                url: String::new(),
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Fetch raw response from a URL, rejecting non-2xx statuses
    pub async fn fetch_response(&self, url: &str) -> Result<Response, FetchError> {
        info!("🌐 HTTP GET: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            error!("❌ HTTP error {}: {}", status, url);
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    /// Fetch the response body as text
    pub async fn fetch_html_string(&self, url: &str) -> Result<String, FetchError> {
        let response = self.fetch_response(url).await?;

        let body = response
            .text()
            .await
            .map_err(|e| Self::classify_error(url, &e))?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    fn classify_error(url: &str, error: &reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = error.status() {
            FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl DocumentFetcher for HttpClient {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.fetch_html_string(url).await
    }
}
