//! Document fetch capability
//!
//! The paginator and the detail collector only ever see `DocumentFetcher`;
//! whether pages come from reqwest, a headless browser or an in-memory map
//! is decided by the caller.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    #[error("HTTP error {status}: {url}")]
    Status { status: u16, url: String },

    #[error("HTTP request failed: {url} - {message}")]
    Transport { url: String, message: String },

    #[error("No document available for {url}")]
    NotFound { url: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Transport { url, .. }
            | Self::NotFound { url } => url,
        }
    }
}

/// Given a URL, return the response body as text.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// In-memory fetcher serving pre-registered bodies by exact URL.
///
/// Used for fixtures and offline runs; every request is recorded so callers
/// can inspect what was fetched and in which order.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    documents: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.documents.insert(url.into(), body.into());
    }

    /// URLs requested so far, in request order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|requested| requested.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }

        match self.documents.get(url) {
            Some(body) => {
                debug!("Serving static document for {}", url);
                Ok(body.clone())
            }
            None => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}
