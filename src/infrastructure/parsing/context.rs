//! Parsing context for HTML extraction
//!
//! Carries the page identity a parser needs for URL resolution and log output.

use url::Url;

/// Context for a vehicle detail page
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Detail page URL being parsed (diagnostics only)
    pub url: String,
}

impl DetailParseContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Context for the inventory listing page
#[derive(Debug, Clone)]
pub struct ListingParseContext {
    /// Listing page URL, used to resolve relative script sources
    pub base_url: Url,
}

impl ListingParseContext {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }
}
