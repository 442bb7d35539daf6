//! Parsing error types for listing pages and feed responses
//!
//! Detail-page extraction never fails once its selectors compile; the
//! variants here cover selector compilation and the structural failures of
//! feed discovery.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid feed script pattern: {pattern} - {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Inventory feed script matching '{pattern}' not found on {base_url}")]
    FeedScriptNotFound { pattern: String, base_url: String },

    #[error("Unexpected inventory response from {url}: no JSONP-wrapped object")]
    MalformedFeedResponse { url: String },

    #[error("Inventory feed payload from {url} could not be decoded: {reason}")]
    FeedDecodeFailed { url: String, reason: String },

    #[error("URL resolution failed: {url} - {reason}")]
    UrlResolutionFailed {
        url: String,
        reason: String,
        base_url: Option<String>,
    },
}

impl ParsingError {
    pub fn invalid_selector(selector: &str, reason: &str) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn feed_script_not_found(pattern: &str, base_url: &str) -> Self {
        Self::FeedScriptNotFound {
            pattern: pattern.to_string(),
            base_url: base_url.to_string(),
        }
    }

    pub fn malformed_feed_response(url: &str) -> Self {
        Self::MalformedFeedResponse {
            url: url.to_string(),
        }
    }

    /// Short name of the pipeline stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidSelector { .. } | Self::InvalidPattern { .. } => "configuration",
            Self::FeedScriptNotFound { .. } | Self::UrlResolutionFailed { .. } => "feed discovery",
            Self::MalformedFeedResponse { .. } | Self::FeedDecodeFailed { .. } => "feed decoding",
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_url() {
        let err = ParsingError::malformed_feed_response("https://www.pdxmotors.com/feed?pn=1");
        assert!(err.to_string().contains("https://www.pdxmotors.com/feed?pn=1"));
        assert_eq!(err.stage(), "feed decoding");

        let err = ParsingError::feed_script_not_found("/inv", "https://www.pdxmotors.com/inventory/");
        assert!(err.to_string().contains("not found"));
        assert_eq!(err.stage(), "feed discovery");
    }
}
