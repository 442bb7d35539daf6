//! Errors raised while discovering inventory links.

use thiserror::Error;

use crate::infrastructure::{FetchError, ParsingError};

/// Failures that abort inventory discovery.
///
/// Discovery is all-or-nothing: any of these loses every page fetched so far.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Failed to fetch inventory listing page: {0}")]
    BasePageFetch(#[source] FetchError),

    #[error("Failed to fetch inventory feed page {page}: {source}")]
    FeedFetch {
        page: u64,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

impl InventoryError {
    /// Short name of the discovery stage that failed, for diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::BasePageFetch(_) => "listing page fetch",
            Self::FeedFetch { .. } => "feed page fetch",
            Self::Parsing(err) => err.stage(),
        }
    }

    pub fn is_feed_script_not_found(&self) -> bool {
        matches!(self, Self::Parsing(ParsingError::FeedScriptNotFound { .. }))
    }

    pub fn is_malformed_feed_response(&self) -> bool {
        matches!(self, Self::Parsing(ParsingError::MalformedFeedResponse { .. }))
    }
}
