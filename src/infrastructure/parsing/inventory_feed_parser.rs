//! Inventory listing page and JSONP feed parser
//!
//! The listing page embeds a `<script src=…>` pointing at the paginated
//! inventory feed. The feed answers with a JSON object wrapped in a callback
//! invocation, e.g. `jsonpCallback({"Vehicles": [...], ...});`.

use super::{
    compile_selector, ContextualParser, FeedLocatorConfig, ListingParseContext, ParsingError,
    ParsingResult,
};
use crate::domain::InventoryFeedPage;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Resolved feed script URL plus its query parameters, ready for replay
/// with different page numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEndpoint {
    script_url: Url,
    params: Vec<(String, String)>,
    page_param: String,
    listing_origin: String,
}

impl FeedEndpoint {
    pub fn new(script_url: Url, page_param: &str) -> Self {
        let params = script_url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Self {
            listing_origin: script_url.origin().ascii_serialization(),
            script_url,
            params,
            page_param: page_param.to_string(),
        }
    }

    /// Record the scheme and host of the listing page the script was found
    /// on. Defaults to the script's own origin.
    pub fn with_listing_origin(mut self, origin: impl Into<String>) -> Self {
        self.listing_origin = origin.into();
        self
    }

    pub fn script_url(&self) -> &Url {
        &self.script_url
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Scheme and host of the listing page, e.g. `https://www.pdxmotors.com`
    pub fn listing_origin(&self) -> &str {
        &self.listing_origin
    }

    /// Feed URL for `page`: the page parameter is overwritten in place (or
    /// appended when the script did not carry one), every other parameter
    /// keeps its position.
    pub fn page_url(&self, page: u64) -> Url {
        let page_value = page.to_string();
        let mut replaced = false;
        let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(self.params.len() + 1);

        for (key, value) in &self.params {
            if *key == self.page_param {
                if !replaced {
                    pairs.push((key.as_str(), page_value.as_str()));
                    replaced = true;
                }
            } else {
                pairs.push((key.as_str(), value.as_str()));
            }
        }
        if !replaced {
            pairs.push((self.page_param.as_str(), page_value.as_str()));
        }

        let mut url = self.script_url.clone();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url
    }
}

/// Parser locating the feed script and decoding feed pages
#[derive(Debug)]
pub struct InventoryFeedParser {
    script_selector: Selector,
    src_pattern: Regex,
    page_param: String,
}

impl InventoryFeedParser {
    /// Create a new feed parser with the default feed location
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&FeedLocatorConfig::default())
    }

    /// Create parser with custom feed location
    pub fn with_config(config: &FeedLocatorConfig) -> ParsingResult<Self> {
        let src_pattern =
            Regex::new(&config.script_src_pattern).map_err(|e| ParsingError::InvalidPattern {
                pattern: config.script_src_pattern.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            script_selector: compile_selector(&config.script_selector)?,
            src_pattern,
            page_param: config.page_param.clone(),
        })
    }

    /// Locate the feed script in a listing page and resolve it against `base_url`.
    pub fn locate_feed(&self, document: &str, base_url: &str) -> ParsingResult<FeedEndpoint> {
        let base_url = Url::parse(base_url).map_err(|e| ParsingError::UrlResolutionFailed {
            url: base_url.to_string(),
            reason: format!("Invalid base URL: {e}"),
            base_url: None,
        })?;

        let html = Html::parse_document(document);
        self.parse_with_context(&html, &ListingParseContext::new(base_url))
    }

    /// Unwrap and decode one JSONP feed response fetched from `url`.
    pub fn decode_page(&self, body: &str, url: &str) -> ParsingResult<InventoryFeedPage> {
        let payload = unwrap_jsonp(body).ok_or_else(|| ParsingError::malformed_feed_response(url))?;

        serde_json::from_str(payload).map_err(|e| ParsingError::FeedDecodeFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

impl ContextualParser for InventoryFeedParser {
    type Output = FeedEndpoint;
    type Context = ListingParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        let src = html
            .select(&self.script_selector)
            .filter_map(|script| script.value().attr("src"))
            .find(|src| self.src_pattern.is_match(src))
            .ok_or_else(|| {
                ParsingError::feed_script_not_found(self.src_pattern.as_str(), context.base_url.as_str())
            })?;

        let script_url = context
            .base_url
            .join(src)
            .map_err(|e| ParsingError::UrlResolutionFailed {
                url: src.to_string(),
                reason: format!("Failed to join URL: {e}"),
                base_url: Some(context.base_url.to_string()),
            })?;

        debug!("Found inventory feed script: {}", script_url);
        Ok(FeedEndpoint::new(script_url, &self.page_param)
            .with_listing_origin(context.base_url.origin().ascii_serialization()))
    }
}

/// Return the JSON object passed to the first callback invocation in `body`.
///
/// Scans from the first `(` that is followed (after whitespace) by `{` to its
/// balancing `)`. Parentheses inside JSON string literals are ignored. The
/// enclosed text must itself be a `{…}` object.
pub fn unwrap_jsonp(body: &str) -> Option<&str> {
    for (open, _) in body.match_indices('(') {
        let inner_start = open + 1;
        if !body[inner_start..].trim_start().starts_with('{') {
            continue;
        }

        let close = find_balancing_paren(body, inner_start)?;
        let inner = body[inner_start..close].trim();
        if inner.starts_with('{') && inner.ends_with('}') {
            return Some(inner);
        }
    }
    None
}

/// Byte index of the `)` closing a parenthesis opened just before `start`.
fn find_balancing_paren(body: &str, start: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in body[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}
