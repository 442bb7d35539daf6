//! HTML parsing infrastructure for vehicle detail pages and the inventory feed
//!
//! Parsers compile their selectors once and operate on already-fetched
//! documents; none of them perform network access.

pub mod config;
pub mod context;
pub mod inventory_feed_parser;
pub mod vehicle_detail_parser;

pub use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
pub use config::{DetailSelectors, FeedLocatorConfig, ParsingConfig};
pub use context::{DetailParseContext, ListingParseContext};
pub use inventory_feed_parser::{unwrap_jsonp, FeedEndpoint, InventoryFeedParser};
pub use vehicle_detail_parser::VehicleDetailParser;

use scraper::{Html, Selector};

/// Parser trait with context support
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;
}

/// Compile one selector string, mapping failures into `ParsingError`.
pub(crate) fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, &e.to_string()))
}
