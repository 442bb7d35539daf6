//! Infrastructure layer for fetching, parsing, configuration and logging
//!
//! This module provides the document fetch capability (HTTP and in-memory),
//! the HTML/JSONP parsers, configuration loading and logging setup.

pub mod config;
pub mod fetcher;
pub mod logging;
pub mod parsing;
pub mod parsing_error;
pub mod simple_http_client;

// Re-export commonly used items
pub use config::{pdx_motors, AppConfig, ConfigManager};
pub use fetcher::{DocumentFetcher, FetchError, StaticFetcher};
pub use logging::{get_log_directory, init_logging_with_config};
pub use parsing::{
    FeedEndpoint, InventoryFeedParser, ParsingConfig, ParsingError, ParsingResult,
    VehicleDetailParser,
};
pub use simple_http_client::{HttpClient, HttpClientConfig};
