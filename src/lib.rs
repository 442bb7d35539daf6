//! PDX Motors inventory scraper
//!
//! Discovers every vehicle listed in the dealer's inventory feed and
//! extracts the detail-page fields (title, price, mileage, VIN, spec list,
//! description) into plain records.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{DetailCollector, InventoryError, InventoryPaginator, PaginatorConfig};
pub use domain::{VehicleDetails, VehicleLink, VehicleSpecs};
pub use infrastructure::{
    DocumentFetcher, FetchError, HttpClient, InventoryFeedParser, ParsingError,
    VehicleDetailParser,
};
