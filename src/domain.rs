//! Domain module - vehicle records, feed pages and link derivation
//!
//! Everything here is pure data and arithmetic; no I/O happens in the
//! domain layer.

pub mod inventory_feed;
pub mod pagination;
pub mod vehicle;
pub mod vehicle_link;

pub use inventory_feed::{InventoryFeedPage, RawVehicle};
pub use pagination::{page_count, PagePlan};
pub use vehicle::{VehicleDetails, VehicleSpecs};
pub use vehicle_link::{slugify, VehicleLink};
