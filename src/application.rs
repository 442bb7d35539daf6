//! Application layer module
//!
//! Orchestrates fetching and parsing: inventory link discovery, detail
//! collection and record export.

pub mod detail_collector;
pub mod inventory_error;
pub mod inventory_export;
pub mod inventory_paginator;

pub use detail_collector::DetailCollector;
pub use inventory_error::InventoryError;
pub use inventory_export::{inventory_to_json, save_inventory_json};
pub use inventory_paginator::{InventoryPaginator, PaginatorConfig};
