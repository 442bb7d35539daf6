//! Decoded pages of the JSONP inventory feed.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One page of the inventory feed after the JSONP envelope is removed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryFeedPage {
    #[serde(rename = "Vehicles", default)]
    pub vehicles: Vec<RawVehicle>,

    /// Total vehicles across every page. Some feed builds omit it.
    #[serde(rename = "TotalRecordCount", default)]
    pub total_record_count: Option<u64>,
}

impl InventoryFeedPage {
    /// Page size as observed on this page.
    pub fn per_page(&self) -> usize {
        self.vehicles.len()
    }

    /// `TotalRecordCount`, falling back to this page's vehicle count.
    pub fn total_records(&self) -> u64 {
        self.total_record_count
            .unwrap_or(self.vehicles.len() as u64)
    }
}

/// Identifying fields of a vehicle as listed by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawVehicle {
    #[serde(rename = "Make")]
    pub make: String,

    #[serde(rename = "Model")]
    pub model: String,

    /// Kept verbatim; the feed sends it as a string or a bare number.
    #[serde(rename = "StockNumber", deserialize_with = "stock_number_as_text")]
    pub stock_number: String,
}

impl RawVehicle {
    pub fn new(make: &str, model: &str, stock_number: &str) -> Self {
        Self {
            make: make.to_string(),
            model: model.to_string(),
            stock_number: stock_number.to_string(),
        }
    }
}

fn stock_number_as_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "StockNumber must be a string or number, got {other}"
        ))),
    }
}
