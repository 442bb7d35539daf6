//! Parsing configuration for HTML extraction
//!
//! Centralized configuration for CSS selectors and feed discovery.

use serde::{Deserialize, Serialize};

use crate::infrastructure::config::pdx_motors;

/// Main parsing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Vehicle detail page selectors
    pub detail_selectors: DetailSelectors,

    /// Inventory listing page feed discovery
    pub feed: FeedLocatorConfig,
}

/// CSS selectors for vehicle detail pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailSelectors {
    pub title: String,
    pub price: String,

    /// Containers whose nested `field_value` element holds the value
    pub mileage_container: String,
    pub vin_container: String,
    pub field_value: String,

    /// Definition list and its term/description items
    pub spec_list: String,
    pub spec_item: String,
    pub spec_term: String,
    pub spec_description: String,

    /// Meta element whose `content` attribute is the description
    pub description_meta: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            title: "h1.h4.title".to_string(),
            price: "span.dws-vdp-single-field-value-vehicleprice".to_string(),
            mileage_container: "p.dws-forms-mileage".to_string(),
            vin_container: "p.dws-forms-vin".to_string(),
            field_value: "span.dws-forms-value".to_string(),
            spec_list: "dl.vehicle-info".to_string(),
            spec_item: "div.info-item".to_string(),
            spec_term: "dt".to_string(),
            spec_description: "dd".to_string(),
            description_meta: "meta[property=\"og:description\"]".to_string(),
        }
    }
}

/// Feed script discovery on the inventory listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedLocatorConfig {
    /// Candidate script elements
    pub script_selector: String,

    /// Regex matched against each candidate's `src`
    pub script_src_pattern: String,

    /// Query parameter holding the page index
    pub page_param: String,
}

impl Default for FeedLocatorConfig {
    fn default() -> Self {
        Self {
            script_selector: "script[src]".to_string(),
            script_src_pattern: pdx_motors::FEED_SCRIPT_PATTERN.to_string(),
            page_param: pdx_motors::PAGE_PARAM.to_string(),
        }
    }
}
