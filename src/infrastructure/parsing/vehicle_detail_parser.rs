//! Vehicle detail page parser
//!
//! Every lookup is best-effort: markup that is missing simply leaves the
//! corresponding field out of the record. Values are whitespace-trimmed text
//! and nothing else; no currency, mileage or case normalization happens here.

use super::{compile_selector, ContextualParser, DetailParseContext, ParsingResult};
use crate::domain::{VehicleDetails, VehicleSpecs};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Parser for extracting vehicle fields from detail pages
#[derive(Debug)]
pub struct VehicleDetailParser {
    title_selector: Selector,
    price_selector: Selector,
    mileage_container_selector: Selector,
    vin_container_selector: Selector,
    field_value_selector: Selector,
    spec_list_selector: Selector,
    spec_item_selector: Selector,
    spec_term_selector: Selector,
    spec_description_selector: Selector,
    description_meta_selector: Selector,
}

impl VehicleDetailParser {
    /// Create a new detail parser with default selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&super::config::DetailSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &super::config::DetailSelectors) -> ParsingResult<Self> {
        Ok(Self {
            title_selector: compile_selector(&selectors.title)?,
            price_selector: compile_selector(&selectors.price)?,
            mileage_container_selector: compile_selector(&selectors.mileage_container)?,
            vin_container_selector: compile_selector(&selectors.vin_container)?,
            field_value_selector: compile_selector(&selectors.field_value)?,
            spec_list_selector: compile_selector(&selectors.spec_list)?,
            spec_item_selector: compile_selector(&selectors.spec_item)?,
            spec_term_selector: compile_selector(&selectors.spec_term)?,
            spec_description_selector: compile_selector(&selectors.spec_description)?,
            description_meta_selector: compile_selector(&selectors.description_meta)?,
        })
    }

    /// Parse raw markup and extract the vehicle fields.
    pub fn extract_document(&self, document: &str) -> VehicleDetails {
        self.extract(&Html::parse_document(document))
    }

    /// Extract the vehicle fields from a parsed document.
    pub fn extract(&self, html: &Html) -> VehicleDetails {
        VehicleDetails {
            title: Self::first_text(html, &self.title_selector),
            price: Self::first_text(html, &self.price_selector),
            mileage: self.nested_value(html, &self.mileage_container_selector),
            vin: self.nested_value(html, &self.vin_container_selector),
            specs: self.extract_specs(html),
            description: self.extract_description(html),
        }
    }

    /// Trimmed text of the first element matching `selector`
    fn first_text(html: &Html, selector: &Selector) -> Option<String> {
        html.select(selector).next().map(|element| Self::element_text(&element))
    }

    /// Value element nested inside the first matching field container
    fn nested_value(&self, html: &Html, container_selector: &Selector) -> Option<String> {
        html.select(container_selector)
            .next()?
            .select(&self.field_value_selector)
            .next()
            .map(|element| Self::element_text(&element))
    }

    /// Term/description pairs of the vehicle-info list; `None` when no
    /// complete pair exists.
    fn extract_specs(&self, html: &Html) -> Option<VehicleSpecs> {
        let spec_list = html.select(&self.spec_list_selector).next()?;
        let mut specs = VehicleSpecs::new();

        for item in spec_list.select(&self.spec_item_selector) {
            let term = item.select(&self.spec_term_selector).next();
            let description = item.select(&self.spec_description_selector).next();

            match (term, description) {
                (Some(term), Some(description)) => {
                    specs.insert(Self::element_text(&term), Self::element_text(&description));
                }
                _ => debug!("Skipping incomplete spec item"),
            }
        }

        if specs.is_empty() { None } else { Some(specs) }
    }

    /// Trimmed `content` of the Open Graph description meta element; an
    /// absent or empty attribute means no description
    fn extract_description(&self, html: &Html) -> Option<String> {
        html.select(&self.description_meta_selector)
            .next()?
            .value()
            .attr("content")
            .filter(|content| !content.is_empty())
            .map(|content| content.trim().to_string())
    }

    fn element_text(element: &ElementRef) -> String {
        element.text().collect::<String>().trim().to_string()
    }
}

impl ContextualParser for VehicleDetailParser {
    type Output = VehicleDetails;
    type Context = DetailParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        let details = self.extract(html);

        if details.is_empty() {
            debug!("No vehicle fields found on {}", context.url);
        } else {
            debug!(
                "Extracted {} vehicle fields from {}",
                details.field_count(),
                context.url
            );
        }

        Ok(details)
    }
}
