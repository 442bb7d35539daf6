//! Inventory link discovery
//!
//! Locates the JSONP feed script on the listing page, replays it page by page
//! and turns every listed vehicle into its canonical detail-page URL.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};

use super::InventoryError;
use crate::domain::{InventoryFeedPage, PagePlan, RawVehicle, VehicleLink};
use crate::infrastructure::config::{defaults, AppConfig};
use crate::infrastructure::{DocumentFetcher, FeedEndpoint, InventoryFeedParser};

#[derive(Debug, Clone)]
pub struct PaginatorConfig {
    /// Scheme and host for the derived detail links; `None` uses the
    /// listing page's own origin
    pub site_origin: Option<String>,

    /// Feed pages in flight at once after page 0; results are always
    /// reassembled in page order
    pub page_concurrency: usize,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            site_origin: None,
            page_concurrency: defaults::PAGE_CONCURRENCY,
        }
    }
}

impl PaginatorConfig {
    /// Paginator settings from the loaded configuration. Concurrency is
    /// clamped to `1..=MAX_PAGE_CONCURRENCY`.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            site_origin: config.site.origin.clone(),
            page_concurrency: config
                .crawl
                .page_concurrency
                .clamp(1, defaults::MAX_PAGE_CONCURRENCY),
        }
    }
}

pub struct InventoryPaginator {
    fetcher: Arc<dyn DocumentFetcher>,
    feed_parser: InventoryFeedParser,
    config: PaginatorConfig,
}

impl InventoryPaginator {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        feed_parser: InventoryFeedParser,
        config: PaginatorConfig,
    ) -> Self {
        Self {
            fetcher,
            feed_parser,
            config,
        }
    }

    /// Fetch the listing page at `base_url`, then discover every vehicle link.
    pub async fn discover_links(&self, base_url: &str) -> Result<Vec<String>, InventoryError> {
        info!("Discovering inventory from {}", base_url);
        let base_document = self
            .fetcher
            .fetch_text(base_url)
            .await
            .map_err(InventoryError::BasePageFetch)?;

        self.list_links(&base_document, base_url).await
    }

    /// Ordered detail-page URLs for the whole inventory advertised by
    /// `base_document` (the listing page markup fetched from `base_url`).
    pub async fn list_links(
        &self,
        base_document: &str,
        base_url: &str,
    ) -> Result<Vec<String>, InventoryError> {
        let endpoint = self.feed_parser.locate_feed(base_document, base_url)?;
        let vehicles = self.collect_vehicles(&endpoint).await?;

        let origin = self
            .config
            .site_origin
            .as_deref()
            .unwrap_or_else(|| endpoint.listing_origin());
        let links: Vec<String> = vehicles
            .iter()
            .map(|vehicle| String::from(VehicleLink::from_vehicle(origin, vehicle)))
            .collect();

        info!("Discovered {} vehicle links", links.len());
        Ok(links)
    }

    /// Every raw vehicle record across all feed pages, in page order.
    pub async fn collect_vehicles(
        &self,
        endpoint: &FeedEndpoint,
    ) -> Result<Vec<RawVehicle>, InventoryError> {
        let first_page = self.fetch_page(endpoint, 0).await?;
        let plan = PagePlan::from_first_page(first_page.total_records(), first_page.per_page());
        info!(
            "Inventory feed reports {} vehicles, {} per page, {} pages",
            plan.total_records, plan.per_page, plan.page_count
        );

        let mut vehicles = first_page.vehicles;
        let remaining: Vec<InventoryFeedPage> = stream::iter(plan.remaining_pages())
            .map(|page| self.fetch_page(endpoint, page))
            .buffered(self.config.page_concurrency.max(1))
            .try_collect()
            .await?;

        for page in remaining {
            vehicles.extend(page.vehicles);
        }

        Ok(vehicles)
    }

    async fn fetch_page(
        &self,
        endpoint: &FeedEndpoint,
        page: u64,
    ) -> Result<InventoryFeedPage, InventoryError> {
        let url = endpoint.page_url(page);
        debug!("Fetching inventory feed page {}: {}", page, url);

        let body = self
            .fetcher
            .fetch_text(url.as_str())
            .await
            .map_err(|source| InventoryError::FeedFetch { page, source })?;

        let feed_page = self.feed_parser.decode_page(&body, url.as_str())?;
        debug!("Feed page {} listed {} vehicles", page, feed_page.vehicles.len());
        Ok(feed_page)
    }
}
