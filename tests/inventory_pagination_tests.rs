//! Inventory link discovery against captured listing and feed pages
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use pdx_inventory_lib::application::{InventoryError, InventoryPaginator, PaginatorConfig};
use pdx_inventory_lib::infrastructure::{
    DocumentFetcher, FetchError, InventoryFeedParser, ParsingError, StaticFetcher,
};

const BASE_URL: &str = "https://www.pdxmotors.com/inventory/";
const LISTING: &str = include_str!("fixtures/sample_inventory.html");
const PAGE_0: &str = include_str!("fixtures/sample_inventory_page0.jsonp");
const PAGE_1: &str = include_str!("fixtures/sample_inventory_page1.jsonp");

const PAGE_0_URL: &str =
    "https://www.pdxmotors.com/inv-scripts-v2/inv/vehicles?callback=jsonpCallback&pn=0&pageSize=2";
const PAGE_1_URL: &str =
    "https://www.pdxmotors.com/inv-scripts-v2/inv/vehicles?callback=jsonpCallback&pn=1&pageSize=2";

const EXPECTED_LINKS: [&str; 3] = [
    "https://www.pdxmotors.com/inventory/ford/f150/111/",
    "https://www.pdxmotors.com/inventory/tesla/model-x/222/",
    "https://www.pdxmotors.com/inventory/mercedes-benz/g-class/333/",
];

fn sample_fetcher() -> StaticFetcher {
    StaticFetcher::new()
        .with_document(BASE_URL, LISTING)
        .with_document(PAGE_0_URL, PAGE_0)
        .with_document(PAGE_1_URL, PAGE_1)
}

fn paginator_with(fetcher: Arc<dyn DocumentFetcher>, page_concurrency: usize) -> InventoryPaginator {
    InventoryPaginator::new(
        fetcher,
        InventoryFeedParser::new().unwrap(),
        PaginatorConfig {
            page_concurrency,
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn sample_inventory_yields_links_in_feed_order() {
    let fetcher = Arc::new(sample_fetcher());
    let paginator = paginator_with(fetcher.clone(), 1);

    let links = paginator.list_links(LISTING, BASE_URL).await.unwrap();

    assert_eq!(links, EXPECTED_LINKS);
    assert_eq!(fetcher.requested_urls(), vec![PAGE_0_URL, PAGE_1_URL]);
}

#[tokio::test]
async fn discover_links_fetches_listing_page_first() {
    let fetcher = Arc::new(sample_fetcher());
    let paginator = paginator_with(fetcher.clone(), 1);

    let links = paginator.discover_links(BASE_URL).await.unwrap();

    assert_eq!(links, EXPECTED_LINKS);
    assert_eq!(
        fetcher.requested_urls(),
        vec![BASE_URL, PAGE_0_URL, PAGE_1_URL]
    );
}

#[tokio::test]
async fn links_follow_the_listing_page_host() {
    let fetcher = StaticFetcher::new()
        .with_document("https://cars.dealer.example/inventory/", LISTING)
        .with_document(
            "https://cars.dealer.example/inv-scripts-v2/inv/vehicles?callback=jsonpCallback&pn=0&pageSize=2",
            PAGE_0,
        )
        .with_document(
            "https://cars.dealer.example/inv-scripts-v2/inv/vehicles?callback=jsonpCallback&pn=1&pageSize=2",
            PAGE_1,
        );
    let paginator = paginator_with(Arc::new(fetcher), 1);

    let links = paginator
        .discover_links("https://cars.dealer.example/inventory/")
        .await
        .unwrap();

    assert_eq!(
        links,
        vec![
            "https://cars.dealer.example/inventory/ford/f150/111/",
            "https://cars.dealer.example/inventory/tesla/model-x/222/",
            "https://cars.dealer.example/inventory/mercedes-benz/g-class/333/",
        ]
    );
}

#[tokio::test]
async fn listing_without_feed_script_is_rejected() {
    let paginator = paginator_with(Arc::new(StaticFetcher::new()), 1);
    let listing = r#"<html><body><script src="/assets/js/site.min.js"></script></body></html>"#;

    let err = paginator.list_links(listing, BASE_URL).await.unwrap_err();

    assert!(err.is_feed_script_not_found());
    assert_eq!(err.stage(), "feed discovery");
}

#[tokio::test]
async fn feed_page_without_callback_object_is_malformed() {
    let fetcher = StaticFetcher::new().with_document(PAGE_0_URL, "<html>Service Unavailable</html>");
    let paginator = paginator_with(Arc::new(fetcher), 1);

    let err = paginator.list_links(LISTING, BASE_URL).await.unwrap_err();

    assert!(err.is_malformed_feed_response());
    assert!(matches!(
        err,
        InventoryError::Parsing(ParsingError::MalformedFeedResponse { ref url }) if url == PAGE_0_URL
    ));
}

#[tokio::test]
async fn feed_payload_that_is_not_json_fails_to_decode() {
    let fetcher = StaticFetcher::new().with_document(PAGE_0_URL, "jsonpCallback({Vehicles: nope});");
    let paginator = paginator_with(Arc::new(fetcher), 1);

    let err = paginator.list_links(LISTING, BASE_URL).await.unwrap_err();

    assert!(matches!(
        err,
        InventoryError::Parsing(ParsingError::FeedDecodeFailed { .. })
    ));
    assert_eq!(err.stage(), "feed decoding");
}

#[tokio::test]
async fn missing_total_uses_first_page_only() {
    let fetcher = StaticFetcher::new().with_document(
        PAGE_0_URL,
        r#"jsonpCallback({"Vehicles": [{"Make": "Ford", "Model": "F150", "StockNumber": "111"}]});"#,
    );
    let fetcher = Arc::new(fetcher);
    let paginator = paginator_with(fetcher.clone(), 1);

    let links = paginator.list_links(LISTING, BASE_URL).await.unwrap();

    assert_eq!(links, vec![EXPECTED_LINKS[0]]);
    assert_eq!(fetcher.requested_urls(), vec![PAGE_0_URL]);
}

/// Serves the sample pages, answering page 1 slower than page 2.
struct DelayedFetcher {
    inner: StaticFetcher,
}

#[async_trait]
impl DocumentFetcher for DelayedFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        if url.contains("pn=1") {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.inner.fetch_text(url).await
    }
}

#[tokio::test]
async fn concurrent_pages_keep_page_order() {
    let page_2_url =
        "https://www.pdxmotors.com/inv-scripts-v2/inv/vehicles?callback=jsonpCallback&pn=2&pageSize=2";
    let inner = StaticFetcher::new()
        .with_document(
            PAGE_0_URL,
            r#"jsonpCallback({"Vehicles": [{"Make": "Ford", "Model": "F150", "StockNumber": "111"}, {"Make": "Tesla", "Model": "Model X", "StockNumber": "222"}], "TotalRecordCount": 5});"#,
        )
        .with_document(PAGE_1_URL, PAGE_1)
        .with_document(
            page_2_url,
            r#"jsonpCallback({"Vehicles": [{"Make": "Porsche", "Model": "911 GT3", "StockNumber": "444"}], "TotalRecordCount": 5});"#,
        );
    let paginator = paginator_with(Arc::new(DelayedFetcher { inner }), 4);

    let links = paginator.list_links(LISTING, BASE_URL).await.unwrap();

    assert_eq!(
        links,
        vec![
            EXPECTED_LINKS[0],
            EXPECTED_LINKS[1],
            EXPECTED_LINKS[2],
            "https://www.pdxmotors.com/inventory/porsche/911-gt3/444/",
        ]
    );
}

#[tokio::test]
async fn failed_later_page_aborts_discovery() {
    let fetcher = StaticFetcher::new().with_document(PAGE_0_URL, PAGE_0);
    let paginator = paginator_with(Arc::new(fetcher), 1);

    let err = paginator.list_links(LISTING, BASE_URL).await.unwrap_err();

    assert!(matches!(
        err,
        InventoryError::FeedFetch { page: 1, source: FetchError::NotFound { .. } }
    ));
}
