//! Detail page collection
//!
//! Fetches each vehicle detail page and runs the detail extractor over it.
//! A page that cannot be fetched still yields a record (the empty one), so
//! the output keeps one entry per requested URL.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::VehicleDetails;
use crate::infrastructure::{DocumentFetcher, FetchError, VehicleDetailParser};

pub struct DetailCollector {
    fetcher: Arc<dyn DocumentFetcher>,
    parser: VehicleDetailParser,
}

impl DetailCollector {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, parser: VehicleDetailParser) -> Self {
        Self { fetcher, parser }
    }

    /// Fetch one detail page and extract its fields.
    pub async fn collect(&self, url: &str) -> Result<VehicleDetails, FetchError> {
        let document = self.fetcher.fetch_text(url).await?;
        let details = self.parser.extract_document(&document);
        debug!("Extracted {} fields from {}", details.field_count(), url);
        Ok(details)
    }

    /// Collect every URL in order. Fetch failures are logged and recorded as
    /// empty records.
    pub async fn collect_all<S: AsRef<str>>(&self, urls: &[S]) -> Vec<VehicleDetails> {
        let mut records = Vec::with_capacity(urls.len());
        let mut failures = 0usize;

        for url in urls {
            let url = url.as_ref();
            match self.collect(url).await {
                Ok(details) => records.push(details),
                Err(e) => {
                    warn!("Failed to collect vehicle details from {}: {}", url, e);
                    failures += 1;
                    records.push(VehicleDetails::default());
                }
            }
        }

        info!(
            "Collected {} vehicle records ({} failed)",
            records.len(),
            failures
        );
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::StaticFetcher;

    const DETAIL_URL: &str = "https://www.pdxmotors.com/inventory/ford/f150/111/";

    fn collector(fetcher: StaticFetcher) -> DetailCollector {
        DetailCollector::new(Arc::new(fetcher), VehicleDetailParser::new().unwrap())
    }

    #[tokio::test]
    async fn test_collect_extracts_fields() {
        let fetcher = StaticFetcher::new().with_document(
            DETAIL_URL,
            r#"<html><body><h1 class="h4 title"> 2019 Ford F150 </h1></body></html>"#,
        );

        let details = collector(fetcher).collect(DETAIL_URL).await.unwrap();
        assert_eq!(details.title.as_deref(), Some("2019 Ford F150"));
        assert!(details.price.is_none());
    }

    #[tokio::test]
    async fn test_collect_propagates_fetch_error() {
        let err = collector(StaticFetcher::new())
            .collect(DETAIL_URL)
            .await
            .unwrap_err();
        assert_eq!(err.url(), DETAIL_URL);
    }

    #[tokio::test]
    async fn test_collect_all_keeps_one_record_per_url() {
        let fetcher = StaticFetcher::new().with_document(
            DETAIL_URL,
            r#"<h1 class="h4 title">Ford F150</h1>"#,
        );
        let missing = "https://www.pdxmotors.com/inventory/tesla/model-x/222/";

        let records = collector(fetcher).collect_all(&[missing, DETAIL_URL][..]).await;
        assert_eq!(records.len(), 2);
        assert!(records[0].is_empty());
        assert_eq!(records[1].title.as_deref(), Some("Ford F150"));
    }
}
