use scraper::Html;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};

use super::result::{Extraction, PriceResult};
use super::vendor::Vendor;
use crate::catalog::{Catalog, ItemConfig};
use crate::extract::{
    CandidateScope, CandidateSelector, FallbackExtractor, FirstInRange, PriceParser, StructuralExtractor,
};
use crate::fetcher::{FetchRequest, PageFetcher};
use crate::utils::error::Result;

/// Fetch → structural extraction → fallback extraction, for one vendor.
///
/// Every failure is reduced to a [`PriceResult`] with no price; nothing
/// escapes `resolve` as an error.
pub struct SourceAdapter {
    vendor: Vendor,
    items: Catalog,
    fetcher: Arc<dyn PageFetcher>,
    structural: StructuralExtractor,
    fallback: FallbackExtractor,
    selector: Arc<dyn CandidateSelector>,
}

impl SourceAdapter {
    /// Adapter for the items of `catalog` belonging to `vendor`.
    pub fn new(vendor: Vendor, catalog: &Catalog, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let parser = PriceParser::new();
        Ok(Self {
            vendor,
            items: catalog.for_vendor(vendor),
            fetcher,
            structural: StructuralExtractor::new(vendor.profile().table_selector, parser.clone())?,
            fallback: FallbackExtractor::new(parser)?,
            selector: Arc::new(FirstInRange),
        })
    }

    pub fn with_selector(mut self, selector: Arc<dyn CandidateSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn items(&self) -> &Catalog {
        &self.items
    }

    pub fn handles(&self, item_id: &str) -> bool {
        self.items.contains(item_id)
    }

    pub async fn resolve(&self, item_id: &str) -> PriceResult {
        let item = match self.items.require(item_id) {
            Ok(item) => item,
            Err(e) => {
                error!(vendor = %self.vendor, item = item_id, kind = "unknown_identifier", "{}", e);
                return PriceResult::missing(item_id, item_id);
            }
        };

        let span = info_span!("resolve", vendor = %self.vendor, item = %item.id);
        self.resolve_item(item).instrument(span).await
    }

    async fn resolve_item(&self, item: &ItemConfig) -> PriceResult {
        info!(url = %item.url, "Fetching price page");
        let request = FetchRequest::new(&item.url).with_referer(item.referer());

        match self.fetcher.fetch(&request).await {
            Ok(page) => {
                debug!(
                    status = page.status,
                    final_url = %page.final_url,
                    response_time_ms = page.response_time_ms,
                    bytes = page.body.len(),
                    "Fetched price page"
                );
                self.extract(item, &page.body)
            }
            Err(e) => {
                error!(kind = "fetch_error", error = %e, "Error scraping price for {}", item.display_name);
                PriceResult::missing(&item.id, &item.display_name)
            }
        }
    }

    /// Extract a price from already fetched markup.
    pub fn extract(&self, item: &ItemConfig, markup: &str) -> PriceResult {
        let extraction = self.run_extraction(item, markup);

        match extraction.price() {
            Some(price) => {
                info!(price, source = %extraction.source(), "Successfully scraped {} price: £{}", item.display_name, price);
                PriceResult::found(&item.id, &item.display_name, price, extraction.source())
            }
            None => {
                error!(kind = "extraction_failed", "Failed to scrape {} price", item.display_name);
                PriceResult::missing(&item.id, &item.display_name)
            }
        }
    }

    fn run_extraction(&self, item: &ItemConfig, markup: &str) -> Extraction {
        let document = Html::parse_document(markup);

        let miss = match self.structural.extract(&document, &item.locator) {
            Ok(price) => {
                info!(price, locator = %item.locator, "Found {} price in table: £{}", item.display_name, price);
                return Extraction::Structural(price);
            }
            Err(miss) => miss,
        };
        warn!(reason = %miss, locator = %item.locator, "Structural lookup failed for {}", item.display_name);

        let (scan, selection) = self
            .fallback
            .extract(&document, item.plausible_range.as_ref(), self.selector.as_ref());

        let Some(selection) = selection else {
            warn!("No prices found on page");
            return Extraction::Exhausted { miss };
        };

        if scan.scope == CandidateScope::Document {
            info!("No prices in table cells, scanned page text");
        }
        info!(candidates = ?scan.candidates, "Found prices");

        if selection.degraded {
            match &item.plausible_range {
                Some(range) => warn!(
                    range = %range,
                    "No prices in {} range found. Using first price: £{}",
                    item.display_name,
                    selection.price
                ),
                None => warn!("Using first price: £{}", selection.price),
            }
        } else {
            warn!(price = selection.price, "Using fallback price for {}", item.display_name);
        }

        Extraction::Fallback {
            price: selection.price,
            miss,
            degraded: selection.degraded,
        }
    }
}
