use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

use crate::catalog::Catalog;
use crate::config::ScraperConfig;
use crate::extract::CandidateSelector;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::sources::{PriceResult, SourceAdapter, Vendor};
use crate::utils::error::Result;

/// A price that was found, keyed by item id in [`PriceWatcher::prices`].
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPrice {
    pub price: f64,
    pub name: String,
}

/// Resolves catalog items through the adapter of their vendor.
pub struct PriceWatcher {
    catalog: Catalog,
    adapters: Vec<SourceAdapter>,
    max_concurrent_checks: usize,
}

impl PriceWatcher {
    pub fn new(catalog: Catalog, fetcher: Arc<dyn PageFetcher>, max_concurrent_checks: usize) -> Result<Self> {
        let adapters = Vendor::ALL
            .iter()
            .map(|vendor| SourceAdapter::new(*vendor, &catalog, fetcher.clone()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            catalog,
            adapters,
            max_concurrent_checks: max_concurrent_checks.max(1),
        })
    }

    /// Watcher backed by the HTTP fetcher.
    pub fn from_config(catalog: Catalog, config: &ScraperConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config)?);
        Self::new(catalog, fetcher, config.max_concurrent_checks)
    }

    pub fn with_selector(mut self, selector: Arc<dyn CandidateSelector>) -> Self {
        self.adapters = self
            .adapters
            .into_iter()
            .map(|adapter| adapter.with_selector(selector.clone()))
            .collect();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn resolve(&self, item_id: &str) -> PriceResult {
        if let Err(e) = self.catalog.require(item_id) {
            error!(item = item_id, kind = "unknown_identifier", "{}", e);
            return PriceResult::missing(item_id, item_id);
        }

        match self.adapters.iter().find(|adapter| adapter.handles(item_id)) {
            Some(adapter) => adapter.resolve(item_id).await,
            None => PriceResult::missing(item_id, item_id),
        }
    }

    /// Resolve `ids` with at most `max_concurrent_checks` fetches in flight.
    /// Results come back in the order of `ids`, not completion order.
    pub async fn resolve_many<I, S>(&self, ids: I) -> Vec<PriceResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
        info!(items = ids.len(), concurrency = self.max_concurrent_checks, "Resolving prices");

        stream::iter(ids.iter())
            .map(|id| self.resolve(id))
            .buffered(self.max_concurrent_checks)
            .collect()
            .await
    }

    /// Resolve every catalog item in catalog order.
    pub async fn resolve_all(&self) -> Vec<PriceResult> {
        let ids: Vec<String> = self.catalog.ids().map(str::to_string).collect();
        self.resolve_many(ids).await
    }

    /// Prices that were found, keyed by item id.
    pub async fn prices(&self) -> BTreeMap<String, FoundPrice> {
        self.resolve_all()
            .await
            .into_iter()
            .filter_map(|result| {
                let price = result.price?;
                Some((result.id, FoundPrice { price, name: result.display_name }))
            })
            .collect()
    }
}
