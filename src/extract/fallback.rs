use scraper::{ElementRef, Html, Selector};

use super::price::PriceParser;
use super::selection::{CandidateSelector, PlausibleRange, Selection};
use super::structural::cell_text;
use crate::utils::error::{AppError, Result};

/// Elements whose text is never rendered as page content.
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Where the candidates of a fallback scan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateScope {
    TableCells,
    Document,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackScan {
    pub scope: CandidateScope,
    pub candidates: Vec<f64>,
}

/// Pattern-matches currency text anywhere on the page.
#[derive(Debug, Clone)]
pub struct FallbackExtractor {
    cells: Selector,
    parser: PriceParser,
}

impl FallbackExtractor {
    pub fn new(parser: PriceParser) -> Result<Self> {
        let cells = Selector::parse("td, th").map_err(|e| AppError::InvalidSelector {
            selector: format!("td, th ({:?})", e),
        })?;
        Ok(Self { cells, parser })
    }

    /// Collect every currency candidate in document order.
    ///
    /// Table cells are scanned first; the whole document's text is only
    /// consulted when no cell holds a price.
    pub fn scan(&self, document: &Html) -> FallbackScan {
        let candidates: Vec<f64> = document
            .select(&self.cells)
            .flat_map(|cell| self.parser.parse_all(&cell_text(cell)))
            .collect();

        if !candidates.is_empty() {
            return FallbackScan { scope: CandidateScope::TableCells, candidates };
        }

        let candidates = document
            .root_element()
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let parent = node.parent().and_then(ElementRef::wrap)?;
                if NON_CONTENT_TAGS.contains(&parent.value().name()) {
                    return None;
                }
                Some(self.parser.parse_all(text))
            })
            .flatten()
            .collect();

        FallbackScan { scope: CandidateScope::Document, candidates }
    }

    pub fn extract(
        &self,
        document: &Html,
        range: Option<&PlausibleRange>,
        selector: &dyn CandidateSelector,
    ) -> (FallbackScan, Option<Selection>) {
        let scan = self.scan(document);
        let selection = selector.select(&scan.candidates, range);
        (scan, selection)
    }
}
