use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extract::StructuralMiss;

/// Which strategy produced a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    Structural,
    Fallback,
    None,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PriceSource::Structural => "structural",
            PriceSource::Fallback => "fallback",
            PriceSource::None => "none",
        };
        f.write_str(s)
    }
}

/// Output of resolving one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    pub id: String,
    pub display_name: String,
    pub price: Option<f64>,
    pub source: PriceSource,
}

impl PriceResult {
    pub fn found(id: &str, display_name: &str, price: f64, source: PriceSource) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            price: Some(price),
            source,
        }
    }

    pub fn missing(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            price: None,
            source: PriceSource::None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.price.is_some()
    }

    /// Line printed by the CLI for this result.
    pub fn summary(&self) -> String {
        match self.price {
            Some(price) => format!("The current {} price is: £{:.2}", self.display_name, price),
            None => format!("Could not find the price for {}", self.display_name),
        }
    }
}

/// How extraction went for a page that was fetched successfully.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Structural(f64),
    Fallback {
        price: f64,
        miss: StructuralMiss,
        /// No candidate was inside the plausible range.
        degraded: bool,
    },
    Exhausted {
        miss: StructuralMiss,
    },
}

impl Extraction {
    pub fn price(&self) -> Option<f64> {
        match self {
            Extraction::Structural(price) | Extraction::Fallback { price, .. } => Some(*price),
            Extraction::Exhausted { .. } => None,
        }
    }

    pub fn source(&self) -> PriceSource {
        match self {
            Extraction::Structural(_) => PriceSource::Structural,
            Extraction::Fallback { .. } => PriceSource::Fallback,
            Extraction::Exhausted { .. } => PriceSource::None,
        }
    }
}
