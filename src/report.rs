use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sources::PriceResult;
use crate::utils::error::Result;

/// Snapshot of one run, written as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    /// At least one price was found.
    pub success: bool,
    pub results: Vec<PriceResult>,
}

impl Report {
    pub fn new(results: Vec<PriceResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            success: results.iter().any(PriceResult::is_found),
            results,
        }
    }

    pub fn missing(&self) -> impl Iterator<Item = &PriceResult> {
        self.results.iter().filter(|result| !result.is_found())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
