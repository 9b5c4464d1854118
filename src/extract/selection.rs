use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive bounds a price is expected to fall within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlausibleRange {
    pub min: f64,
    pub max: f64,
}

impl PlausibleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

impl fmt::Display for PlausibleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub price: f64,
    /// True when no candidate satisfied the range and one was picked anyway.
    pub degraded: bool,
}

/// Picks the likely true price among the candidates found on a page.
pub trait CandidateSelector: Send + Sync {
    fn select(&self, candidates: &[f64], range: Option<&PlausibleRange>) -> Option<Selection>;
}

/// First candidate inside the range, else the first candidate overall.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstInRange;

impl CandidateSelector for FirstInRange {
    fn select(&self, candidates: &[f64], range: Option<&PlausibleRange>) -> Option<Selection> {
        let first = *candidates.first()?;

        let Some(range) = range else {
            return Some(Selection { price: first, degraded: false });
        };

        match candidates.iter().copied().find(|price| range.contains(*price)) {
            Some(price) => Some(Selection { price, degraded: false }),
            None => Some(Selection { price: first, degraded: true }),
        }
    }
}

impl<F> CandidateSelector for F
where
    F: Fn(&[f64], Option<&PlausibleRange>) -> Option<Selection> + Send + Sync,
{
    fn select(&self, candidates: &[f64], range: Option<&PlausibleRange>) -> Option<Selection> {
        self(candidates, range)
    }
}
