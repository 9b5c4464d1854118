// Price extraction pipeline: structural lookup, heuristic fallback, text parsing
pub mod fallback;
pub mod price;
pub mod selection;
pub mod structural;

pub use fallback::{CandidateScope, FallbackExtractor, FallbackScan};
pub use price::PriceParser;
pub use selection::{CandidateSelector, FirstInRange, PlausibleRange, Selection};
pub use structural::{Locator, LocatorKind, StructuralExtractor, StructuralMiss, StructuralOutcome};
