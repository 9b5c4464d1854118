pub mod catalog;
pub mod config;
pub mod extract;
pub mod fetcher;
pub mod logging;
pub mod report;
pub mod sources;
pub mod utils;
pub mod watcher;

// Re-export commonly used types
pub use catalog::{Catalog, ItemConfig};
pub use config::AppConfig;
pub use sources::{PriceResult, PriceSource, SourceAdapter, Vendor};
pub use utils::error::{AppError, FetchError};
pub use watcher::PriceWatcher;

pub type Result<T> = std::result::Result<T, AppError>;
