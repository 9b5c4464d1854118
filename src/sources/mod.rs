pub mod adapter;
pub mod result;
pub mod vendor;

pub use adapter::SourceAdapter;
pub use result::{Extraction, PriceResult, PriceSource};
pub use vendor::{Vendor, VendorProfile};
