use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extract::LocatorKind;

/// A site prices are scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// Chards coin product pages: volume-pricing table, column locator.
    Chards,
    /// Atkinsons Bullion homepage: live spot-price table, class locator.
    Atkinsons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorProfile {
    pub name: &'static str,
    /// Matches only the table holding the prices.
    pub table_selector: &'static str,
    pub locator_kind: LocatorKind,
}

impl Vendor {
    pub const ALL: [Vendor; 2] = [Vendor::Chards, Vendor::Atkinsons];

    pub fn profile(&self) -> VendorProfile {
        match self {
            Vendor::Chards => VendorProfile {
                name: "Chards",
                table_selector: r#"table[aria-labelledby="table-title"]"#,
                locator_kind: LocatorKind::Column,
            },
            Vendor::Atkinsons => VendorProfile {
                name: "Atkinsons",
                table_selector: r#"table[data-lp="spotPrice"]"#,
                locator_kind: LocatorKind::Class,
            },
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name)
    }
}
