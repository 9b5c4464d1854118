use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use url::Url;
use validator::Validate;

use crate::extract::{Locator, PlausibleRange};
use crate::sources::Vendor;
use crate::utils::error::{AppError, Result};

/// One trackable price target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ItemConfig {
    #[validate(length(min = 1))]
    pub id: String,
    pub vendor: Vendor,
    #[validate(url)]
    pub url: String,
    #[validate(length(min = 1))]
    pub display_name: String,
    pub locator: Locator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plausible_range: Option<PlausibleRange>,
}

impl ItemConfig {
    pub fn new(
        id: &str,
        vendor: Vendor,
        url: &str,
        display_name: &str,
        locator: Locator,
        plausible_range: Option<PlausibleRange>,
    ) -> Self {
        Self {
            id: id.to_string(),
            vendor,
            url: url.to_string(),
            display_name: display_name.to_string(),
            locator,
            plausible_range,
        }
    }

    /// Origin of the item's page, sent as the referer.
    pub fn referer(&self) -> Option<String> {
        let url = Url::parse(&self.url).ok()?;
        let origin = url.origin();
        origin.is_tuple().then(|| format!("{}/", origin.ascii_serialization()))
    }
}

/// Ordered, validated set of items. Order is the reporting order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    items: Vec<ItemConfig>,
}

impl Catalog {
    pub fn new(items: Vec<ItemConfig>) -> Result<Self> {
        let catalog = Self { items };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Coins and spot prices tracked out of the box.
    pub fn builtin() -> Self {
        let chards = |id: &str, url: &str, name: &str, column: usize, min: f64, max: f64| {
            ItemConfig::new(id, Vendor::Chards, url, name, Locator::Column(column), Some(PlausibleRange::new(min, max)))
        };
        let atkinsons = |id: &str, name: &str, class: &str, min: f64, max: f64| {
            ItemConfig::new(
                id,
                Vendor::Atkinsons,
                "https://www.atkinsonsbullion.com/",
                name,
                Locator::Class(class.to_string()),
                Some(PlausibleRange::new(min, max)),
            )
        };

        Self {
            items: vec![
                chards("sovereign", "https://www.chards.co.uk/2025-uk-full-gold-sovereign-coin/2952", "Gold Sovereign", 2, 500.0, 800.0),
                chards("gold_britannia", "https://www.chards.co.uk/2025-gold-britannia-1-oz-bullion-coin/2984", "Gold Britannia", 2, 1500.0, 3000.0),
                chards("silver_britannia", "https://www.chards.co.uk/2025-silver-britannia-1-oz-bullion-coin/20760", "Silver Britannia", 3, 20.0, 50.0),
                atkinsons("XAU", "Gold", "js-lp-gold-toz", 1500.0, 3500.0),
                atkinsons("XAG", "Silver", "js-lp-silver-toz", 15.0, 60.0),
                atkinsons("XAU_GRAM", "Gold (gram)", "js-lp-gold-grams", 45.0, 115.0),
                atkinsons("XAG_GRAM", "Silver (gram)", "js-lp-silver-grams", 0.4, 2.0),
            ],
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for item in &self.items {
            item.validate()?;

            if !seen.insert(item.id.as_str()) {
                return Err(AppError::Validation(format!("Duplicate item id '{}'", item.id)));
            }

            let expected = item.vendor.profile().locator_kind;
            if item.locator.kind() != expected {
                return Err(AppError::Validation(format!(
                    "Item '{}' uses a {:?} locator but {} expects {:?}",
                    item.id,
                    item.locator.kind(),
                    item.vendor,
                    expected
                )));
            }

            if let Locator::Class(class) = &item.locator {
                if class.trim().is_empty() || class.contains(char::is_whitespace) {
                    return Err(AppError::Validation(format!(
                        "Item '{}' has an invalid class locator '{}'",
                        item.id, class
                    )));
                }
            }

            if let Some(range) = &item.plausible_range {
                if !range.is_valid() {
                    return Err(AppError::Validation(format!(
                        "Item '{}' has an invalid plausible range {}",
                        item.id, range
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ItemConfig> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&ItemConfig> {
        self.get(id).ok_or_else(|| AppError::UnknownIdentifier { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn items(&self) -> &[ItemConfig] {
        &self.items
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    /// Items scraped from `vendor`, in catalog order.
    pub fn for_vendor(&self, vendor: Vendor) -> Catalog {
        Catalog {
            items: self.items.iter().filter(|item| item.vendor == vendor).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
