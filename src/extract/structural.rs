use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::price::PriceParser;
use crate::utils::error::{AppError, Result};

/// Address of the price cell inside a vendor's pricing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Locator {
    /// Zero-based cell index within the first data row.
    Column(usize),
    /// Class carried by the price cell itself.
    Class(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorKind {
    Column,
    Class,
}

impl Locator {
    pub fn kind(&self) -> LocatorKind {
        match self {
            Locator::Column(_) => LocatorKind::Column,
            Locator::Class(_) => LocatorKind::Class,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Column(index) => write!(f, "column {}", index),
            Locator::Class(class) => write!(f, "class '{}'", class),
        }
    }
}

/// Why the structural path did not yield a price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralMiss {
    TableNotFound,
    RowNotFound { rows: usize },
    CellNotFound { found: usize, needed: usize },
    ClassNotFound { class: String },
    ParseMiss { text: String },
}

impl fmt::Display for StructuralMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralMiss::TableNotFound => write!(f, "price table not found"),
            StructuralMiss::RowNotFound { rows } => {
                write!(f, "price rows not found (found {} rows, need 2)", rows)
            }
            StructuralMiss::CellNotFound { found, needed } => {
                write!(f, "not enough cells in the row (found {}, need {})", found, needed)
            }
            StructuralMiss::ClassNotFound { class } => {
                write!(f, "no cell with class '{}' in the price table", class)
            }
            StructuralMiss::ParseMiss { text } => {
                write!(f, "could not extract price from text '{}'", text)
            }
        }
    }
}

pub type StructuralOutcome = std::result::Result<f64, StructuralMiss>;

/// Finds a price by walking a vendor's pricing table.
#[derive(Debug, Clone)]
pub struct StructuralExtractor {
    table: Selector,
    row: Selector,
    cell: Selector,
    parser: PriceParser,
}

impl StructuralExtractor {
    /// `table_selector` must match only the vendor's price table.
    pub fn new(table_selector: &str, parser: PriceParser) -> Result<Self> {
        Ok(Self {
            table: parse_selector(table_selector)?,
            row: parse_selector("tr")?,
            cell: parse_selector("td")?,
            parser,
        })
    }

    pub fn extract(&self, document: &Html, locator: &Locator) -> StructuralOutcome {
        let table = document
            .select(&self.table)
            .next()
            .ok_or(StructuralMiss::TableNotFound)?;

        let cell = match locator {
            Locator::Column(index) => self.cell_at_column(table, *index)?,
            Locator::Class(class) => self.cell_with_class(table, class)?,
        };

        let text = cell_text(cell);
        self.parser
            .parse_first(&text)
            .ok_or(StructuralMiss::ParseMiss { text })
    }

    fn cell_at_column<'a>(&self, table: ElementRef<'a>, index: usize) -> std::result::Result<ElementRef<'a>, StructuralMiss> {
        let rows: Vec<ElementRef<'a>> = table.select(&self.row).collect();
        // row 0 is the header, row 1 the first quantity tier
        let data_row = rows.get(1).ok_or(StructuralMiss::RowNotFound { rows: rows.len() })?;

        let cells: Vec<ElementRef<'a>> = data_row.select(&self.cell).collect();
        cells.get(index).copied().ok_or(StructuralMiss::CellNotFound {
            found: cells.len(),
            needed: index + 1,
        })
    }

    fn cell_with_class<'a>(&self, table: ElementRef<'a>, class: &str) -> std::result::Result<ElementRef<'a>, StructuralMiss> {
        table
            .select(&self.cell)
            .find(|cell| cell.value().classes().any(|c| c == class))
            .ok_or_else(|| StructuralMiss::ClassNotFound { class: class.to_string() })
    }
}

/// Visible text of a cell with each text node trimmed and joined.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect::<String>()
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::InvalidSelector {
        selector: format!("{} ({:?})", selector, e),
    })
}
