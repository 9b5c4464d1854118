use regex::Regex;

/// Currency symbol used by every supported vendor.
pub const GBP_SYMBOL: char = '£';

/// Converts currency-formatted text into a numeric price.
///
/// The decimal convention is fixed: `.` separates decimals and `,` groups
/// thousands. Pages using another convention will parse incorrectly.
#[derive(Debug, Clone)]
pub struct PriceParser {
    symbol: char,
    price_regex: Regex,
}

impl PriceParser {
    pub fn new() -> Self {
        Self::with_symbol(GBP_SYMBOL)
    }

    pub fn with_symbol(symbol: char) -> Self {
        let pattern = format!(
            r"{}\d[\d,]*\.\d+",
            regex::escape(&symbol.to_string())
        );
        PriceParser {
            symbol,
            // escaped single symbol followed by a fixed pattern always compiles
            price_regex: Regex::new(&pattern).expect("price pattern is valid"),
        }
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Parse a fragment already isolated as a currency match, e.g. `£1,234.56`.
    pub fn parse(&self, fragment: &str) -> Option<f64> {
        let digits: String = fragment
            .trim()
            .trim_start_matches(self.symbol)
            .chars()
            .filter(|c| *c != ',')
            .collect();

        if digits.is_empty()
            || !digits.chars().any(|c| c.is_ascii_digit())
            || !digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        {
            return None;
        }

        digits.parse::<f64>().ok().filter(|price| price.is_finite())
    }

    /// Every currency-shaped substring of `text`, in order of appearance.
    pub fn find_all<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.price_regex.find_iter(text).map(|m| m.as_str())
    }

    /// Parse the first currency-shaped substring of `text`.
    pub fn parse_first(&self, text: &str) -> Option<f64> {
        self.find_all(text).find_map(|m| self.parse(m))
    }

    /// Parse every currency-shaped substring of `text`, skipping unparseable ones.
    pub fn parse_all(&self, text: &str) -> Vec<f64> {
        self.find_all(text).filter_map(|m| self.parse(m)).collect()
    }
}

impl Default for PriceParser {
    fn default() -> Self {
        Self::new()
    }
}
