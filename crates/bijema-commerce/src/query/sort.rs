//! Sort keys understood by the product listing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Catalog order (default when `sort` is absent).
    #[default]
    Featured,
    /// Newest first.
    Newest,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
}

impl SortKey {
    /// All sort keys in the order the sort dropdown shows them.
    pub fn options() -> [SortKey; 4] {
        [
            SortKey::Featured,
            SortKey::Newest,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
        ]
    }

    /// Wire value used in the query string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::Newest => "Newest",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
        }
    }

    /// Parse a wire value. Unrecognized values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "featured" => Some(SortKey::Featured),
            "newest" => Some(SortKey::Newest),
            "price_asc" => Some(SortKey::PriceAsc),
            "price_desc" => Some(SortKey::PriceDesc),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_wire_values() {
        for key in SortKey::options() {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse("cheapest"), None);
    }

    #[test]
    fn test_sort_key_serde_matches_wire() {
        let json = serde_json::to_string(&SortKey::PriceDesc).unwrap();
        assert_eq!(json, "\"price_desc\"");
    }

    #[test]
    fn test_sort_key_default() {
        assert_eq!(SortKey::default(), SortKey::Featured);
        assert_eq!(SortKey::Featured.display_name(), "Featured");
    }
}
