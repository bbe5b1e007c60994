//! Product listing: apply a filter state to the catalog.

use crate::catalog::Product;
use crate::money::Currency;
use crate::query::{FilterState, SortKey};
use serde::Serialize;

/// Products shown for one filter state.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<'a> {
    /// Matching products, in display order.
    pub products: Vec<&'a Product>,
    /// Size of the unfiltered catalog.
    pub total: usize,
    /// Sort order that was applied.
    pub sort: SortKey,
}

impl<'a> Listing<'a> {
    /// Filter and sort `products` according to `filters`.
    ///
    /// A product is kept when its category is one of the selected categories
    /// (if any are selected) and its price lies within the bounds that are
    /// set. Sorting is stable, so `featured` keeps catalog order.
    pub fn apply(products: &'a [Product], filters: &FilterState, currency: Currency) -> Self {
        let categories = filters.categories();
        let min = filters.price_min(currency);
        let max = filters.price_max(currency);
        let sort = filters.sort();

        let mut shown: Vec<&Product> = products
            .iter()
            .filter(|p| categories.is_empty() || categories.contains(&p.category))
            .filter(|p| min.map_or(true, |min| p.price.amount_cents >= min.amount_cents))
            .filter(|p| max.map_or(true, |max| p.price.amount_cents <= max.amount_cents))
            .collect();

        match sort {
            SortKey::Featured => {}
            // Records carry no reliable creation order, ids stand in for it.
            SortKey::Newest => shown.sort_by(|a, b| b.id.cmp(&a.id)),
            SortKey::PriceAsc => shown.sort_by_key(|p| p.price.amount_cents),
            SortKey::PriceDesc => {
                shown.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
            }
        }

        tracing::debug!(
            shown = shown.len(),
            total = products.len(),
            sort = sort.as_str(),
            "applied listing filters"
        );

        Self {
            products: shown,
            total: products.len(),
            sort,
        }
    }

    /// Number of products shown.
    pub fn shown(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// "Showing N of M products".
    pub fn summary(&self) -> String {
        format!("Showing {} of {} products", self.shown(), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Sufuria", "Kitchen", Money::new(120000, Currency::KES)),
            Product::new("p2", "Towel", "Bath", Money::new(45000, Currency::KES)),
            Product::new("p3", "Kettle", "Kitchen", Money::new(250000, Currency::KES)),
            Product::new("p4", "Broom", "Cleaning", Money::new(30000, Currency::KES)),
        ]
    }

    fn ids<'a>(listing: &Listing<'a>) -> Vec<&'a str> {
        listing.products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_no_filters_keeps_catalog_order() {
        let products = catalog();
        let listing = Listing::apply(&products, &FilterState::new(), Currency::KES);
        assert_eq!(ids(&listing), vec!["p1", "p2", "p3", "p4"]);
        assert_eq!(listing.summary(), "Showing 4 of 4 products");
    }

    #[test]
    fn test_category_filter() {
        let products = catalog();
        let filters = FilterState::parse("category=Kitchen&category=Bath");
        let listing = Listing::apply(&products, &filters, Currency::KES);
        assert_eq!(ids(&listing), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let products = catalog();
        let filters = FilterState::parse("price_min=450&price_max=1200");
        let listing = Listing::apply(&products, &filters, Currency::KES);
        assert_eq!(ids(&listing), vec!["p1", "p2"]);
    }

    #[test]
    fn test_non_numeric_bound_is_ignored() {
        let products = catalog();
        let filters = FilterState::parse("price_min=cheap");
        let listing = Listing::apply(&products, &filters, Currency::KES);
        assert_eq!(listing.shown(), 4);
    }

    #[test]
    fn test_sorting() {
        let products = catalog();

        let asc = Listing::apply(&products, &FilterState::parse("sort=price_asc"), Currency::KES);
        assert_eq!(ids(&asc), vec!["p4", "p2", "p1", "p3"]);

        let desc = Listing::apply(&products, &FilterState::parse("sort=price_desc"), Currency::KES);
        assert_eq!(ids(&desc), vec!["p3", "p1", "p2", "p4"]);

        let newest = Listing::apply(&products, &FilterState::parse("sort=newest"), Currency::KES);
        assert_eq!(ids(&newest), vec!["p4", "p3", "p2", "p1"]);
    }

    #[test]
    fn test_empty_result() {
        let products = catalog();
        let listing = Listing::apply(&products, &FilterState::parse("category=Garden"), Currency::KES);
        assert!(listing.is_empty());
        assert_eq!(listing.total, 4);
    }
}
