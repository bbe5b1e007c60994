//! Filter sidebar data: available facets, active-filter chips, and the
//! price slider patch.

use crate::catalog::Product;
use crate::money::{Currency, Money};
use crate::query::{FilterPatch, FilterState, CATEGORY, PRICE_MAX, PRICE_MIN};
use serde::Serialize;

/// Facets derived from the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogFacets {
    /// Distinct categories in first-seen order.
    pub categories: Vec<String>,
    /// Cheapest price in the catalog.
    pub min_price: Option<Money>,
    /// Most expensive price in the catalog.
    pub max_price: Option<Money>,
}

impl CatalogFacets {
    pub fn from_products(products: &[Product]) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for product in products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }

        Self {
            categories,
            min_price: products.iter().map(|p| p.price).min(),
            max_price: products.iter().map(|p| p.price).max(),
        }
    }

    /// Category checkboxes with their checked state for `filters`.
    pub fn category_options(&self, filters: &FilterState) -> Vec<CategoryOption> {
        self.categories
            .iter()
            .map(|name| CategoryOption {
                name: name.clone(),
                checked: filters.contains(CATEGORY, name),
            })
            .collect()
    }
}

/// One category checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub name: String,
    pub checked: bool,
}

/// A removable chip in the active-filters bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    /// Filter key to remove.
    pub key: String,
    /// Value to remove under `key`.
    pub value: String,
    /// Chip label.
    pub display: String,
}

/// Chips for the selected categories and the price bounds, in that order.
///
/// `sort` and unrelated keys produce no chip.
pub fn active_filters(filters: &FilterState, currency: Currency) -> Vec<ActiveFilter> {
    let mut chips: Vec<ActiveFilter> = filters
        .categories()
        .iter()
        .map(|category| ActiveFilter {
            key: CATEGORY.to_string(),
            value: category.clone(),
            display: category.clone(),
        })
        .collect();

    for (key, label) in [(PRICE_MIN, "Min"), (PRICE_MAX, "Max")] {
        if let Some(raw) = filters.get(key).and_then(|v| v.first()) {
            chips.push(ActiveFilter {
                key: key.to_string(),
                value: raw.to_string(),
                display: format!("{}: {}{}", label, currency.symbol(), raw),
            });
        }
    }

    chips
}

/// Patch for a price slider change.
///
/// A bound is only kept when it actually narrows the catalog range: the
/// lower bound must be above the cheapest product and the upper bound below
/// the most expensive one. Otherwise the bound is deleted.
pub fn price_range_patch(min: Money, max: Money, facets: &CatalogFacets) -> FilterPatch {
    let mut patch = FilterPatch::new();

    let narrows_min = facets.min_price.map_or(true, |floor| min > floor);
    patch.insert(PRICE_MIN, narrows_min.then(|| bound_value(min).into()));

    let narrows_max = facets.max_price.map_or(true, |ceiling| max < ceiling);
    patch.insert(PRICE_MAX, narrows_max.then(|| bound_value(max).into()));

    patch
}

/// Major-unit string for a bound: `100` rather than `100.00`.
fn bound_value(money: Money) -> String {
    let divisor = 10_i64.pow(money.currency.decimal_places());
    if money.amount_cents % divisor == 0 {
        (money.amount_cents / divisor).to_string()
    } else {
        let trimmed = money.display_amount();
        trimmed.trim_end_matches('0').to_string()
    }
}
