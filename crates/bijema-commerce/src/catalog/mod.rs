//! Catalog module.
//!
//! Contains product records and the listing logic behind the products page
//! and its filter sidebar.

mod facets;
mod listing;
mod product;

pub use facets::{active_filters, price_range_patch, ActiveFilter, CatalogFacets, CategoryOption};
pub use listing::Listing;
pub use product::{Product, Rating};
