//! Filter/sort query codec.
//!
//! Maps between the listing page's URL query string and a structured
//! [`FilterState`]. The free functions mirror what the filter sidebar and
//! sort dropdown need: each takes the current state and returns the query
//! string to navigate to next.
//!
//! ```
//! use bijema_commerce::query::{self, FilterState};
//!
//! let current = FilterState::parse("?category=Kitchen");
//! assert_eq!(
//!     query::toggle_filter(&current, "category", "Bath"),
//!     "category=Kitchen&category=Bath"
//! );
//! ```

mod patch;
mod sort;
mod state;

pub use patch::FilterPatch;
pub use sort::SortKey;
pub use state::{FilterState, FilterValue};

/// Multi-valued category filter.
pub const CATEGORY: &str = "category";
/// Lower price bound, a numeric string in major units.
pub const PRICE_MIN: &str = "price_min";
/// Upper price bound, a numeric string in major units.
pub const PRICE_MAX: &str = "price_max";
/// Sort key, see [`SortKey`].
pub const SORT: &str = "sort";

/// Keys removed by [`clear_all_filters`].
pub const FILTER_KEYS: [&str; 4] = [CATEGORY, PRICE_MIN, PRICE_MAX, SORT];

/// Decode a query string.
pub fn parse(query: &str) -> FilterState {
    FilterState::parse(query)
}

/// Encode a filter state.
pub fn stringify(state: &FilterState) -> String {
    state.to_query_string()
}

/// Shallow-merge `patch` over `current` and encode the result.
pub fn update_query(current: &FilterState, patch: &FilterPatch) -> String {
    current.merged(patch).to_query_string()
}

/// Flip `value` under `key` and encode the result.
pub fn toggle_filter(current: &FilterState, key: &str, value: &str) -> String {
    current.toggled(key, value).to_query_string()
}

/// Remove `value` from `key` (or the whole key) and encode the result.
pub fn remove_filter(current: &FilterState, key: &str, value: Option<&str>) -> String {
    current.without(key, value).to_query_string()
}

/// Drop the recognized filter keys and encode whatever is left.
pub fn clear_all_filters(current: &FilterState) -> String {
    current.cleared().to_query_string()
}
