//! Storefront domain logic for Bijema.
//!
//! This crate holds the pure logic behind the household-goods storefront
//! and its back office:
//!
//! - **Query**: filter/sort query codec for the product listing URL
//! - **Catalog**: products, listing filter and sort, sidebar facets
//! - **Cart**: cart reducer and pricing
//! - **Checkout**: addresses, orders, order drafts
//! - **State**: application state with pure reducers
//! - **Analytics**: admin dashboard aggregations
//! - **Access**: route guard for protected pages
//!
//! Nothing here performs I/O. Events are reported through `tracing`.
//!
//! # Example
//!
//! ```rust
//! use bijema_commerce::prelude::*;
//!
//! let filters = FilterState::parse("?category=Kitchen&sort=price_asc");
//! let products = vec![
//!     Product::new("p1", "Kettle", "Kitchen", Money::new(250000, Currency::KES)),
//!     Product::new("p2", "Towel", "Bath", Money::new(45000, Currency::KES)),
//! ];
//!
//! let listing = Listing::apply(&products, &filters, Currency::KES);
//! assert_eq!(listing.summary(), "Showing 1 of 2 products");
//!
//! let next = query::toggle_filter(&filters, query::CATEGORY, "Bath");
//! assert_eq!(next, "category=Kitchen&category=Bath&sort=price_asc");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod access;
pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod query;
pub mod state;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Query
    pub use crate::query::{self, FilterPatch, FilterState, FilterValue, SortKey};

    // Catalog
    pub use crate::catalog::{
        active_filters, price_range_patch, ActiveFilter, CatalogFacets, Listing, Product,
    };

    // Cart
    pub use crate::cart::{CartAction, CartPricing, CartState};

    // Checkout
    pub use crate::checkout::{Address, Order, OrderDraft, OrderStatus, PaymentMethod};

    // State, analytics, access
    pub use crate::access::{RouteDecision, RouteGuard, User};
    pub use crate::analytics::{AnalyticsInput, AnalyticsReport, Store};
    pub use crate::state::{AppAction, AppState};
}
