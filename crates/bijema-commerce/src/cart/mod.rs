//! Shopping cart module.
//!
//! Contains the cart reducer and pricing for the cart and checkout pages.

mod pricing;
mod state;

pub use pricing::{CartPricing, LineItemPricing};
pub use state::{CartAction, CartItem, CartState, MAX_QUANTITY_PER_ITEM};
