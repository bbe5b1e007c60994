//! Application state for the storefront.
//!
//! One explicit value holds everything the pages share. Pages receive it
//! by reference and produce the next state with [`AppState::reduce`];
//! there is no global instance.

use crate::cart::{CartAction, CartState};
use crate::catalog::Product;
use crate::checkout::Address;
use serde::{Deserialize, Serialize};

/// Shared storefront state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Product list shown across the storefront.
    pub products: Vec<Product>,
    /// Saved delivery addresses of the signed-in customer.
    pub addresses: Vec<Address>,
    pub cart: CartState,
}

/// Everything that can change [`AppState`].
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Replace the product list, e.g. after fetching the catalog.
    SetProducts(Vec<Product>),
    ClearProducts,
    AddAddress(Address),
    Cart(CartAction),
}

impl AppState {
    /// Start from a loaded catalog.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Apply one action, returning the next state.
    pub fn reduce(mut self, action: AppAction) -> Self {
        match action {
            AppAction::SetProducts(products) => self.products = products,
            AppAction::ClearProducts => self.products.clear(),
            AppAction::AddAddress(address) => self.addresses.push(address),
            AppAction::Cart(action) => self.cart = self.cart.reduce(&action),
        }
        self
    }

    /// Look up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// First saved address, the checkout page's default selection.
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.first()
    }
}

impl From<CartAction> for AppAction {
    fn from(action: CartAction) -> Self {
        AppAction::Cart(action)
    }
}
