//! Cart quantities and the pure reducer that updates them.

use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum quantity allowed per product.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Cart contents: quantity per product, in the order products were first
/// added, plus the running item count.
///
/// `total` always equals the sum of all quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartItem>,
    total: i64,
}

/// Actions dispatched by the product card and the cart page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "productId", rename_all = "camelCase")]
pub enum CartAction {
    /// Add one unit.
    Add(ProductId),
    /// Take away one unit; the item disappears at zero.
    Remove(ProductId),
    /// Drop the item whatever its quantity.
    Delete(ProductId),
    /// Empty the cart.
    Clear,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action, returning the next state.
    pub fn reduce(mut self, action: &CartAction) -> Self {
        match action {
            CartAction::Add(product_id) => {
                match self.items.iter_mut().find(|i| &i.product_id == product_id) {
                    Some(item) if item.quantity >= MAX_QUANTITY_PER_ITEM => {
                        tracing::warn!(
                            product_id = %product_id,
                            max = MAX_QUANTITY_PER_ITEM,
                            "cart quantity limit reached"
                        );
                        return self;
                    }
                    Some(item) => item.quantity += 1,
                    None => self.items.push(CartItem {
                        product_id: product_id.clone(),
                        quantity: 1,
                    }),
                }
                self.total += 1;
            }
            CartAction::Remove(product_id) => {
                let Some(index) = self.position(product_id) else {
                    tracing::debug!(product_id = %product_id, "remove on item not in cart");
                    return self;
                };
                self.items[index].quantity -= 1;
                if self.items[index].quantity == 0 {
                    self.items.remove(index);
                }
                self.total -= 1;
            }
            CartAction::Delete(product_id) => {
                if let Some(index) = self.position(product_id) {
                    let item = self.items.remove(index);
                    self.total -= item.quantity;
                }
            }
            CartAction::Clear => {
                self.items.clear();
                self.total = 0;
            }
        }
        self
    }

    /// Apply a sequence of actions in order.
    pub fn reduce_all<'a>(self, actions: impl IntoIterator<Item = &'a CartAction>) -> Self {
        actions.into_iter().fold(self, |state, action| state.reduce(action))
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Quantity of one product; 0 when not in the cart.
    pub fn quantity(&self, product_id: &ProductId) -> i64 {
        self.position(product_id)
            .map(|i| self.items[i].quantity)
            .unwrap_or(0)
    }

    /// Total number of units in the cart.
    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| &i.product_id == product_id)
    }
}

impl FromStr for CartAction {
    type Err = CommerceError;

    /// Parse `add:<id>`, `remove:<id>`, `delete:<id>` or `clear`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "clear" {
            return Ok(CartAction::Clear);
        }
        let (verb, id) = s
            .split_once(':')
            .filter(|(_, id)| !id.is_empty())
            .ok_or_else(|| CommerceError::UnknownCartAction(s.to_string()))?;
        let id = ProductId::new(id);
        match verb {
            "add" => Ok(CartAction::Add(id)),
            "remove" => Ok(CartAction::Remove(id)),
            "delete" => Ok(CartAction::Delete(id)),
            _ => Err(CommerceError::UnknownCartAction(s.to_string())),
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartAction::Add(id) => write!(f, "add:{}", id),
            CartAction::Remove(id) => write!(f, "remove:{}", id),
            CartAction::Delete(id) => write!(f, "delete:{}", id),
            CartAction::Clear => f.write_str("clear"),
        }
    }
}
