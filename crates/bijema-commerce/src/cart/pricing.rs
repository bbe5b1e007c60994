//! Cart pricing calculations.

use crate::cart::CartState;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Priced lines, in cart order.
    pub line_items: Vec<LineItemPricing>,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Flat delivery fee, charged only for a non-empty subtotal.
    pub shipping_total: Money,
    /// Subtotal plus shipping.
    pub grand_total: Money,
}

/// Pricing breakdown for a single product in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub total: Money,
}

impl CartPricing {
    /// Price `cart` against `products`.
    ///
    /// Cart entries whose product is not in the catalog are skipped. The
    /// currency is taken from `shipping_fee`.
    pub fn calculate(
        cart: &CartState,
        products: &[Product],
        shipping_fee: Money,
    ) -> Result<Self, CommerceError> {
        let currency = shipping_fee.currency;

        let line_items: Vec<LineItemPricing> = cart
            .items()
            .iter()
            .filter_map(|item| {
                let product = products.iter().find(|p| p.id == item.product_id);
                if product.is_none() {
                    tracing::debug!(product_id = %item.product_id, "cart item not in catalog");
                }
                product.map(|p| LineItemPricing {
                    product_id: p.id.clone(),
                    name: p.name.clone(),
                    unit_price: p.price,
                    quantity: item.quantity,
                    total: p.price.multiply(item.quantity),
                })
            })
            .collect();

        let subtotal = Money::sum(line_items.iter().map(|l| &l.total), currency)?;
        let shipping_total = if subtotal.is_positive() {
            shipping_fee
        } else {
            Money::zero(currency)
        };
        let grand_total = subtotal.checked_add(&shipping_total)?;

        Ok(Self {
            line_items,
            subtotal,
            shipping_total,
            grand_total,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Number of units across priced lines.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|l| l.quantity).sum()
    }
}
