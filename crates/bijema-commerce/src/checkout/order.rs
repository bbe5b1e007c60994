//! Order types.

use crate::cart::{CartPricing, CartState};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{AddressId, OrderId, ProductId, StoreId, UserId};
use crate::money::{major_units, Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    OrderPlaced,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
}

impl OrderStatus {
    /// All statuses in fulfilment order.
    pub fn all() -> [OrderStatus; 4] {
        [
            OrderStatus::OrderPlaced,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::OrderPlaced => "ORDER_PLACED",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::OrderPlaced => "Order Placed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::all()
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CommerceError::UnknownOrderStatus(s.to_string()))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    /// M-Pesa mobile money.
    #[default]
    Mpesa,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "COD",
            PaymentMethod::Mpesa => "MPESA",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "COD" => Ok(PaymentMethod::Cod),
            "MPESA" | "M-PESA" => Ok(PaymentMethod::Mpesa),
            _ => Err(CommerceError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product line on an order, priced at the time of ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(with = "major_units")]
    pub price: Money,
}

/// An order as stored by the orders API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(with = "major_units")]
    pub total: Money,
    #[serde(default)]
    pub status: OrderStatus,
    pub user_id: UserId,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    #[serde(default)]
    pub address_id: Option<AddressId>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub is_coupon_used: bool,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Re-tag the total and line prices with the storefront currency.
    pub fn in_currency(mut self, currency: Currency) -> Self {
        self.total = self.total.in_currency(currency);
        for item in &mut self.order_items {
            item.price = item.price.in_currency(currency);
        }
        self
    }
}

/// Orders with the given status, or all orders for `None`.
pub fn filter_by_status(orders: &[Order], status: Option<OrderStatus>) -> Vec<&Order> {
    orders
        .iter()
        .filter(|order| status.map_or(true, |s| order.status == s))
        .collect()
}

/// Order payload submitted from the checkout page.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    #[serde(with = "major_units")]
    pub total: Money,
    pub status: OrderStatus,
    pub user_id: UserId,
    pub address_id: AddressId,
    pub is_paid: bool,
    pub payment_method: PaymentMethod,
    pub is_coupon_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub order_items: Vec<OrderItem>,
}

impl OrderDraft {
    /// Build the order for the current cart.
    ///
    /// Fails with `MissingAddress` when no address is selected and with
    /// `EmptyCart` when none of the cart's products can be priced.
    pub fn from_cart(
        user_id: UserId,
        address_id: Option<AddressId>,
        payment_method: PaymentMethod,
        cart: &CartState,
        products: &[Product],
        shipping_fee: Money,
    ) -> Result<Self, CommerceError> {
        let address_id = address_id.ok_or(CommerceError::MissingAddress)?;
        let pricing = CartPricing::calculate(cart, products, shipping_fee)?;
        if pricing.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let order_items = pricing
            .line_items
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                price: line.unit_price,
            })
            .collect();

        Ok(Self {
            total: pricing.grand_total,
            status: OrderStatus::OrderPlaced,
            user_id,
            address_id,
            is_paid: false,
            payment_method,
            is_coupon_used: false,
            note: None,
            order_items,
        })
    }

    /// Attach a delivery note; blank notes are dropped.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = (!note.trim().is_empty()).then_some(note);
        self
    }
}
