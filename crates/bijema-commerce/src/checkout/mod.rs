//! Checkout module.
//!
//! Contains delivery addresses, orders, and the order draft built from a cart.

mod address;
mod order;

pub use address::Address;
pub use order::{filter_by_status, Order, OrderDraft, OrderItem, OrderStatus, PaymentMethod};
