//! Admin analytics.
//!
//! Derived figures for the back-office dashboard charts. Everything here is
//! recomputed from the record lists on each call.

use crate::access::User;
use crate::catalog::Product;
use crate::checkout::Order;
use crate::error::CommerceError;
use crate::ids::StoreId;
use crate::money::{Currency, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seller store approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Pending => "pending",
            StoreStatus::Approved => "approved",
            StoreStatus::Rejected => "rejected",
        }
    }

    /// Label used in the distribution chart.
    pub fn display_name(&self) -> &'static str {
        match self {
            StoreStatus::Pending => "Pending",
            StoreStatus::Approved => "Approved",
            StoreStatus::Rejected => "Rejected",
        }
    }
}

/// A seller store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub status: StoreStatus,
    #[serde(default)]
    pub is_active: bool,
}

/// Record lists the dashboard is computed from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsInput {
    #[serde(default)]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_revenue: Money,
    pub total_orders: usize,
    pub total_products: usize,
    pub total_users: usize,
    pub total_stores: usize,
    pub active_stores: usize,
    pub pending_stores: usize,
}

/// Per-store bar chart row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorePerformance {
    pub store_id: StoreId,
    pub name: String,
    pub orders: usize,
    pub revenue: Money,
    pub products: usize,
}

/// Pie chart slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub name: String,
    pub value: usize,
}

/// Sales trend point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub sales: Money,
}

/// Products-by-category bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub products: usize,
}

/// Full dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub overview: Overview,
    pub store_performance: Vec<StorePerformance>,
    pub store_distribution: Vec<StatusSlice>,
    pub sales: Vec<SalesPoint>,
    pub categories: Vec<CategoryCount>,
}

impl AnalyticsReport {
    /// Compute every chart for `input`, with amounts in `currency`.
    pub fn build(input: &AnalyticsInput, currency: Currency) -> Result<Self, CommerceError> {
        Ok(Self {
            overview: overview(input, currency)?,
            store_performance: store_performance(&input.stores, &input.orders, &input.products, currency)?,
            store_distribution: store_distribution(&input.stores),
            sales: sales_by_date(&input.orders, currency)?,
            categories: products_by_category(&input.products),
        })
    }
}

pub fn overview(input: &AnalyticsInput, currency: Currency) -> Result<Overview, CommerceError> {
    Ok(Overview {
        total_revenue: Money::sum(input.orders.iter().map(|o| &o.total), currency)?,
        total_orders: input.orders.len(),
        total_products: input.products.len(),
        total_users: input.users.len(),
        total_stores: input.stores.len(),
        active_stores: input.stores.iter().filter(|s| s.is_active).count(),
        pending_stores: input
            .stores
            .iter()
            .filter(|s| s.status == StoreStatus::Pending)
            .count(),
    })
}

/// Orders, revenue and products per store, in store order.
pub fn store_performance(
    stores: &[Store],
    orders: &[Order],
    products: &[Product],
    currency: Currency,
) -> Result<Vec<StorePerformance>, CommerceError> {
    stores
        .iter()
        .map(|store| {
            let store_orders: Vec<&Order> = orders
                .iter()
                .filter(|o| o.store_id.as_ref() == Some(&store.id))
                .collect();
            Ok(StorePerformance {
                store_id: store.id.clone(),
                name: store.name.clone(),
                orders: store_orders.len(),
                revenue: Money::sum(store_orders.iter().map(|o| &o.total), currency)?,
                products: products
                    .iter()
                    .filter(|p| p.store_id.as_ref() == Some(&store.id))
                    .count(),
            })
        })
        .collect()
}

/// Store counts per status, in first-seen order.
pub fn store_distribution(stores: &[Store]) -> Vec<StatusSlice> {
    let mut slices: Vec<(StoreStatus, usize)> = Vec::new();
    for store in stores {
        match slices.iter_mut().find(|(status, _)| *status == store.status) {
            Some((_, count)) => *count += 1,
            None => slices.push((store.status, 1)),
        }
    }
    slices
        .into_iter()
        .map(|(status, value)| StatusSlice {
            name: status.display_name().to_string(),
            value,
        })
        .collect()
}

/// Order totals per calendar day (UTC), oldest first.
pub fn sales_by_date(orders: &[Order], currency: Currency) -> Result<Vec<SalesPoint>, CommerceError> {
    let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for order in orders {
        let day = order.created_at.date_naive();
        let running = by_day.entry(day).or_insert_with(|| Money::zero(currency));
        *running = running.checked_add(&order.total)?;
    }
    Ok(by_day
        .into_iter()
        .map(|(date, sales)| SalesPoint { date, sales })
        .collect())
}

/// Product counts per category, in first-seen order.
pub fn products_by_category(products: &[Product]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for product in products {
        match counts.iter_mut().find(|c| c.name == product.category) {
            Some(entry) => entry.products += 1,
            None => counts.push(CategoryCount {
                name: product.category.clone(),
                products: 1,
            }),
        }
    }
    counts
}
