//! Admin analytics command.

use anyhow::{bail, Result};
use bijema_commerce::analytics::{AnalyticsInput, AnalyticsReport};
use bijema_commerce::catalog::Product;
use bijema_commerce::checkout::{filter_by_status, Order, OrderStatus};
use serde::de::DeserializeOwned;

use super::AnalyticsArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the analytics command.
pub async fn run(args: AnalyticsArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.storefront.currency()?;
    let storefront = &ctx.config.storefront;

    let orders_path = args.orders.as_deref().or(storefront.orders.as_deref());
    let stores_path = args.stores.as_deref().or(storefront.stores.as_deref());
    let products_path = args.catalog.as_deref().or(storefront.catalog.as_deref());
    let users_path = args.users.as_deref().or(storefront.users.as_deref());

    if [orders_path, stores_path, products_path, users_path]
        .iter()
        .all(Option::is_none)
    {
        bail!("No data files. Set storefront.orders, stores, catalog or users in bijema.toml.");
    }

    let products: Vec<Product> = load_or_empty(ctx, products_path, "products").await?;
    let orders: Vec<Order> = load_or_empty(ctx, orders_path, "orders").await?;
    let input = AnalyticsInput {
        stores: load_or_empty(ctx, stores_path, "stores").await?,
        products: products.into_iter().map(|p| p.in_currency(currency)).collect(),
        orders: orders.into_iter().map(|o| o.in_currency(currency)).collect(),
        users: load_or_empty(ctx, users_path, "users").await?,
    };
    let report = AnalyticsReport::build(&input, currency)?;

    let status = args
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()?;
    let matching = status.map(|s| (s, filter_by_status(&input.orders, Some(s))));

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "report": report,
            "orders": matching.as_ref().map(|(_, orders)| orders),
        }));
        return Ok(());
    }

    let overview = &report.overview;
    ctx.output.header("Overview");
    ctx.output.kv("Revenue", &overview.total_revenue.display());
    ctx.output.kv("Orders", &overview.total_orders.to_string());
    ctx.output.kv("Products", &overview.total_products.to_string());
    ctx.output.kv("Users", &overview.total_users.to_string());
    ctx.output.kv(
        "Stores",
        &format!(
            "{} ({} active, {} pending)",
            overview.total_stores, overview.active_stores, overview.pending_stores
        ),
    );

    if !report.store_performance.is_empty() {
        ctx.output.header("Store performance");
        let widths = [24, 8, 16, 10];
        ctx.output
            .table_row(&["STORE", "ORDERS", "REVENUE", "PRODUCTS"], &widths);
        for row in &report.store_performance {
            let orders = row.orders.to_string();
            let revenue = row.revenue.display();
            let products = row.products.to_string();
            ctx.output.table_row(
                &[
                    row.name.as_str(),
                    orders.as_str(),
                    revenue.as_str(),
                    products.as_str(),
                ],
                &widths,
            );
        }
    }

    if !report.store_distribution.is_empty() {
        ctx.output.header("Store status");
        for slice in &report.store_distribution {
            ctx.output.kv(&status_badge(&slice.name), &slice.value.to_string());
        }
    }

    if !report.sales.is_empty() {
        ctx.output.header("Sales by day");
        for point in &report.sales {
            ctx.output.kv(&point.date.to_string(), &point.sales.display());
        }
    }

    if !report.categories.is_empty() {
        ctx.output.header("Products by category");
        for category in &report.categories {
            ctx.output.kv(&category.name, &category.products.to_string());
        }
    }

    if let Some((status, orders)) = matching {
        ctx.output
            .header(&format!("Orders: {}", status_badge(status.display_name())));
        if orders.is_empty() {
            ctx.output.info("No orders with this status");
        }
        for order in orders {
            ctx.output.list_item(&format!(
                "{}  {}  {}",
                order.id,
                order.created_at.format("%Y-%m-%d"),
                order.total.display()
            ));
        }
    }

    Ok(())
}

async fn load_or_empty<T: DeserializeOwned>(
    ctx: &Context,
    path: Option<&str>,
    what: &str,
) -> Result<Vec<T>> {
    match path {
        Some(path) => ctx.read_json(path).await,
        None => {
            ctx.output.warn(&format!("No {} file configured; counting none", what));
            Ok(Vec::new())
        }
    }
}
