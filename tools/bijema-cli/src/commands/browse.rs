//! Product listing command.

use anyhow::Result;
use bijema_commerce::catalog::{active_filters, CatalogFacets, Listing};
use bijema_commerce::query::FilterState;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.storefront.currency()?;
    let products = ctx.load_catalog(args.catalog.as_deref()).await?;

    let filters = FilterState::parse(&args.query);
    let listing = Listing::apply(&products, &filters, currency);
    let facets = CatalogFacets::from_products(&products);
    let chips = active_filters(&filters, currency);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "summary": listing.summary(),
            "filters": filters,
            "activeFilters": chips,
            "categories": facets.category_options(&filters),
            "listing": listing,
        }));
        return Ok(());
    }

    ctx.output.header(&listing.summary());
    ctx.output.kv("sort", listing.sort.display_name());
    if !chips.is_empty() {
        let labels: Vec<&str> = chips.iter().map(|c| c.display.as_str()).collect();
        ctx.output.kv("filters", &labels.join(", "));
    }

    if listing.is_empty() {
        ctx.output.info("No products match these filters");
        return Ok(());
    }

    let widths = [12, 32, 16, 14, 12];
    println!();
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    let shown = listing
        .products
        .iter()
        .take(args.limit.unwrap_or(usize::MAX));
    for product in shown {
        let stock = if product.in_stock { "In stock" } else { "Out of stock" };
        let price = product.price.display();
        let badge = status_badge(stock);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                product.name.as_str(),
                product.category.as_str(),
                price.as_str(),
                badge.as_str(),
            ],
            &widths,
        );
    }

    if let (Some(min), Some(max)) = (facets.min_price, facets.max_price) {
        println!();
        ctx.output
            .kv("price range", &format!("{} - {}", min.display(), max.display()));
    }

    Ok(())
}
