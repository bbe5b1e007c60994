//! Cart replay command.

use anyhow::{Context as _, Result};
use bijema_commerce::cart::{CartAction, CartPricing, CartState};
use bijema_commerce::checkout::{OrderDraft, PaymentMethod};
use bijema_commerce::{AddressId, UserId};

use super::CartArgs;
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let actions = parse_actions(&args.actions)?;
    let products = ctx.load_catalog(args.catalog.as_deref()).await?;
    let shipping_fee = ctx.config.storefront.shipping_fee()?;

    let cart = CartState::new().reduce_all(&actions);
    let pricing = CartPricing::calculate(&cart, &products, shipping_fee)?;

    let draft = match args.address {
        Some(address) => {
            let payment: PaymentMethod = args.payment.parse()?;
            let draft = OrderDraft::from_cart(
                UserId::new(args.user),
                Some(AddressId::new(address)),
                payment,
                &cart,
                &products,
                shipping_fee,
            )?;
            Some(match args.note {
                Some(note) => draft.with_note(note),
                None => draft,
            })
        }
        None => None,
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "cart": cart,
            "pricing": pricing,
            "order": draft,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", cart.total()));
    if pricing.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let widths = [32, 6, 14, 14];
    ctx.output
        .table_row(&["PRODUCT", "QTY", "PRICE", "TOTAL"], &widths);
    for line in &pricing.line_items {
        let quantity = line.quantity.to_string();
        let unit_price = line.unit_price.display();
        let total = line.total.display();
        ctx.output.table_row(
            &[
                line.name.as_str(),
                quantity.as_str(),
                unit_price.as_str(),
                total.as_str(),
            ],
            &widths,
        );
    }

    println!();
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    ctx.output.kv("Shipping", &pricing.shipping_total.display());
    ctx.output.kv("Total", &pricing.grand_total.display());

    if let Some(draft) = draft {
        ctx.output.header("Order");
        ctx.output.kv("address", draft.address_id.as_str());
        ctx.output.kv("payment", draft.payment_method.as_str());
        ctx.output.kv("status", draft.status.display_name());
        if let Some(ref note) = draft.note {
            ctx.output.kv("note", note);
        }
        ctx.output.success("Order draft ready");
    }

    Ok(())
}

fn parse_actions(raw: &[String]) -> Result<Vec<CartAction>> {
    raw.iter()
        .map(|action| {
            action
                .parse::<CartAction>()
                .with_context(|| format!("Invalid cart action: {}", action))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        let actions = parse_actions(&["add:p1".to_string(), "clear".to_string()]).unwrap();
        assert_eq!(actions, vec![CartAction::Add("p1".into()), CartAction::Clear]);
        assert!(parse_actions(&["buy:p1".to_string()]).is_err());
    }
}
