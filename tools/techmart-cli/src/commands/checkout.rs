//! Place an order and fetch its payment URL.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use techmart_catalog::catalog::Product;
use techmart_catalog::checkout::{CheckoutDraft, CheckoutItem, ShippingAddress};
use techmart_catalog::ids::{ProductId, UserId};
use techmart_catalog::money::Vnd;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let user_id = UserId::new(args.user);
    let client = ctx.client();

    let spinner = ctx.output.spinner("Collecting items...");
    let items = match args.product {
        Some(id) => {
            let id = ProductId::new(id);
            let product = client.products().get(id).await;
            product.map(|p| vec![buy_now_item(&p, id, args.quantity)])
        }
        None => client
            .cart_view(user_id, &ctx.config.api.asset_origin)
            .await
            .map(|view| view.lines.iter().map(CheckoutItem::from_cart_line).collect()),
    };
    spinner.finish_and_clear();
    let items: Vec<CheckoutItem> = items.context("Failed to collect checkout items")?;

    let mut address = ShippingAddress::new(&args.street, &args.district, &args.city);
    if let Some(note) = &args.note {
        address = address.with_note(note.as_str());
    }
    let draft = CheckoutDraft::new(user_id, items, address)
        .with_contact(&args.phone, &args.email)
        .with_shipping_fee(ctx.config.checkout.shipping_fee);
    draft.validate()?;

    print_summary(&draft, ctx);

    if !args.yes {
        if ctx.output.is_json() {
            bail!("Refusing to prompt in JSON mode; pass --yes to place the order");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", Vnd(draft.total())))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let outcome = client.checkout(&draft).await;
    spinner.finish_and_clear();
    let outcome = outcome.context("Checkout failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&outcome);
        return Ok(());
    }

    ctx.output.success(&format!("Order {} placed", outcome.order.id));
    ctx.output.kv("Pay at", &outcome.payment_url);

    Ok(())
}

/// A single product bought directly, at its current price.
fn buy_now_item(product: &Product, requested: ProductId, quantity: i64) -> CheckoutItem {
    CheckoutItem {
        product_id: product.id.unwrap_or(requested),
        name: product.product_name.clone(),
        image: product.image.clone(),
        quantity,
        price: product.numeric_price().unwrap_or(0.0),
        selected: true,
    }
}

fn print_summary(draft: &CheckoutDraft, ctx: &Context) {
    ctx.output.header("Checkout");
    for item in draft.selected() {
        ctx.output.list_item(&format!(
            "{} x{}  {}",
            item.name,
            item.quantity,
            Vnd(item.line_total())
        ));
    }
    ctx.output.kv("Ship to", &draft.address.compose());
    ctx.output.kv("Subtotal", &Vnd(draft.subtotal()).to_string());
    ctx.output.kv("Shipping", &Vnd(draft.shipping_fee).to_string());
    ctx.output.kv("Total", &Vnd(draft.total()).to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_now_item_uses_current_price() {
        let product = Product::new("Mouse").with_price(250_000.0);
        let item = buy_now_item(&product, ProductId::new(4), 2);
        assert_eq!(item.product_id, ProductId::new(4));
        assert_eq!(item.line_total(), 500_000.0);
    }
}
