//! Show a user's cart.

use anyhow::{Context as _, Result};
use techmart_catalog::ids::UserId;
use techmart_catalog::money::Vnd;

use super::CartArgs;
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let user_id = UserId::new(args.user);
    let client = ctx.client();

    let spinner = ctx.output.spinner("Loading cart...");
    let view = client.cart_view(user_id, &ctx.config.api.asset_origin).await;
    spinner.finish_and_clear();
    let view = view.with_context(|| format!("Failed to load cart for user {}", user_id))?;

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header(&format!("Cart of user {}", user_id));
    if view.lines.is_empty() {
        ctx.output.info("Cart is empty.");
        return Ok(());
    }

    let widths = [8, 36, 5, 16, 16];
    ctx.output
        .table_row(&["ID", "PRODUCT", "QTY", "UNIT", "TOTAL"], &widths);
    for line in &view.lines {
        ctx.output.table_row(
            &[
                &line.product_id.to_string(),
                &line.name,
                &line.quantity.to_string(),
                &Vnd(line.unit_price).to_string(),
                &Vnd(line.line_total()).to_string(),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Lines", &view.summary.line_count.to_string());
    ctx.output.kv("Items", &view.summary.item_count.to_string());
    ctx.output.kv("Subtotal", &Vnd(view.summary.subtotal).to_string());

    Ok(())
}
