//! Order commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use techmart_catalog::checkout::{Order, OrderStats, OrderStatus, ShippingAddress};
use techmart_catalog::ids::{OrderId, UserId};
use techmart_catalog::money::Vnd;

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::status_badge;

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrdersCommand::List {
            user,
            status,
            keyword,
        } => list_orders(user, status.as_deref(), keyword.as_deref(), ctx).await,
        OrdersCommand::Show { id } => show_order(OrderId::new(id), ctx).await,
        OrdersCommand::Stats => order_stats(ctx).await,
        OrdersCommand::Report => ordered_products(ctx).await,
        OrdersCommand::History { id } => status_history(OrderId::new(id), ctx).await,
        OrdersCommand::Cancel { id, yes } => cancel_order(OrderId::new(id), yes, ctx).await,
    }
}

/// Parse a status by name or numeric code. Unlike [`OrderStatus::parse`],
/// an unknown value is an error.
fn parse_status(value: &str) -> Result<OrderStatus> {
    let value = value.trim().to_lowercase();
    if let Ok(code) = value.parse::<i32>() {
        return Ok(OrderStatus::try_from_code(code)?);
    }
    OrderStatus::ALL
        .into_iter()
        .find(|s| s.as_str() == value)
        .with_context(|| format!("Unknown order status '{}'", value))
}

async fn list_orders(
    user: Option<i64>,
    status: Option<&str>,
    keyword: Option<&str>,
    ctx: &Context,
) -> Result<()> {
    let status = status.map(parse_status).transpose()?;
    let client = ctx.client();
    let orders = client.orders();

    let spinner = ctx.output.spinner("Loading orders...");
    let fetched = match (keyword, user, status) {
        (Some(keyword), _, _) => orders.search(keyword).await,
        (None, Some(user), Some(status)) => orders.by_user_and_status(UserId::new(user), status).await,
        (None, Some(user), None) => orders.by_user(UserId::new(user)).await,
        (None, None, Some(status)) => orders.by_status(status).await,
        (None, None, None) => orders.list_all().await,
    };
    spinner.finish_and_clear();
    let list = fetched.context("Failed to load orders")?;

    if ctx.output.is_json() {
        ctx.output.json(&list);
        return Ok(());
    }

    ctx.output.header(&format!("Orders ({})", list.len()));
    if list.is_empty() {
        ctx.output.info("No orders found.");
        return Ok(());
    }

    let widths = [8, 20, 12, 16, 18];
    ctx.output
        .table_row(&["ID", "CUSTOMER", "STATUS", "TOTAL", "DATE"], &widths);
    for order in &list {
        print_order_row(order, &widths, ctx);
    }

    Ok(())
}

fn print_order_row(order: &Order, widths: &[usize], ctx: &Context) {
    let id = order
        .id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let date = order
        .order_date
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    ctx.output.table_row(
        &[
            &id,
            &order.display_customer(),
            &status_badge(order.status),
            &Vnd(order.total_amount).to_string(),
            &date,
        ],
        widths,
    );
}

async fn show_order(id: OrderId, ctx: &Context) -> Result<()> {
    let client = ctx.client();
    let orders = client.orders();

    let spinner = ctx.output.spinner(&format!("Loading order {}...", id));
    let fetched = futures::try_join!(orders.find(id), orders.items(id));
    spinner.finish_and_clear();
    let (mut order, items) = fetched.with_context(|| format!("Failed to load order {}", id))?;
    order.items = items;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", id));
    ctx.output.kv("Customer", &order.display_customer());
    ctx.output.kv("Status", &status_badge(order.status));
    if let Some(date) = order.order_date {
        ctx.output.kv("Date", &date.format("%Y-%m-%d %H:%M").to_string());
    }

    let address = ShippingAddress::parse(&order.shipping_address);
    ctx.output.kv("Street", &address.street);
    ctx.output.kv("District", &address.district);
    ctx.output.kv("City", &address.city);
    if let Some(note) = &address.note {
        ctx.output.kv("Note", note);
    }
    if let Some(phone) = &order.phone {
        ctx.output.kv("Phone", phone);
    }

    ctx.output.header("Items");
    let widths = [8, 32, 5, 16];
    for item in &order.items {
        let name = item
            .product
            .as_ref()
            .map(|p| p.product_name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Product {}", item.product_id));
        ctx.output.table_row(
            &[
                &item.product_id.to_string(),
                &name,
                &item.quantity.to_string(),
                &Vnd(item.line_total()).to_string(),
            ],
            &widths,
        );
    }
    ctx.output.kv("Total", &Vnd(order.total_amount).to_string());

    Ok(())
}

async fn order_stats(ctx: &Context) -> Result<()> {
    let client = ctx.client();
    let spinner = ctx.output.spinner("Loading orders...");
    let all = client.orders().list_all().await;
    spinner.finish_and_clear();
    let stats = OrderStats::of(&all.context("Failed to load orders")?);

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Order statistics");
    ctx.output.kv("Total", &stats.total.to_string());
    for (status, count) in &stats.by_status {
        ctx.output.kv(status.label_vi(), &count.to_string());
    }
    if stats.unknown_status > 0 {
        ctx.output.kv("Unknown status", &stats.unknown_status.to_string());
    }
    ctx.output.kv("Delivered revenue", &Vnd(stats.delivered_revenue).to_string());
    ctx.output.kv("Open value", &Vnd(stats.open_value).to_string());

    Ok(())
}

async fn ordered_products(ctx: &Context) -> Result<()> {
    let client = ctx.client();
    let spinner = ctx.output.spinner("Building ordered-products report...");
    let rows = client.ordered_products().await;
    spinner.finish_and_clear();
    let rows = rows.context("Failed to build report")?;

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&format!("Ordered products ({})", rows.len()));
    let widths = [8, 18, 28, 14, 5, 16];
    ctx.output.table_row(
        &["ORDER", "CUSTOMER", "PRODUCT", "CATEGORY", "QTY", "TOTAL"],
        &widths,
    );
    for row in &rows {
        let order = row
            .order_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        ctx.output.table_row(
            &[
                &order,
                &row.customer_name,
                &row.product_name,
                &row.category,
                &row.quantity.to_string(),
                &Vnd(row.total_price).to_string(),
            ],
            &widths,
        );
    }

    Ok(())
}

async fn status_history(id: OrderId, ctx: &Context) -> Result<()> {
    let client = ctx.client();
    let history = client
        .orders()
        .status_history(id)
        .await
        .with_context(|| format!("Failed to load history of order {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&history);
        return Ok(());
    }

    ctx.output.header(&format!("Order {} history", id));
    for entry in &history {
        let when = entry
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "?".to_string());
        let note = entry.note.as_deref().unwrap_or_default();
        ctx.output
            .list_item(&format!("{}  {}  {}", when, entry.status, note).trim_end().to_string());
    }

    Ok(())
}

async fn cancel_order(id: OrderId, yes: bool, ctx: &Context) -> Result<()> {
    let client = ctx.client();
    let order = client
        .orders()
        .find(id)
        .await
        .with_context(|| format!("Failed to load order {}", id))?;

    match order.status() {
        Some(status) if status.can_cancel() => {}
        Some(status) => bail!("Order {} is {} and can no longer be cancelled", id, status.as_str()),
        None => bail!("Order {} has unknown status code {}", id, order.status),
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Cancel order {} ({})?",
                id,
                Vnd(order.total_amount)
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancellation aborted");
            return Ok(());
        }
    }

    client
        .orders()
        .cancel(id)
        .await
        .with_context(|| format!("Failed to cancel order {}", id))?;
    ctx.output.success(&format!("Order {} cancelled", id));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("Shipped").unwrap(), OrderStatus::Shipped);
        assert_eq!(parse_status("4").unwrap(), OrderStatus::Cancelled);
        assert!(parse_status("lost").is_err());
        assert!(parse_status("9").is_err());
    }
}
