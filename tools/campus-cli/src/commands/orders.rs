//! Order book commands.

use anyhow::{Context as _, Result};
use campus_commerce::checkout::{Order, OrderBook, OrderStatus, PaymentStatus};
use campus_commerce::ids::{OrderId, UserId};

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{format_timestamp, status_badge};
use crate::store;

/// Run the orders command.
pub fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrdersCommand::List { user } => list_orders(user, ctx),
        OrdersCommand::Update {
            id,
            status,
            payment,
        } => update_order(&id, &status, payment.as_deref(), ctx),
    }
}

fn list_orders(user: Option<String>, ctx: &Context) -> Result<()> {
    let book: OrderBook = store::load_or_default(&ctx.orders_path())?;
    let orders: Vec<&Order> = match user {
        Some(user) => book.for_user(&UserId::new(user)),
        None => book.list(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Orders");
    if orders.is_empty() {
        ctx.output.info("No orders found.");
        return Ok(());
    }

    let widths = [16, 20, 12, 10, 6, 12];
    ctx.output
        .table_row(&["ORDER", "PLACED", "STATUS", "PAYMENT", "ITEMS", "TOTAL"], &widths);
    for order in orders {
        let placed = format_timestamp(order.created_at);
        let status = status_badge(order.status);
        let items = order.item_count().to_string();
        let total = order.total_amount.display();
        ctx.output.table_row(
            &[
                &order.order_number,
                &placed,
                &status,
                order.payment_status.as_str(),
                &items,
                &total,
            ],
            &widths,
        );
    }
    Ok(())
}

fn update_order(id: &str, status: &str, payment: Option<&str>, ctx: &Context) -> Result<()> {
    let status = OrderStatus::from_str(status)
        .with_context(|| format!("Unknown order status: {}", status))?;
    let payment = payment
        .map(|p| {
            PaymentStatus::from_str(p).with_context(|| format!("Unknown payment status: {}", p))
        })
        .transpose()?;

    let path = ctx.orders_path();
    let mut book: OrderBook = store::load(&path)?;
    let order = book.update_status(&OrderId::new(id), status, payment)?.clone();
    store::save(&book, &path)?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success(&format!(
        "Order {} is now {} (payment {})",
        order.order_number,
        status_badge(order.status),
        order.payment_status.as_str()
    ));
    Ok(())
}
