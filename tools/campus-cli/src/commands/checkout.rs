//! Check out a cart file.

use anyhow::{Context as _, Result};
use campus_commerce::cart::{Cart, CartEvent, CartTotals};
use campus_commerce::catalog::InMemoryCatalog;
use campus_commerce::checkout::{Order, OrderBook};
use campus_commerce::ids::UserId;
use serde::Serialize;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::Output;
use crate::store::{self, CartFile};

#[derive(Serialize)]
struct CheckoutSummary<'a> {
    totals: &'a CartTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'a Order>,
    failed_notifications: usize,
}

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let catalog_path = ctx.catalog_path();
    let orders_path = ctx.orders_path();

    let mut catalog: InMemoryCatalog = store::load(&catalog_path)?;
    let cart_file: CartFile = store::load(&ctx.resolve_path(&args.cart_file))
        .with_context(|| format!("Failed to load cart file: {}", args.cart_file))?;

    let mut cart = Cart::new(ctx.config.currency()?);
    watch(&mut cart, &ctx.output);
    cart_file.fill(&mut cart, &catalog)?;

    let totals = cart.totals()?;
    if !ctx.output.is_json() {
        print_totals(&totals, ctx);
    }

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&CheckoutSummary {
                totals: &totals,
                order: None,
                failed_notifications: 0,
            });
        }
        ctx.output.info("Dry run: cart not checked out.");
        return Ok(());
    }

    if cart.is_empty() {
        ctx.output.warn("Cart is empty, nothing to check out.");
        return Ok(());
    }

    let receipt = cart.checkout(&mut catalog)?;
    if receipt.failed_notifications > 0 {
        ctx.output.warn(&format!(
            "{} stock update(s) failed; see logs for details",
            receipt.failed_notifications
        ));
    }

    let mut order = Order::from_receipt(&receipt, args.user.map(UserId::new), None)?;
    if let Some(method) = args.payment {
        order = order.with_payment_method(method);
    }

    let mut orders: OrderBook = store::load_or_default(&orders_path)?;
    let order = orders.record(order).clone();

    store::save(&catalog, &catalog_path)?;
    store::save(&orders, &orders_path)?;

    if ctx.output.is_json() {
        ctx.output.json(&CheckoutSummary {
            totals: &totals,
            order: Some(&order),
            failed_notifications: receipt.failed_notifications,
        });
        return Ok(());
    }

    ctx.output.success(&format!(
        "Order {} placed: {} item(s), {}",
        order.order_number,
        order.item_count(),
        order.total_amount.display()
    ));
    ctx.output.kv("order id", order.id.as_str());
    Ok(())
}

/// Echo cart events in verbose mode.
fn watch(cart: &mut Cart, output: &Output) {
    if !output.is_verbose() {
        return;
    }
    let output = output.clone();
    cart.subscribe(Box::new(move |event: &CartEvent| {
        output.debug(&format!("{}: {}", event.title(), event.description()));
    }));
}

fn print_totals(totals: &CartTotals, ctx: &Context) {
    ctx.output.header("Cart");

    let widths = [36, 6, 12];
    ctx.output.table_row(&["ITEM", "QTY", "SUBTOTAL"], &widths);
    for line in &totals.lines {
        let item = format!("{} ({}, {})", line.product_name, line.key.size, line.key.color);
        let quantity = line.quantity.to_string();
        let subtotal = line.subtotal.display();
        ctx.output.table_row(&[&item, &quantity, &subtotal], &widths);
    }

    ctx.output.info("");
    ctx.output.kv("items", &totals.item_count.to_string());
    ctx.output.kv("total", &totals.subtotal.display());
    if totals.has_savings() {
        ctx.output.kv(
            "you save",
            &format!(
                "{} ({:.0}%)",
                totals.savings().display(),
                totals.savings_percentage()
            ),
        );
    }
}
