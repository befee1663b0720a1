//! Submit a product rating.

use anyhow::{Context as _, Result};
use campus_commerce::catalog::InMemoryCatalog;
use campus_commerce::checkout::OrderBook;
use campus_commerce::ids::{ProductId, UserId};
use campus_commerce::ratings::{RatingBook, Stars};

use super::RateArgs;
use crate::context::Context;
use crate::output::format_rating;
use crate::store;

/// Run the rate command.
pub fn run(args: RateArgs, ctx: &Context) -> Result<()> {
    let stars = Stars::new(args.stars)?;
    let user = UserId::new(args.user);
    let product_id = ProductId::new(args.product);

    let catalog_path = ctx.catalog_path();
    let reviews_path = ctx.reviews_path();

    let mut catalog: InMemoryCatalog = store::load(&catalog_path)?;
    let product_name = catalog
        .get(&product_id)
        .map(|p| p.name.clone())
        .with_context(|| format!("Product not found: {}", product_id))?;

    let orders: OrderBook = store::load_or_default(&ctx.orders_path())?;
    let order = orders.purchase_of(&user, &product_id).with_context(|| {
        format!("{} has no order containing {}; only buyers can rate it", user, product_id)
    })?;

    let mut reviews: RatingBook = store::load_or_default(&reviews_path)?;
    let summary = reviews.submit(order, &user, &product_id, stars, args.review)?;
    catalog.apply_rating(&product_id, summary)?;

    store::save(&reviews, &reviews_path)?;
    store::save(&catalog, &catalog_path)?;

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.success(&format!("Rated {} {}", product_name, stars));
    ctx.output.kv("rating", &format_rating(&summary));
    Ok(())
}
