//! Catalog commands.

use anyhow::{Context as _, Result};
use campus_commerce::catalog::{InMemoryCatalog, Product, ProductUpdate};
use campus_commerce::ids::ProductId;
use campus_commerce::search::{search, ProductFilter, SortOption};
use campus_commerce::{Currency, Money};

use super::{AddProductArgs, ListArgs, ProductsArgs, ProductsCommand, UpdateProductArgs};
use crate::context::Context;
use crate::output::format_rating;
use crate::store;

/// Run the products command.
pub fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List(list) => list_products(list, ctx),
        ProductsCommand::Add(add) => add_product(add, ctx),
        ProductsCommand::Update(update) => update_product(update, ctx),
        ProductsCommand::Show { id } => show_product(&id, ctx),
        ProductsCommand::Remove { id } => remove_product(&id, ctx),
    }
}

fn load_catalog(ctx: &Context) -> Result<InMemoryCatalog> {
    let path = ctx.catalog_path();
    ctx.output.debug(&format!("Catalog: {}", path.display()));
    store::load(&path).with_context(|| "Run `campus init` to create a sample catalog.")
}

/// Build a listing filter from command-line flags.
pub fn build_filter(args: &ListArgs, currency: Currency) -> ProductFilter {
    ProductFilter {
        search: args.search.clone().unwrap_or_default(),
        clubs: args.club.clone(),
        categories: args.category.clone(),
        min_price: args.min_price.map(|p| Money::from_major(p, currency)),
        max_price: args.max_price.map(|p| Money::from_major(p, currency)),
        in_stock_only: args.in_stock,
    }
}

fn list_products(args: ListArgs, ctx: &Context) -> Result<()> {
    let sort: SortOption = args.sort.parse()?;
    let catalog = load_catalog(ctx)?;
    let filter = build_filter(&args, ctx.config.currency()?);
    let listing = search(&catalog, &filter, sort);

    if ctx.output.is_json() {
        ctx.output.json(&listing);
        return Ok(());
    }

    ctx.output.header(&format!("{} ({})", ctx.config.shop.name, sort.display_name()));

    if listing.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    let widths = [22, 30, 14, 10, 6, 16];
    ctx.output
        .table_row(&["ID", "NAME", "CLUB", "PRICE", "STOCK", "RATING"], &widths);
    for product in &listing.items {
        let price = product.price.display();
        let stock = product.stock.to_string();
        let rating = format_rating(&product.rating);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.club,
                &price,
                &stock,
                &rating,
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&listing.summary());
    Ok(())
}

fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let catalog = load_catalog(ctx)?;
    let product = catalog
        .get(&ProductId::new(id))
        .with_context(|| format!("Product not found: {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    print_product(product, ctx);
    Ok(())
}

fn print_product(product: &Product, ctx: &Context) {
    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("club", &product.club);
    ctx.output.kv("category", &product.category);

    let mut price = product.price.display();
    if let (Some(original), Some(discount)) =
        (product.original_price, product.discount_percentage())
    {
        price = format!("{} (was {}, {:.0}% off)", price, original.display(), discount);
    }
    ctx.output.kv("price", &price);
    ctx.output.kv("sizes", &product.sizes.join(", "));
    ctx.output.kv("colors", &product.colors.join(", "));
    ctx.output.kv("stock", &product.stock.to_string());
    ctx.output.kv("rating", &format_rating(&product.rating));
    if let Some(badge) = &product.badge {
        ctx.output.kv("badge", badge);
    }
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }
    for feature in &product.features {
        ctx.output.list_item(feature);
    }
}

/// Build a new catalog entry from `products add` flags.
pub fn build_product(args: &AddProductArgs, currency: Currency) -> Product {
    let id = match &args.id {
        Some(id) => ProductId::new(id.clone()),
        None => ProductId::generate(),
    };

    let mut product = Product::new(id, args.name.clone(), Money::from_major(args.price, currency))
        .with_club(args.club.clone())
        .with_category(args.category.clone())
        .with_stock(args.stock);
    if let Some(original) = args.original_price {
        product = product.with_original_price(Money::from_major(original, currency));
    }
    if !args.size.is_empty() {
        product = product.with_sizes(args.size.clone());
    }
    if !args.color.is_empty() {
        product = product.with_colors(args.color.clone());
    }
    if args.new {
        product = product.mark_new();
    }
    product.description = args.description.clone().unwrap_or_default();
    product.badge = args.badge.clone();
    product
}

/// Turn `products update` flags into a partial update.
pub fn build_update(args: &UpdateProductArgs, currency: Currency) -> ProductUpdate {
    let money = |major: i64| Money::from_major(major, currency);
    let non_empty = |values: &Vec<String>| (!values.is_empty()).then(|| values.clone());

    ProductUpdate {
        name: args.name.clone(),
        price: args.price.map(money),
        original_price: if args.clear_original_price {
            Some(None)
        } else {
            args.original_price.map(|p| Some(money(p)))
        },
        image: None,
        club: args.club.clone(),
        category: args.category.clone(),
        description: args.description.clone(),
        sizes: non_empty(&args.size),
        colors: non_empty(&args.color),
        badge: if args.clear_badge {
            Some(None)
        } else {
            args.badge.clone().map(Some)
        },
        is_new: args.new,
        stock: args.stock,
    }
}

fn add_product(args: AddProductArgs, ctx: &Context) -> Result<()> {
    let path = ctx.catalog_path();
    let mut catalog: InMemoryCatalog = store::load_or_default(&path)?;
    let product = build_product(&args, ctx.config.currency()?);
    let id = product.id.clone();

    catalog.add(product)?;
    store::save(&catalog, &path)?;

    tracing::info!(product_id = %id, "product added");
    if ctx.output.is_json() {
        if let Some(product) = catalog.get(&id) {
            ctx.output.json(product);
        }
        return Ok(());
    }
    ctx.output.success(&format!("Added {} ({})", args.name, id));
    Ok(())
}

fn update_product(args: UpdateProductArgs, ctx: &Context) -> Result<()> {
    let path = ctx.catalog_path();
    let mut catalog = load_catalog(ctx)?;
    let update = build_update(&args, ctx.config.currency()?);
    let product = catalog.update(&ProductId::new(args.id.clone()), update)?.clone();
    store::save(&catalog, &path)?;

    tracing::info!(product_id = %product.id, "product updated");
    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }
    print_product(&product, ctx);
    ctx.output.success(&format!("Updated {}", product.id));
    Ok(())
}

fn remove_product(id: &str, ctx: &Context) -> Result<()> {
    let path = ctx.catalog_path();
    let mut catalog = load_catalog(ctx)?;
    catalog.delete(&ProductId::new(id))?;
    store::save(&catalog, &path)?;

    tracing::info!(product_id = id, "product removed");
    ctx.output.success(&format!("Removed {}", id));
    Ok(())
}
