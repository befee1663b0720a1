//! Initialize a new store directory.

use anyhow::{bail, Result};
use campus_commerce::catalog::{InMemoryCatalog, Product};
use campus_commerce::{CommerceError, Currency, Money};

use super::InitArgs;
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};
use crate::store;

/// Run the init command.
pub fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    let name = args.name.unwrap_or_else(|| "IITGN Merch Store".to_string());
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);
    let catalog_path = ctx.cwd.join(&ctx.config.shop.catalog);

    ctx.output.header(&format!("Initializing store: {}", name));

    for path in [&config_path, &catalog_path] {
        if path.exists() && !args.force {
            bail!(
                "{} already exists. Use --force to overwrite.",
                path.display()
            );
        }
    }

    std::fs::write(&config_path, generate_default_config(&name))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    let catalog = sample_catalog(Currency::INR)?;
    store::save(&catalog, &catalog_path)?;
    ctx.output.success(&format!(
        "Created: {} ({} products)",
        catalog_path.display(),
        catalog.len()
    ));

    ctx.output.info("");
    ctx.output.info("Next steps:");
    ctx.output.list_item("campus products list");
    ctx.output.list_item("campus checkout cart.toml --user <id>");
    ctx.output.list_item("campus rate <product> <stars> --user <id>");

    Ok(())
}

/// Starter catalog of club merch.
pub fn sample_catalog(currency: Currency) -> Result<InMemoryCatalog, CommerceError> {
    let price = |major| Money::from_major(major, currency);

    InMemoryCatalog::from_products([
        Product::new("amalthea-hoodie", "Amalthea Tech Summit Hoodie", price(1299))
            .with_club("Amalthea")
            .with_category("Hoodies")
            .with_original_price(price(1599))
            .with_stock(40)
            .mark_new(),
        Product::new("hallabol-tee", "Hallabol Sports Tee", price(599))
            .with_club("Hallabol")
            .with_category("T-Shirts")
            .with_colors(["Black", "White", "Red"])
            .with_stock(120),
        Product::new("blithchron-mug", "Blithchron Coffee Mug", price(349))
            .with_club("Blithchron")
            .with_category("Accessories")
            .with_sizes(["One Size"])
            .with_colors(["White"])
            .with_stock(60),
        Product::new("iitgn-cap", "IITGN Classic Cap", price(449))
            .with_club("IITGN")
            .with_category("Accessories")
            .with_sizes(["One Size"])
            .with_colors(["Navy", "Black"])
            .with_stock(0),
        Product::new("robotics-tee", "Robotics Club Circuit Tee", price(649))
            .with_club("Robotics Club")
            .with_category("T-Shirts")
            .with_stock(35)
            .mark_new(),
    ])
}
