//! Configuration commands.

use anyhow::{bail, Result};
use campus_commerce::catalog::InMemoryCatalog;
use tracing_subscriber::EnvFilter;

use super::{ConfigArgs, ConfigCommand};
use crate::config::CliConfig;
use crate::context::Context;
use crate::logging;
use crate::store;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[shop]");
    ctx.output.kv("name", &ctx.config.shop.name);
    ctx.output.kv("currency", &ctx.config.shop.currency);
    ctx.output.kv("catalog", &ctx.catalog_path().display().to_string());
    ctx.output.kv("orders", &ctx.orders_path().display().to_string());
    ctx.output.kv("reviews", &ctx.reviews_path().display().to_string());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

/// Check a configuration for problems. Returns (errors, warnings).
pub fn check(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.shop.name.trim().is_empty() {
        warnings.push("shop.name is empty".to_string());
    }

    if config.currency().is_err() {
        errors.push(format!(
            "shop.currency '{}' is not a supported currency",
            config.shop.currency
        ));
    }

    for (key, value) in [
        ("shop.catalog", &config.shop.catalog),
        ("shop.orders", &config.shop.orders),
        ("shop.reviews", &config.shop.reviews),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("{} is required", key));
        } else if !(value.ends_with(".toml") || value.ends_with(".json")) {
            warnings.push(format!("{} '{}' will be read as TOML", key, value));
        }
    }

    if EnvFilter::try_new(logging::directives(&config.logging.level, false)).is_err() {
        errors.push(format!("logging.level '{}' is not a valid filter", config.logging.level));
    }

    (errors, warnings)
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, mut warnings) = check(&ctx.config);

    let catalog_path = ctx.catalog_path();
    if !catalog_path.exists() {
        warnings.push(format!("catalog {} does not exist yet", catalog_path.display()));
    } else if let Err(e) = store::load::<InMemoryCatalog>(&catalog_path) {
        warnings.push(format!("catalog could not be loaded: {:#}", e));
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
