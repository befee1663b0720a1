//! Campus CLI - Command line front end for the campus merch store.
//!
//! Commands:
//! - `campus init` - Write a config and a sample catalog
//! - `campus products` - List, show and remove catalog products
//! - `campus checkout` - Check out a cart file into an order
//! - `campus orders` - List orders and update their status
//! - `campus rate` - Rate a purchased product
//! - `campus config` - Show or validate configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CheckoutArgs, ConfigArgs, InitArgs, OrdersArgs, ProductsArgs, RateArgs};

/// Campus CLI - Browse, buy and rate campus club merch
#[derive(Parser)]
#[command(name = "campus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a config file and sample catalog
    Init(InitArgs),

    /// Browse and manage the catalog
    Products(ProductsArgs),

    /// Check out a cart file
    Checkout(CheckoutArgs),

    /// List and update orders
    Orders(OrdersArgs),

    /// Rate a product you bought
    Rate(RateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init(&ctx.config.logging, cli.verbose);
    tracing::debug!(config = ?ctx.config_path, "configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args, &ctx),
        Commands::Products(args) => commands::products::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Orders(args) => commands::orders::run(args, &ctx),
        Commands::Rate(args) => commands::rate::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
