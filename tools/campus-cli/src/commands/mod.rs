//! CLI command implementations.

pub mod checkout;
pub mod config;
pub mod init;
pub mod orders;
pub mod products;
pub mod rate;

use clap::{Args, Subcommand};

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Store name written to the config.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Overwrite an existing config and catalog.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products, filtered and sorted.
    List(ListArgs),
    /// Add a product to the catalog.
    Add(AddProductArgs),
    /// Change fields of an existing product.
    Update(UpdateProductArgs),
    /// Show details for a product.
    Show {
        /// Product ID.
        id: String,
    },
    /// Remove a product from the catalog.
    Remove {
        /// Product ID.
        id: String,
    },
}

/// Filters for `products list`.
#[derive(Args)]
pub struct ListArgs {
    /// Match name, club or category (case-insensitive).
    #[arg(short, long)]
    pub search: Option<String>,

    /// Keep only these clubs (repeatable).
    #[arg(long)]
    pub club: Vec<String>,

    /// Keep only these categories (repeatable).
    #[arg(long)]
    pub category: Vec<String>,

    /// Minimum price, in major units.
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Maximum price, in major units.
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Only show products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Sort order: name-asc, name-desc, price-low, price-high, rating, newest.
    #[arg(long, default_value = "newest")]
    pub sort: String,
}

/// Fields for `products add`. Prices are in major units.
#[derive(Args)]
pub struct AddProductArgs {
    /// Product name.
    pub name: String,

    /// Product ID (generated when omitted).
    #[arg(long)]
    pub id: Option<String>,

    /// Unit price.
    #[arg(long)]
    pub price: i64,

    /// Compare-at price, shown struck through.
    #[arg(long)]
    pub original_price: Option<i64>,

    #[arg(long)]
    pub club: String,

    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Offered size (repeatable; defaults to S, M, L, XL).
    #[arg(long)]
    pub size: Vec<String>,

    /// Offered color (repeatable; defaults to Black, White, Navy).
    #[arg(long)]
    pub color: Vec<String>,

    #[arg(long, default_value_t = 0)]
    pub stock: i64,

    #[arg(long)]
    pub badge: Option<String>,

    /// Show first under the newest sort.
    #[arg(long)]
    pub new: bool,
}

/// Fields for `products update`. Omitted flags keep the current value.
#[derive(Args)]
pub struct UpdateProductArgs {
    /// Product ID.
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub price: Option<i64>,

    #[arg(long, conflicts_with = "clear_original_price")]
    pub original_price: Option<i64>,

    /// Drop the compare-at price.
    #[arg(long)]
    pub clear_original_price: bool,

    #[arg(long)]
    pub club: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Replace the offered sizes (repeatable).
    #[arg(long)]
    pub size: Vec<String>,

    /// Replace the offered colors (repeatable).
    #[arg(long)]
    pub color: Vec<String>,

    #[arg(long)]
    pub stock: Option<i64>,

    #[arg(long, conflicts_with = "clear_badge")]
    pub badge: Option<String>,

    #[arg(long)]
    pub clear_badge: bool,

    /// Set or unset the "new" flag.
    #[arg(long)]
    pub new: Option<bool>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Cart file (TOML or JSON) listing product, size, color and quantity.
    pub cart_file: String,

    /// User placing the order.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Payment method recorded on the order.
    #[arg(long)]
    pub payment: Option<String>,

    /// Show totals without checking out.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the rate command.
#[derive(Args)]
pub struct RateArgs {
    /// Product ID.
    pub product: String,

    /// Stars, 1 to 5.
    pub stars: i64,

    /// User submitting the rating.
    #[arg(short, long)]
    pub user: String,

    /// Optional review text.
    #[arg(short, long)]
    pub review: Option<String>,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List orders, newest first.
    List {
        /// Only orders placed by this user.
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Move an order to a new status.
    Update {
        /// Order ID.
        id: String,
        /// pending, confirmed, processing, shipped, delivered or cancelled.
        status: String,
        /// Payment status: pending, paid, failed or refunded.
        #[arg(long)]
        payment: Option<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Validate the config file.
    Validate,
}
