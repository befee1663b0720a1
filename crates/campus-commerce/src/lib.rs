//! Commerce engine for a campus merch store.
//!
//! This crate provides the types and logic behind the storefront:
//!
//! - **Cart**: Variant-keyed shopping cart ledger, pricing, change events
//! - **Checkout**: Checkout trigger, purchase notifications, orders
//! - **Catalog**: Products and an in-memory catalog
//! - **Search**: Catalog filters and sort orders
//! - **Ratings**: Verified-purchase reviews and running averages
//!
//! # Example
//!
//! ```rust
//! use campus_commerce::prelude::*;
//!
//! let tee = Product::new("tee", "Hallabol T-Shirt", Money::from_major(799, Currency::INR));
//!
//! let mut cart = Cart::new(Currency::INR);
//! cart.add_item(&tee, "M", "Black", 1).unwrap();
//! cart.add_item(&tee, "M", "Black", 2).unwrap();
//! cart.add_item(&tee, "L", "Black", 1).unwrap();
//!
//! assert_eq!(cart.len(), 2);
//! assert_eq!(cart.total_item_count(), 4);
//! assert_eq!(cart.total_price().unwrap().display(), "₹3196.00");
//!
//! let receipt = cart.checkout(&mut NoopSink).unwrap();
//! assert_eq!(receipt.item_count, 4);
//! assert!(cart.is_empty());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod ratings;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{Cart, CartEvent, CartObserver, CartTotals, LineItem, VariantKey};

    // Checkout
    pub use crate::checkout::{
        CheckoutReceipt, NoopSink, Order, OrderBook, OrderStatus, PaymentStatus, PurchaseSink,
    };

    // Catalog
    pub use crate::catalog::{CatalogLookup, InMemoryCatalog, Product, ProductUpdate};

    // Search
    pub use crate::search::{search, Listing, ProductFilter, SortOption};

    // Ratings
    pub use crate::ratings::{RatingBook, RatingSummary, Review, Stars};
}
