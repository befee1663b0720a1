//! Product catalog module.
//!
//! Contains the purchasable item type and the in-memory product store.

mod product;
mod store;

pub use product::{Product, ProductUpdate, DEFAULT_COLORS, DEFAULT_SIZES};
pub use store::{CatalogLookup, InMemoryCatalog};
