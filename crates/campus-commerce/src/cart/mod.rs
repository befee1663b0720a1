//! Shopping cart module.
//!
//! Contains the variant key, the cart ledger, change events and pricing.

mod cart;
mod events;
mod key;
mod pricing;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use events::{CartEvent, CartObserver};
pub use key::VariantKey;
pub use pricing::{CartTotals, LineTotal};
