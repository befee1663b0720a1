//! Search module.
//!
//! Filters and sort orders for catalog listings.

mod filter;
mod query;
mod results;

pub use filter::ProductFilter;
pub use query::{search, SortOption};
pub use results::Listing;
