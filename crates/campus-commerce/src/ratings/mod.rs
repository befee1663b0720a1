//! Ratings module.
//!
//! Five-star reviews and per-product rating aggregates.

mod book;
mod summary;

pub use book::{RatingBook, Review};
pub use summary::{RatingSummary, Stars};
