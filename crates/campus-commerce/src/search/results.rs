//! Listing results.

use crate::catalog::Product;
use serde::Serialize;

/// Products matched by a listing query, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<'a> {
    pub items: Vec<&'a Product>,
    /// Active products considered before filtering.
    pub total: usize,
}

impl<'a> Listing<'a> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Summary line, e.g. "Showing 3 of 12 products".
    pub fn summary(&self) -> String {
        format!("Showing {} of {} products", self.items.len(), self.total)
    }
}
