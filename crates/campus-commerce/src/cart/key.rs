//! Cart line identity.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a cart line: product x size x color.
///
/// Two lines are the same line iff all three components are equal. Matching
/// is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl VariantKey {
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }

    /// Compare against borrowed components without allocating a key.
    pub fn matches(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        &self.product_id == product_id && self.size == size && self.color == color
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.product_id, self.size, self.color)
    }
}
