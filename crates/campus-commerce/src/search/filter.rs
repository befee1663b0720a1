//! Product filters.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Narrows a catalog listing. The default filter matches every product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name, club or category.
    #[serde(default)]
    pub search: String,
    /// Clubs to keep; empty keeps all.
    #[serde(default)]
    pub clubs: Vec<String>,
    /// Categories to keep; empty keeps all.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Inclusive lower price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Money>,
    /// Inclusive upper price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Money>,
    /// Keep only products with stock on hand.
    #[serde(default)]
    pub in_stock_only: bool,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.clubs.push(club.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn in_stock(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    /// Check whether a product passes every criterion.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && (self.clubs.is_empty() || self.clubs.iter().any(|c| c == &product.club))
            && (self.categories.is_empty()
                || self.categories.iter().any(|c| c == &product.category))
            && self
                .min_price
                .map_or(true, |min| product.price.amount_cents >= min.amount_cents)
            && self
                .max_price
                .map_or(true, |max| product.price.amount_cents <= max.amount_cents)
            && (!self.in_stock_only || product.in_stock())
    }

    fn matches_search(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&product.name, &product.club, &product.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
