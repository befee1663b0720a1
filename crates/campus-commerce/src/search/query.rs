//! Listing query: filter, then sort.

use crate::catalog::{InMemoryCatalog, Product};
use crate::error::CommerceError;
use crate::search::{Listing, ProductFilter};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Name A-Z.
    NameAsc,
    /// Name Z-A.
    NameDesc,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// New arrivals first.
    #[default]
    Newest,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::Rating,
        SortOption::Newest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Rating => "rating",
            SortOption::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
            SortOption::Newest => "Newest",
        }
    }

    /// Order two products. Ties keep catalog order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::NameAsc => compare_names(a, b),
            SortOption::NameDesc => compare_names(b, a),
            SortOption::PriceLow => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortOption::PriceHigh => b.price.amount_cents.cmp(&a.price.amount_cents),
            SortOption::Rating => b.rating.average.total_cmp(&a.rating.average),
            SortOption::Newest => b.is_new.cmp(&a.is_new),
        }
    }
}

fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| CommerceError::ValidationError(format!("unknown sort option: {}", s)))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run the listing pipeline over the active products of a catalog.
pub fn search<'a>(
    catalog: &'a InMemoryCatalog,
    filter: &ProductFilter,
    sort: SortOption,
) -> Listing<'a> {
    let mut total = 0;
    let mut items: Vec<&Product> = catalog
        .active()
        .inspect(|_| total += 1)
        .filter(|p| filter.matches(p))
        .collect();
    items.sort_by(|a, b| sort.compare(a, b));

    tracing::debug!(
        matched = items.len(),
        total,
        sort = sort.as_str(),
        "catalog listing"
    );
    Listing { items, total }
}
