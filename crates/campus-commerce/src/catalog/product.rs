//! Product types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::ratings::RatingSummary;
use serde::{Deserialize, Deserializer, Serialize};

/// Sizes offered when a product does not declare its own.
pub const DEFAULT_SIZES: [&str; 4] = ["S", "M", "L", "XL"];

/// Colors offered when a product does not declare its own.
pub const DEFAULT_COLORS: [&str; 3] = ["Black", "White", "Navy"];

/// A purchasable item in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Compare-at price (shown struck through when on sale).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Primary image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Club or organisation the merch belongs to.
    #[serde(default)]
    pub club: String,
    /// Category (e.g., "Hoodies").
    #[serde(default)]
    pub category: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Aggregate star rating.
    #[serde(default)]
    pub rating: RatingSummary,
    /// Sizes on offer, in display order.
    pub sizes: Vec<String>,
    /// Colors on offer, in display order.
    pub colors: Vec<String>,
    /// Optional badge (e.g., "Bestseller").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Shown first under the "newest" sort.
    #[serde(default)]
    pub is_new: bool,
    /// Inactive products are soft-deleted.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub care: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Create an active product with the default sizes and colors.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            image: None,
            club: String::new(),
            category: String::new(),
            description: String::new(),
            rating: RatingSummary::default(),
            sizes: DEFAULT_SIZES.iter().map(|s| s.to_string()).collect(),
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            badge: None,
            is_new: false,
            is_active: true,
            stock: 0,
            features: Vec::new(),
            material: None,
            care: Vec::new(),
        }
    }

    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = club.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Replace the offered sizes.
    pub fn with_sizes<S: Into<String>>(mut self, sizes: impl IntoIterator<Item = S>) -> Self {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the offered colors.
    pub fn with_colors<S: Into<String>>(mut self, colors: impl IntoIterator<Item = S>) -> Self {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn mark_new(mut self) -> Self {
        self.is_new = true;
        self
    }

    /// Whether `size` is one of the declared sizes (exact match).
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether `color` is one of the declared colors (exact match).
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Check if any units are in stock.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if this product is on sale (compare-at price above price).
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|op| op.amount_cents > self.price.amount_cents)
            .unwrap_or(false)
    }

    /// Calculate the discount percentage if on sale.
    pub fn discount_percentage(&self) -> Option<f64> {
        self.original_price.and_then(|op| {
            if op.amount_cents > self.price.amount_cents {
                let savings = op.amount_cents - self.price.amount_cents;
                Some((savings as f64 / op.amount_cents as f64) * 100.0)
            } else {
                None
            }
        })
    }

    /// Check the invariants a catalog entry must hold.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.id.as_str().is_empty() {
            return Err(CommerceError::ValidationError(
                "product id cannot be empty".to_string(),
            ));
        }
        if self.price.is_negative() {
            return Err(CommerceError::ValidationError(format!(
                "{}: price cannot be negative",
                self.id
            )));
        }
        if self.stock < 0 {
            return Err(CommerceError::ValidationError(format!(
                "{}: stock cannot be negative",
                self.id
            )));
        }
        if self.sizes.is_empty() || self.colors.is_empty() {
            return Err(CommerceError::ValidationError(format!(
                "{}: at least one size and one color are required",
                self.id
            )));
        }
        Ok(())
    }
}

/// A partial update to a product.
///
/// Fields left as `None` keep their current value. The optional product
/// fields take `Some(None)` to clear them, e.g. ending a sale by clearing
/// `original_price`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    #[serde(default, deserialize_with = "clearable")]
    pub original_price: Option<Option<Money>>,
    #[serde(default, deserialize_with = "clearable")]
    pub image: Option<Option<String>>,
    pub club: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    #[serde(default, deserialize_with = "clearable")]
    pub badge: Option<Option<String>>,
    pub is_new: Option<bool>,
    pub stock: Option<i64>,
}

/// A present field, `null` included, is an edit; a missing one is not.
fn clearable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ProductUpdate {
    /// Apply the set fields to `product`.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(original_price) = self.original_price {
            product.original_price = original_price;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(club) = self.club {
            product.club = club;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(sizes) = self.sizes {
            product.sizes = sizes;
        }
        if let Some(colors) = self.colors {
            product.colors = colors;
        }
        if let Some(badge) = self.badge {
            product.badge = badge;
        }
        if let Some(is_new) = self.is_new {
            product.is_new = is_new;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn tee() -> Product {
        Product::new("iitgn-tee", "IITGN Official T-Shirt", Money::from_major(899, Currency::INR))
    }

    #[test]
    fn test_product_defaults() {
        let product = tee();
        assert!(product.is_active);
        assert_eq!(product.sizes, vec!["S", "M", "L", "XL"]);
        assert_eq!(product.colors, vec!["Black", "White", "Navy"]);
        assert!(!product.in_stock());
    }

    #[test]
    fn test_selection_is_case_sensitive() {
        let product = tee();
        assert!(product.offers_size("M"));
        assert!(!product.offers_size("m"));
        assert!(product.offers_color("Black"));
        assert!(!product.offers_color("black"));
    }

    #[test]
    fn test_on_sale() {
        let product = tee().with_original_price(Money::from_major(1000, Currency::INR));
        assert!(product.is_on_sale());
        let discount = product.discount_percentage().unwrap();
        assert!((discount - 10.1).abs() < 0.01);
    }

    #[test]
    fn test_validate_rejects_empty_variants() {
        let product = tee().with_sizes(Vec::<String>::new());
        assert!(matches!(
            product.validate(),
            Err(CommerceError::ValidationError(_))
        ));
        assert!(tee().validate().is_ok());
    }

    #[test]
    fn test_partial_update() {
        let mut product = tee();
        ProductUpdate {
            stock: Some(12),
            badge: Some(Some("Bestseller".to_string())),
            ..Default::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.stock, 12);
        assert_eq!(product.badge.as_deref(), Some("Bestseller"));
        assert_eq!(product.name, "IITGN Official T-Shirt");
    }

    #[test]
    fn test_update_can_end_a_sale() {
        let mut product = tee().with_original_price(Money::from_major(1000, Currency::INR));
        product.badge = Some("Sale".to_string());

        let update: ProductUpdate =
            serde_json::from_str(r#"{"original_price": null, "badge": null}"#).unwrap();
        assert_eq!(update.original_price, Some(None));
        update.apply_to(&mut product);

        assert!(product.original_price.is_none());
        assert!(product.badge.is_none());
        assert!(!product.is_on_sale());

        let untouched: ProductUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(untouched, ProductUpdate::default());
    }
}
