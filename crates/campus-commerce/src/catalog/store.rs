//! In-memory product store.

use crate::catalog::{Product, ProductUpdate};
use crate::checkout::PurchaseSink;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::ratings::RatingSummary;
use serde::{Deserialize, Serialize};

/// Resolves a product reference before it is added to a cart.
pub trait CatalogLookup {
    /// Look up an active product by ID.
    fn get_item(&self, id: &ProductId) -> Option<&Product>;
}

/// Catalog held in memory, seeded from static data or a file.
///
/// Products keep their insertion order. Deletion is soft: the product is
/// marked inactive and disappears from lookups and listings.
///
/// Deserializing goes through [`InMemoryCatalog::from_products`], so a
/// catalog file with an invalid or duplicate product is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "CatalogFile")]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

/// On-disk shape of a catalog.
#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

impl TryFrom<CatalogFile> for InMemoryCatalog {
    type Error = CommerceError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Self::from_products(file.products)
    }
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from seed products, validating each.
    ///
    /// Inactive products are kept (and validated) so soft deletes survive a
    /// save and reload.
    pub fn from_products(
        products: impl IntoIterator<Item = Product>,
    ) -> Result<Self, CommerceError> {
        let mut catalog = Self::new();
        for product in products {
            catalog.add(product)?;
        }
        Ok(catalog)
    }

    /// Add a product.
    pub fn add(&mut self, product: Product) -> Result<(), CommerceError> {
        product.validate()?;
        if self.products.iter().any(|p| p.id == product.id) {
            return Err(CommerceError::ValidationError(format!(
                "duplicate product id: {}",
                product.id
            )));
        }
        tracing::debug!(product_id = %product.id, "product added to catalog");
        self.products.push(product);
        Ok(())
    }

    /// Apply a partial update to a product.
    ///
    /// The update is rejected, and the product left as it was, if the
    /// result would no longer be a valid catalog entry.
    pub fn update(
        &mut self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<&Product, CommerceError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;

        let mut updated = product.clone();
        update.apply_to(&mut updated);
        updated.validate()?;
        *product = updated;

        tracing::debug!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Soft-delete a product.
    pub fn delete(&mut self, id: &ProductId) -> Result<(), CommerceError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == id && p.is_active)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        product.is_active = false;
        tracing::debug!(product_id = %id, "product deactivated");
        Ok(())
    }

    /// Copy an aggregate rating onto a product.
    pub fn apply_rating(
        &mut self,
        id: &ProductId,
        summary: RatingSummary,
    ) -> Result<(), CommerceError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        product.rating = summary;
        Ok(())
    }

    /// Get an active product by ID.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id && p.is_active)
    }

    /// Iterate over active products in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_active)
    }

    /// Number of active products.
    pub fn len(&self) -> usize {
        self.active().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn get_item(&self, id: &ProductId) -> Option<&Product> {
        self.get(id)
    }
}

/// Purchases draw stock down, never below zero.
impl PurchaseSink for InMemoryCatalog {
    fn notify_purchased(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
        product.stock = product.stock.saturating_sub(quantity).max(0);
        tracing::debug!(product_id = %product_id, stock = product.stock, "stock decremented");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_products([
            Product::new("tee", "Hallabol T-Shirt", Money::from_major(799, Currency::INR)),
            Product::new("mug", "Blithchron Mug", Money::from_major(399, Currency::INR))
                .with_sizes(["One Size"])
                .with_colors(["White"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get_item(&ProductId::new("mug")).is_some());
        assert!(catalog.get_item(&ProductId::new("cap")).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = catalog();
        let result = catalog.add(Product::new("tee", "Other", Money::from_major(1, Currency::INR)));
        assert!(matches!(result, Err(CommerceError::ValidationError(_))));
    }

    #[test]
    fn test_soft_delete_hides_product() {
        let mut catalog = catalog();
        catalog.delete(&ProductId::new("tee")).unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(&ProductId::new("tee")).is_none());
        assert!(matches!(
            catalog.delete(&ProductId::new("tee")),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_update_is_rejected() {
        let mut catalog = catalog();
        let id = ProductId::new("tee");
        let result = catalog.update(
            &id,
            ProductUpdate {
                stock: Some(-1),
                ..Default::default()
            },
        );
        assert!(result.is_err());
        assert_eq!(catalog.get(&id).unwrap().stock, 0);

        let updated = catalog
            .update(
                &id,
                ProductUpdate {
                    stock: Some(40),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.stock, 40);
    }

    #[test]
    fn test_purchase_decrements_stock() {
        let mut catalog = catalog();
        let id = ProductId::new("tee");
        catalog
            .update(
                &id,
                ProductUpdate {
                    stock: Some(5),
                    ..Default::default()
                },
            )
            .unwrap();

        catalog.notify_purchased(&id, 3).unwrap();
        assert_eq!(catalog.get(&id).unwrap().stock, 2);
        catalog.notify_purchased(&id, 10).unwrap();
        assert_eq!(catalog.get(&id).unwrap().stock, 0);

        let missing = catalog.notify_purchased(&ProductId::new("cap"), 1);
        assert!(matches!(missing, Err(CommerceError::ProductNotFound(_))));
    }

    #[test]
    fn test_catalog_json_roundtrip() {
        let catalog = catalog();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: InMemoryCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_soft_delete_survives_reload() {
        let mut catalog = catalog();
        catalog.delete(&ProductId::new("mug")).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: InMemoryCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed.get(&ProductId::new("mug")).is_none());
    }

    fn product_json(id: &str, price: i64, sizes: &str, stock: i64) -> String {
        format!(
            r#"{{"id":"{id}","name":"{id}","price":{{"amount_cents":{price},"currency":"INR"}},"sizes":{sizes},"colors":["Black"],"stock":{stock}}}"#
        )
    }

    #[test]
    fn test_invalid_catalog_file_rejected() {
        let good = product_json("tee", 79900, r#"["M"]"#, 3);
        let parsed: InMemoryCatalog =
            serde_json::from_str(&format!(r#"{{"products":[{good}]}}"#)).unwrap();
        assert_eq!(parsed.len(), 1);

        let bad_entries = [
            product_json("tee", -500, r#"["M"]"#, 3),
            product_json("tee", 79900, "[]", 3),
            product_json("tee", 79900, r#"["M"]"#, -3),
            format!("{good},{good}"),
        ];
        for entries in bad_entries {
            let json = format!(r#"{{"products":[{entries}]}}"#);
            let result = serde_json::from_str::<InMemoryCatalog>(&json);
            assert!(result.is_err(), "accepted {json}");
        }
    }
}
