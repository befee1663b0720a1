//! Cart and line item types.

use crate::cart::{CartEvent, CartObserver, VariantKey};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart owned by one shopper session.
///
/// Lines are kept in insertion order and no two lines share a
/// [`VariantKey`]. Every line has a strictly positive quantity; a line whose
/// quantity would drop to zero is removed instead.
pub struct Cart {
    currency: Currency,
    lines: Vec<LineItem>,
    observers: Vec<Box<dyn CartObserver>>,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            lines: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for cart events.
    pub fn subscribe(&mut self, observer: Box<dyn CartObserver>) {
        self.observers.push(observer);
    }

    /// Add units of a product variant to the cart.
    ///
    /// Merges into the existing line for the same product, size and color,
    /// otherwise appends a new line. The unit price is captured from
    /// `product` when the line is first created.
    ///
    /// Returns the line's quantity after the add. Fails without touching the
    /// cart if:
    /// - Quantity is not positive
    /// - Size or color is not offered by the product
    /// - The product is priced in another currency
    /// - The line would exceed MAX_QUANTITY_PER_ITEM
    pub fn add_item(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> Result<i64, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if !product.offers_size(size) || !product.offers_color(color) {
            return Err(CommerceError::InvalidSelection {
                product_id: product.id.to_string(),
                size: size.to_string(),
                color: color.to_string(),
            });
        }

        if product.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }

        let line_quantity = match self.position(&product.id, size, color) {
            Some(index) => {
                let line = &mut self.lines[index];
                let new_quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CommerceError::Overflow)?;
                check_limit(new_quantity)?;
                line.quantity = new_quantity;
                new_quantity
            }
            None => {
                check_limit(quantity)?;
                self.lines.push(LineItem::new(product, size, color, quantity));
                quantity
            }
        };

        tracing::debug!(
            product_id = %product.id,
            size,
            color,
            added = quantity,
            line_quantity,
            "item added to cart"
        );
        self.emit(CartEvent::ItemAdded {
            key: VariantKey::new(product.id.clone(), size, color),
            product_name: product.name.clone(),
            added: quantity,
            line_quantity,
        });

        Ok(line_quantity)
    }

    /// Remove a line from the cart.
    ///
    /// Removing a line that is not in the cart is a no-op. Returns whether a
    /// line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId, size: &str, color: &str) -> bool {
        let Some(index) = self.position(product_id, size, color) else {
            return false;
        };

        let line = self.lines.remove(index);
        tracing::debug!(product_id = %product_id, size, color, "item removed from cart");
        self.emit(CartEvent::ItemRemoved { key: line.key });
        true
    }

    /// Replace a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Returns whether a line
    /// was changed or removed; a missing line is left absent.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id, size, color));
        }

        let Some(index) = self.position(product_id, size, color) else {
            return Ok(false);
        };

        check_limit(quantity)?;

        let line = &mut self.lines[index];
        line.quantity = quantity;
        let key = line.key.clone();

        tracing::debug!(product_id = %product_id, size, color, quantity, "cart quantity set");
        self.emit(CartEvent::QuantityChanged { key, quantity });
        Ok(true)
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        tracing::debug!("cart cleared");
        self.emit(CartEvent::Cleared);
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Get a line by its key.
    pub fn line(&self, key: &VariantKey) -> Option<&LineItem> {
        self.lines.iter().find(|l| &l.key == key)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    fn position(&self, product_id: &ProductId, size: &str, color: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.key.matches(product_id, size, color))
    }

    /// Drop every line without notifying observers.
    pub(crate) fn take_lines(&mut self) -> Vec<LineItem> {
        std::mem::take(&mut self.lines)
    }

    pub(crate) fn emit(&self, event: CartEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("currency", &self.currency)
            .field("lines", &self.lines)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn check_limit(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    key: VariantKey,
    /// Product name at the time the line was created.
    product_name: String,
    /// Unit price captured when the line was created.
    unit_price: Money,
    /// Compare-at price captured with the unit price.
    original_price: Option<Money>,
    quantity: i64,
}

impl LineItem {
    fn new(product: &Product, size: &str, color: &str, quantity: i64) -> Self {
        Self {
            key: VariantKey::new(product.id.clone(), size, color),
            product_name: product.name.clone(),
            unit_price: product.price,
            original_price: product.original_price,
            quantity,
        }
    }

    pub fn key(&self) -> &VariantKey {
        &self.key
    }

    pub fn product_id(&self) -> &ProductId {
        &self.key.product_id
    }

    pub fn size(&self) -> &str {
        &self.key.size
    }

    pub fn color(&self) -> &str {
        &self.key.color
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn original_price(&self) -> Option<Money> {
        self.original_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tee() -> Product {
        Product::new("tee", "IITGN Official T-Shirt", Money::from_major(899, Currency::INR))
            .with_sizes(["S", "M", "L"])
            .with_colors(["Black", "White"])
    }

    fn tee_id() -> ProductId {
        ProductId::new("tee")
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::INR);
        assert!(cart.is_empty());
        assert_eq!(cart.currency(), Currency::INR);
    }

    #[test]
    fn test_add_same_variant_merges() {
        let mut cart = Cart::default();
        cart.add_item(&tee(), "M", "Black", 1).unwrap();
        let quantity = cart.add_item(&tee(), "M", "Black", 2).unwrap();

        assert_eq!(quantity, 3);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 3);
    }

    #[test]
    fn test_add_different_variant_appends_in_order() {
        let mut cart = Cart::default();
        cart.add_item(&tee(), "M", "Black", 1).unwrap();
        cart.add_item(&tee(), "M", "White", 1).unwrap();
        cart.add_item(&tee(), "S", "Black", 1).unwrap();

        let keys: Vec<_> = cart
            .lines()
            .iter()
            .map(|l| (l.size(), l.color()))
            .collect();
        assert_eq!(keys, vec![("M", "Black"), ("M", "White"), ("S", "Black")]);
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::default();
        assert_eq!(
            cart.add_item(&tee(), "M", "Black", 0),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert_eq!(
            cart.add_item(&tee(), "M", "Black", -3),
            Err(CommerceError::InvalidQuantity(-3))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_invalid_selection() {
        let mut cart = Cart::default();
        let result = cart.add_item(&tee(), "XXL", "Black", 1);
        assert!(matches!(result, Err(CommerceError::InvalidSelection { .. })));
        let result = cart.add_item(&tee(), "M", "black", 1);
        assert!(matches!(result, Err(CommerceError::InvalidSelection { .. })));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_currency_mismatch() {
        let mut cart = Cart::new(Currency::USD);
        let result = cart.add_item(&tee(), "M", "Black", 1);
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_quantity_limit_leaves_line_unchanged() {
        let mut cart = Cart::default();
        cart.add_item(&tee(), "M", "Black", MAX_QUANTITY_PER_ITEM - 1).unwrap();
        let result = cart.add_item(&tee(), "M", "Black", 2);

        assert!(matches!(result, Err(CommerceError::QuantityExceedsLimit(..))));
        assert_eq!(cart.lines()[0].quantity(), MAX_QUANTITY_PER_ITEM - 1);

        let result = cart.add_item(&tee(), "L", "Black", MAX_QUANTITY_PER_ITEM + 1);
        assert!(result.is_err());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_unit_price_is_captured() {
        let mut cart = Cart::default();
        let mut product = tee();
        cart.add_item(&product, "M", "Black", 1).unwrap();

        product.price = Money::from_major(999, Currency::INR);
        cart.add_item(&product, "M", "Black", 1).unwrap();

        assert_eq!(cart.lines()[0].unit_price(), Money::from_major(899, Currency::INR));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::default();
        cart.add_item(&tee(), "M", "Black", 1).unwrap();

        assert!(cart.remove_item(&tee_id(), "M", "Black"));
        assert!(!cart.remove_item(&tee_id(), "M", "Black"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::default();
        cart.add_item(&tee(), "M", "Black", 1).unwrap();

        assert!(cart.set_quantity(&tee_id(), "M", "Black", 5).unwrap());
        assert_eq!(cart.lines()[0].quantity(), 5);

        assert!(!cart.set_quantity(&tee_id(), "L", "Black", 5).unwrap());
        assert_eq!(cart.len(), 1);

        let missing = ProductId::new("nope");
        let result = cart.set_quantity(&missing, "M", "Black", MAX_QUANTITY_PER_ITEM + 1);
        assert_eq!(result, Ok(false));
        assert_eq!(cart.total_item_count(), 5);
    }

    #[test]
    fn test_set_quantity_non_positive_removes() {
        let mut cart = Cart::default();
        cart.add_item(&tee(), "M", "Black", 2).unwrap();
        cart.add_item(&tee(), "L", "Black", 2).unwrap();

        assert!(cart.set_quantity(&tee_id(), "M", "Black", 0).unwrap());
        assert!(cart.set_quantity(&tee_id(), "L", "Black", -1).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_over_limit() {
        let mut cart = Cart::default();
        cart.add_item(&tee(), "M", "Black", 2).unwrap();
        let result = cart.set_quantity(&tee_id(), "M", "Black", MAX_QUANTITY_PER_ITEM + 1);
        assert!(result.is_err());
        assert_eq!(cart.lines()[0].quantity(), 2);
    }

    #[test]
    fn test_observers_receive_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut cart = Cart::default();
        cart.subscribe(Box::new(move |event: &CartEvent| {
            sink.borrow_mut().push(event.title());
        }));

        cart.add_item(&tee(), "M", "Black", 1).unwrap();
        cart.set_quantity(&tee_id(), "M", "Black", 3).unwrap();
        cart.remove_item(&tee_id(), "M", "Black");
        cart.remove_item(&tee_id(), "M", "Black");
        let _ = cart.add_item(&tee(), "M", "Black", 0);
        cart.clear();

        assert_eq!(
            *seen.borrow(),
            vec![
                "Added to cart",
                "Quantity updated",
                "Removed from cart",
                "Cart cleared"
            ]
        );
    }
}
