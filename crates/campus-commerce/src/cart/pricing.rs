//! Cart pricing calculations.
//!
//! Totals are always derived from the current lines and never stored.

use crate::cart::{Cart, LineItem, VariantKey};
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

impl Cart {
    /// Sum of quantities across all lines. Zero for an empty cart.
    pub fn total_item_count(&self) -> i64 {
        self.lines().iter().map(LineItem::quantity).sum()
    }

    /// Sum of captured unit price times quantity. Zero for an empty cart.
    ///
    /// Returns error if arithmetic overflow occurs.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        let subtotals = self
            .lines()
            .iter()
            .map(LineItem::subtotal)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(subtotals.iter(), self.currency()).ok_or(CommerceError::Overflow)
    }

    /// Full pricing breakdown for display.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        let currency = self.currency();
        let mut lines = Vec::with_capacity(self.len());
        let mut subtotal = Money::zero(currency);
        let mut compare_at_total = Money::zero(currency);

        for line in self.lines() {
            let line_subtotal = line.subtotal()?;
            let compare_at = line
                .original_price()
                .filter(|op| op.amount_cents > line.unit_price().amount_cents)
                .unwrap_or(line.unit_price())
                .try_multiply(line.quantity())
                .ok_or(CommerceError::Overflow)?;

            subtotal = subtotal
                .try_add(&line_subtotal)
                .ok_or(CommerceError::Overflow)?;
            compare_at_total = compare_at_total
                .try_add(&compare_at)
                .ok_or(CommerceError::Overflow)?;

            lines.push(LineTotal {
                key: line.key().clone(),
                product_name: line.product_name().to_string(),
                unit_price: line.unit_price(),
                quantity: line.quantity(),
                subtotal: line_subtotal,
            });
        }

        Ok(CartTotals {
            item_count: self.total_item_count(),
            subtotal,
            compare_at_total,
            lines,
        })
    }
}

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Total units across all lines.
    pub item_count: i64,
    /// Sum of line subtotals; what the shopper pays.
    pub subtotal: Money,
    /// Sum at compare-at prices, where a line is on sale.
    pub compare_at_total: Money,
    /// Per-line breakdown in cart order.
    pub lines: Vec<LineTotal>,
}

impl CartTotals {
    /// Amount saved against compare-at prices.
    pub fn savings(&self) -> Money {
        Money::new(
            self.compare_at_total.amount_cents - self.subtotal.amount_cents,
            self.subtotal.currency,
        )
    }

    /// Check if any line is on sale.
    pub fn has_savings(&self) -> bool {
        self.savings().amount_cents > 0
    }

    /// Savings as a percentage of the compare-at total.
    pub fn savings_percentage(&self) -> f64 {
        if self.compare_at_total.amount_cents == 0 {
            return 0.0;
        }
        (self.savings().amount_cents as f64 / self.compare_at_total.amount_cents as f64) * 100.0
    }
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineTotal {
    pub key: VariantKey,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price * quantity.
    pub subtotal: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Currency;

    fn inr(major: i64) -> Money {
        Money::from_major(major, Currency::INR)
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new(Currency::INR);
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price().unwrap(), Money::zero(Currency::INR));

        let totals = cart.totals().unwrap();
        assert!(totals.lines.is_empty());
        assert!(!totals.has_savings());
        assert_eq!(totals.savings_percentage(), 0.0);
    }

    #[test]
    fn test_totals_sum_lines() {
        let tee = Product::new("tee", "Hallabol T-Shirt", inr(799));
        let hoodie = Product::new("hoodie", "Amalthea Hoodie", inr(1299));

        let mut cart = Cart::new(Currency::INR);
        cart.add_item(&tee, "M", "Black", 2).unwrap();
        cart.add_item(&hoodie, "L", "Navy", 1).unwrap();

        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.total_price().unwrap(), inr(2 * 799 + 1299));

        let totals = cart.totals().unwrap();
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.lines[0].subtotal, inr(1598));
        assert_eq!(totals.lines[1].subtotal, inr(1299));
    }

    #[test]
    fn test_totals_are_repeatable() {
        let tee = Product::new("tee", "Hallabol T-Shirt", inr(799));
        let mut cart = Cart::new(Currency::INR);
        cart.add_item(&tee, "S", "White", 4).unwrap();

        let first = cart.totals().unwrap();
        let second = cart.totals().unwrap();
        assert_eq!(first, second);
        assert_eq!(cart.total_item_count(), 4);
    }

    #[test]
    fn test_savings_against_compare_at() {
        let jacket = Product::new("jacket", "TEDx Varsity Jacket", inr(2499))
            .with_original_price(inr(2999));
        let mug = Product::new("mug", "Blithchron Mug", inr(399));

        let mut cart = Cart::new(Currency::INR);
        cart.add_item(&jacket, "M", "Navy", 2).unwrap();
        cart.add_item(&mug, "M", "White", 1).unwrap();

        let totals = cart.totals().unwrap();
        assert_eq!(totals.savings(), inr(1000));
        assert!(totals.has_savings());
    }

    #[test]
    fn test_overflow_is_reported() {
        let expensive =
            Product::new("gold", "Gold Edition", Money::new(i64::MAX / 4, Currency::INR));
        let mut cart = Cart::new(Currency::INR);
        cart.add_item(&expensive, "M", "Black", 5).unwrap();

        assert_eq!(cart.total_price(), Err(CommerceError::Overflow));
        assert_eq!(cart.total_item_count(), 5);
    }
}
