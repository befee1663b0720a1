//! Checkout: turn the active cart into a submitted order snapshot.

use crate::cart::{Cart, CartEvent, LineItem};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Collaborator told about each purchased line during checkout.
///
/// Notifications are best-effort: a returned error is logged and counted on
/// the receipt but never rolls back or blocks the checkout.
pub trait PurchaseSink {
    fn notify_purchased(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError>;
}

impl<S: PurchaseSink + ?Sized> PurchaseSink for &mut S {
    fn notify_purchased(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        (**self).notify_purchased(product_id, quantity)
    }
}

/// Notifies both sinks, in order. Reports the first failure after both ran.
impl<A: PurchaseSink, B: PurchaseSink> PurchaseSink for (A, B) {
    fn notify_purchased(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let first = self.0.notify_purchased(product_id, quantity);
        let second = self.1.notify_purchased(product_id, quantity);
        first.and(second)
    }
}

/// Sink that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl PurchaseSink for NoopSink {
    fn notify_purchased(
        &mut self,
        _product_id: &ProductId,
        _quantity: i64,
    ) -> Result<(), CommerceError> {
        Ok(())
    }
}

/// What was checked out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutReceipt {
    /// Lines as they were at the moment of checkout.
    pub lines: Vec<LineItem>,
    /// Total units.
    pub item_count: i64,
    /// Total price.
    pub total: Money,
    /// Purchase notifications that reported an error.
    pub failed_notifications: usize,
    /// Unix timestamp of the checkout.
    pub checked_out_at: i64,
}

impl CheckoutReceipt {
    /// Check if nothing was checked out.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Cart {
    /// Submit the cart.
    ///
    /// Totals are computed from the cart as it is now; if that fails the
    /// cart is left unchanged. Otherwise `sink` is told about every line in
    /// cart order, the cart is emptied, and a receipt is returned. An empty
    /// cart checks out to an empty receipt.
    pub fn checkout<S: PurchaseSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<CheckoutReceipt, CommerceError> {
        let total = self.total_price()?;
        let item_count = self.total_item_count();
        let lines = self.take_lines();

        let mut failed_notifications = 0;
        for line in &lines {
            if let Err(e) = sink.notify_purchased(line.product_id(), line.quantity()) {
                failed_notifications += 1;
                tracing::warn!(
                    product_id = %line.product_id(),
                    quantity = line.quantity(),
                    error = %e,
                    "purchase notification failed"
                );
            }
        }

        tracing::info!(
            lines = lines.len(),
            item_count,
            total = %total,
            failed_notifications,
            "cart checked out"
        );
        self.emit(CartEvent::CheckedOut { item_count, total });

        Ok(CheckoutReceipt {
            lines,
            item_count,
            total,
            failed_notifications,
            checked_out_at: chrono::Utc::now().timestamp(),
        })
    }
}
