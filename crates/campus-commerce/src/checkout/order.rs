//! Order types.

use crate::checkout::CheckoutReceipt;
use crate::error::CommerceError;
use crate::ids::{OrderId, OrderLineItemId, ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order confirmed.
    Confirmed,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if order can be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Processing
        )
    }

    /// Whether moving to `next` is allowed. Orders only move forward.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (_, OrderStatus::Cancelled) => self.can_cancel(),
            (OrderStatus::Pending, OrderStatus::Confirmed)
            | (OrderStatus::Confirmed, OrderStatus::Processing)
            | (OrderStatus::Processing, OrderStatus::Shipped)
            | (OrderStatus::Shipped, OrderStatus::Delivered) => true,
            _ => false,
        }
    }
}

/// Payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment pending.
    #[default]
    Pending,
    /// Payment captured.
    Paid,
    /// Payment attempt failed.
    Failed,
    /// Payment refunded.
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

/// A submitted order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    /// Customer user ID (None for guest).
    pub user_id: Option<UserId>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    /// Items in the order.
    pub line_items: Vec<OrderLineItem>,
    /// Total charged.
    pub total_amount: Money,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Order {
    /// Build a pending order from a checkout receipt.
    pub fn from_receipt(
        receipt: &CheckoutReceipt,
        user_id: Option<UserId>,
        shipping_address: Option<String>,
    ) -> Result<Self, CommerceError> {
        let line_items = receipt
            .lines
            .iter()
            .map(|line| {
                Ok(OrderLineItem {
                    id: OrderLineItemId::generate(),
                    product_id: line.product_id().clone(),
                    name: line.product_name().to_string(),
                    size: line.size().to_string(),
                    color: line.color().to_string(),
                    quantity: line.quantity(),
                    unit_price: line.unit_price(),
                    total_price: line.subtotal()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(Self {
            id: OrderId::generate(),
            order_number: Self::generate_order_number(receipt.checked_out_at, 0),
            user_id,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            shipping_address,
            line_items,
            total_amount: receipt.total,
            created_at: receipt.checked_out_at,
            updated_at: receipt.checked_out_at,
        })
    }

    /// Record how the order was paid for.
    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    /// Order number for the `sequence`-th order placed at `timestamp`.
    ///
    /// Orders built outside a book carry sequence 0 until
    /// [`OrderBook::record`](crate::checkout::OrderBook::record) numbers them.
    pub fn generate_order_number(timestamp: i64, sequence: usize) -> String {
        format!("ORD-{}-{:04}", timestamp, sequence)
    }

    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the order includes a product.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.line_items.iter().any(|i| &i.product_id == product_id)
    }

    /// Check if order is paid.
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// Move the order to a new status.
    pub fn set_status(&mut self, status: OrderStatus) -> Result<(), CommerceError> {
        if status == self.status {
            return Ok(());
        }
        if !self.status.can_transition_to(status) {
            return Err(CommerceError::InvalidOrderTransition {
                from: self.status.as_str().to_string(),
                to: status.as_str().to_string(),
            });
        }
        self.status = status;
        self.updated_at = chrono::Utc::now().timestamp();
        Ok(())
    }

    /// Update payment status.
    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
        self.updated_at = chrono::Utc::now().timestamp();
    }
}

/// A line item in an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    pub id: OrderLineItemId,
    pub product_id: ProductId,
    /// Product name at time of order.
    pub name: String,
    pub size: String,
    pub color: String,
    pub quantity: i64,
    /// Unit price at time of order.
    pub unit_price: Money,
    /// Total price for this line.
    pub total_price: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::Product;
    use crate::checkout::NoopSink;
    use crate::money::Currency;

    fn order() -> Order {
        let tee = Product::new("tee", "Hallabol T-Shirt", Money::from_major(799, Currency::INR));
        let mut cart = Cart::new(Currency::INR);
        cart.add_item(&tee, "M", "Black", 2).unwrap();
        let receipt = cart.checkout(&mut NoopSink).unwrap();
        Order::from_receipt(&receipt, Some(UserId::new("u1")), None).unwrap()
    }

    #[test]
    fn test_order_from_receipt() {
        let order = order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.total_amount, Money::from_major(1598, Currency::INR));
        assert_eq!(order.line_items[0].total_price, Money::from_major(1598, Currency::INR));
        assert!(order.contains(&ProductId::new("tee")));
        assert_eq!(
            order.order_number,
            Order::generate_order_number(order.created_at, 0)
        );
    }

    #[test]
    fn test_order_status_can_cancel() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Confirmed.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
    }

    #[test]
    fn test_status_moves_forward_only() {
        let mut order = order();
        order.set_status(OrderStatus::Confirmed).unwrap();
        order.set_status(OrderStatus::Processing).unwrap();
        assert!(matches!(
            order.set_status(OrderStatus::Pending),
            Err(CommerceError::InvalidOrderTransition { .. })
        ));
        order.set_status(OrderStatus::Shipped).unwrap();
        assert!(order.set_status(OrderStatus::Cancelled).is_err());
        order.set_status(OrderStatus::Delivered).unwrap();
        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(OrderStatus::from_str("Shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::from_str("lost"), None);
        assert_eq!(PaymentStatus::from_str("PAID"), Some(PaymentStatus::Paid));
        assert_eq!(PaymentStatus::from_str("comped"), None);
    }
}
