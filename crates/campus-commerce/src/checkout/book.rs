//! In-memory order book.

use crate::checkout::{Order, OrderStatus, PaymentStatus};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// Orders placed through the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderBook {
    #[serde(default)]
    orders: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new order, giving it the next number in this book.
    pub fn record(&mut self, mut order: Order) -> &Order {
        order.order_number = Order::generate_order_number(order.created_at, self.orders.len() + 1);
        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = %order.total_amount,
            "order recorded"
        );
        self.orders.push(order);
        &self.orders[self.orders.len() - 1]
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// All orders, newest first. Orders placed in the same second keep
    /// reverse recording order.
    pub fn list(&self) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.iter().rev().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Orders placed by one user, newest first.
    pub fn for_user(&self, user_id: &UserId) -> Vec<&Order> {
        self.list()
            .into_iter()
            .filter(|o| o.user_id.as_ref() == Some(user_id))
            .collect()
    }

    /// Most recent non-cancelled order of `user_id` that includes `product_id`.
    pub fn purchase_of(&self, user_id: &UserId, product_id: &ProductId) -> Option<&Order> {
        self.for_user(user_id)
            .into_iter()
            .find(|o| o.status != OrderStatus::Cancelled && o.contains(product_id))
    }

    /// Update an order's status and, optionally, its payment status.
    pub fn update_status(
        &mut self,
        id: &OrderId,
        status: OrderStatus,
        payment_status: Option<PaymentStatus>,
    ) -> Result<&Order, CommerceError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| CommerceError::OrderNotFound(id.to_string()))?;

        order.set_status(status)?;
        if let Some(payment_status) = payment_status {
            order.set_payment_status(payment_status);
        }
        tracing::info!(order_id = %id, status = status.as_str(), "order status updated");
        Ok(order)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::Product;
    use crate::checkout::NoopSink;
    use crate::money::{Currency, Money};

    fn place(book: &mut OrderBook, user: &str, product: &str, at: i64) -> OrderId {
        let item = Product::new(product, product, Money::from_major(100, Currency::INR));
        let mut cart = Cart::new(Currency::INR);
        cart.add_item(&item, "M", "Black", 1).unwrap();
        let mut receipt = cart.checkout(&mut NoopSink).unwrap();
        receipt.checked_out_at = at;
        let order = Order::from_receipt(&receipt, Some(UserId::new(user)), None).unwrap();
        book.record(order).id.clone()
    }

    #[test]
    fn test_list_newest_first() {
        let mut book = OrderBook::new();
        place(&mut book, "u1", "tee", 100);
        place(&mut book, "u2", "mug", 300);
        place(&mut book, "u1", "cap", 200);

        let times: Vec<i64> = book.list().iter().map(|o| o.created_at).collect();
        assert_eq!(times, vec![300, 200, 100]);
        assert_eq!(book.for_user(&UserId::new("u1")).len(), 2);
    }

    #[test]
    fn test_same_second_orders_are_numbered_and_listed_newest_first() {
        let mut book = OrderBook::new();
        let first = place(&mut book, "u1", "tee", 500);
        let second = place(&mut book, "u1", "mug", 500);

        let numbers: Vec<&str> = book.list().iter().map(|o| o.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["ORD-500-0002", "ORD-500-0001"]);

        let ids: Vec<&OrderId> = book.list().iter().map(|o| &o.id).collect();
        assert_eq!(ids, vec![&second, &first]);
    }

    #[test]
    fn test_purchase_of_skips_cancelled() {
        let mut book = OrderBook::new();
        let id = place(&mut book, "u1", "tee", 100);
        let user = UserId::new("u1");
        let tee = ProductId::new("tee");

        assert!(book.purchase_of(&user, &tee).is_some());
        book.update_status(&id, OrderStatus::Cancelled, Some(PaymentStatus::Refunded)).unwrap();
        assert!(book.purchase_of(&user, &tee).is_none());
        assert!(book.purchase_of(&UserId::new("u2"), &tee).is_none());
    }

    #[test]
    fn test_update_missing_order() {
        let mut book = OrderBook::new();
        let result = book.update_status(&OrderId::new("nope"), OrderStatus::Confirmed, None);
        assert!(matches!(result, Err(CommerceError::OrderNotFound(_))));
    }
}
