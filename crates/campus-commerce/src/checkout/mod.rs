//! Checkout module.
//!
//! Contains the checkout trigger, purchase notifications and orders.

mod book;
mod order;
mod trigger;

pub use book::OrderBook;
pub use order::{Order, OrderLineItem, OrderStatus, PaymentStatus};
pub use trigger::{CheckoutReceipt, NoopSink, PurchaseSink};
