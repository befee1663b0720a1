//! Cart change notifications.

use crate::cart::VariantKey;
use crate::money::Money;
use serde::Serialize;

/// Something that happened to a cart.
///
/// Events are informational: observers cannot veto or alter a mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CartEvent {
    /// Units were added, either as a new line or merged into an existing one.
    ItemAdded {
        key: VariantKey,
        product_name: String,
        added: i64,
        line_quantity: i64,
    },
    /// A line was removed.
    ItemRemoved { key: VariantKey },
    /// A line's quantity was replaced.
    QuantityChanged { key: VariantKey, quantity: i64 },
    /// The cart was emptied by the shopper.
    Cleared,
    /// The cart was submitted and emptied.
    CheckedOut { item_count: i64, total: Money },
}

impl CartEvent {
    /// Short toast-style title for the event.
    pub fn title(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded { .. } => "Added to cart",
            CartEvent::ItemRemoved { .. } => "Removed from cart",
            CartEvent::QuantityChanged { .. } => "Quantity updated",
            CartEvent::Cleared => "Cart cleared",
            CartEvent::CheckedOut { .. } => "Order placed",
        }
    }

    /// Human-readable description of the event.
    pub fn description(&self) -> String {
        match self {
            CartEvent::ItemAdded {
                key, product_name, ..
            } => format!(
                "{} ({}, {}) added to your cart.",
                product_name, key.size, key.color
            ),
            CartEvent::ItemRemoved { .. } => "Item removed from your cart.".to_string(),
            CartEvent::QuantityChanged { key, quantity } => {
                format!("{key} quantity set to {quantity}.")
            }
            CartEvent::Cleared => "All items removed from your cart.".to_string(),
            CartEvent::CheckedOut { item_count, total } => {
                format!("{item_count} item(s) ordered for {total}.")
            }
        }
    }
}

/// Receives cart events synchronously after each successful mutation.
pub trait CartObserver {
    fn on_event(&self, event: &CartEvent);
}

impl<F> CartObserver for F
where
    F: Fn(&CartEvent),
{
    fn on_event(&self, event: &CartEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_added_description() {
        let event = CartEvent::ItemAdded {
            key: VariantKey::new("hoodie", "L", "Navy"),
            product_name: "Amalthea Hoodie".to_string(),
            added: 1,
            line_quantity: 1,
        };
        assert_eq!(event.title(), "Added to cart");
        assert_eq!(
            event.description(),
            "Amalthea Hoodie (L, Navy) added to your cart."
        );
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = CartEvent::CheckedOut {
            item_count: 2,
            total: Money::new(1000, Currency::INR),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "checked_out");
        assert_eq!(json["item_count"], 2);
    }
}
