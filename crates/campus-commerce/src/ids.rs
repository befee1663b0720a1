//! String-backed identifiers for products, orders, reviews and shoppers.
//!
//! Each kind gets its own newtype so a `UserId` cannot stand in for a
//! `ProductId`. All of them serialize as bare strings.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Fresh identifier, unique within this process.
            pub fn generate() -> Self {
                Self(generate_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(OrderLineItemId);
define_id!(ReviewId);
define_id!(UserId);

/// Clock nanos in hex plus the low bits of a process-wide counter.
fn generate_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default() as u64;
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);

    format!("{:x}-{:04x}", nanos, counter & 0xffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_and_displays_slug() {
        let id = ProductId::from("iitgn-tee");
        assert_eq!(id.as_str(), "iitgn-tee");
        assert_eq!(id.to_string(), "iitgn-tee");
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: Vec<OrderId> = (0..50).map(|_| OrderId::generate()).collect();
        let unique: std::collections::BTreeSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("amalthea-hoodie");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"amalthea-hoodie\"");
    }

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(UserId::new("u-1"), UserId::from("u-1".to_string()));
        assert_ne!(UserId::new("u-1"), UserId::new("u-2"));
    }
}
