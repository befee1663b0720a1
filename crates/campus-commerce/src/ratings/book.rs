//! Product reviews.

use crate::checkout::{Order, OrderStatus};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, ReviewId, UserId};
use crate::ratings::{RatingSummary, Stars};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A shopper's review of a product they bought.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    /// Order the product was bought in.
    pub order_id: OrderId,
    pub stars: Stars,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    /// Unix timestamp of the latest submission.
    pub created_at: i64,
}

/// Reviews and per-product rating aggregates.
///
/// Each user holds at most one review per product; submitting again
/// replaces the earlier one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RatingBook {
    #[serde(default)]
    reviews: Vec<Review>,
    #[serde(default)]
    summaries: BTreeMap<ProductId, RatingSummary>,
}

impl RatingBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit or replace a review.
    ///
    /// `order` must belong to `user_id`, include `product_id`, and not be
    /// cancelled. Blank review text is dropped. Returns the product's
    /// updated aggregate.
    pub fn submit(
        &mut self,
        order: &Order,
        user_id: &UserId,
        product_id: &ProductId,
        stars: Stars,
        review: Option<String>,
    ) -> Result<RatingSummary, CommerceError> {
        let purchased = order.user_id.as_ref() == Some(user_id)
            && order.status != OrderStatus::Cancelled
            && order.contains(product_id);
        if !purchased {
            return Err(CommerceError::NotPurchased(product_id.to_string()));
        }

        let review = review
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        let summary = self.summaries.entry(product_id.clone()).or_default();

        let existing = self
            .reviews
            .iter()
            .position(|r| &r.user_id == user_id && &r.product_id == product_id);
        let id = match existing {
            Some(index) => {
                let previous = self.reviews.remove(index);
                summary.replace(previous.stars, stars);
                previous.id
            }
            None => {
                summary.record(stars);
                ReviewId::generate()
            }
        };
        let summary = *summary;

        self.reviews.push(Review {
            id,
            user_id: user_id.clone(),
            product_id: product_id.clone(),
            order_id: order.id.clone(),
            stars,
            review,
            created_at: chrono::Utc::now().timestamp(),
        });

        tracing::info!(
            product_id = %product_id,
            stars = stars.get(),
            average = summary.average,
            count = summary.count,
            "rating submitted"
        );
        Ok(summary)
    }

    /// Reviews of a product, newest first.
    pub fn reviews_for(&self, product_id: &ProductId) -> Vec<&Review> {
        self.reviews
            .iter()
            .rev()
            .filter(|r| &r.product_id == product_id)
            .collect()
    }

    /// A user's review of a product, if any.
    pub fn review_by(&self, user_id: &UserId, product_id: &ProductId) -> Option<&Review> {
        self.reviews
            .iter()
            .find(|r| &r.user_id == user_id && &r.product_id == product_id)
    }

    /// Aggregate rating of a product; zero when unrated.
    pub fn summary(&self, product_id: &ProductId) -> RatingSummary {
        self.summaries.get(product_id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::Product;
    use crate::checkout::NoopSink;
    use crate::money::{Currency, Money};

    fn order_for(user: &str, product: &str) -> Order {
        let item = Product::new(product, product, Money::from_major(499, Currency::INR));
        let mut cart = Cart::new(Currency::INR);
        cart.add_item(&item, "M", "Black", 1).unwrap();
        let receipt = cart.checkout(&mut NoopSink).unwrap();
        Order::from_receipt(&receipt, Some(UserId::new(user)), None).unwrap()
    }

    fn stars(n: i64) -> Stars {
        Stars::new(n).unwrap()
    }

    #[test]
    fn test_submit_updates_average() {
        let mut book = RatingBook::new();
        let mug = ProductId::new("mug");

        book.submit(&order_for("u1", "mug"), &UserId::new("u1"), &mug, stars(5), None).unwrap();
        let summary = book
            .submit(
                &order_for("u2", "mug"),
                &UserId::new("u2"),
                &mug,
                stars(2),
                Some("Handle chipped".to_string()),
            )
            .unwrap();

        assert_eq!(summary.count, 2);
        assert!((summary.average - 3.5).abs() < 1e-9);
        assert_eq!(book.reviews_for(&mug).len(), 2);
        assert_eq!(book.reviews_for(&mug)[0].user_id, UserId::new("u2"));
    }

    #[test]
    fn test_resubmit_replaces_review() {
        let mut book = RatingBook::new();
        let user = UserId::new("u1");
        let mug = ProductId::new("mug");
        let order = order_for("u1", "mug");

        book.submit(&order, &user, &mug, stars(2), Some("meh".to_string())).unwrap();
        let summary = book.submit(&order, &user, &mug, stars(4), Some("  ".to_string())).unwrap();

        assert_eq!(summary.count, 1);
        assert!((summary.average - 4.0).abs() < 1e-9);
        let review = book.review_by(&user, &mug).unwrap();
        assert_eq!(review.stars, stars(4));
        assert_eq!(review.review, None);
    }

    #[test]
    fn test_requires_purchase() {
        let mut book = RatingBook::new();
        let order = order_for("u1", "mug");

        let wrong_user =
            book.submit(&order, &UserId::new("u2"), &ProductId::new("mug"), stars(5), None);
        assert!(matches!(wrong_user, Err(CommerceError::NotPurchased(_))));

        let wrong_product =
            book.submit(&order, &UserId::new("u1"), &ProductId::new("tee"), stars(5), None);
        assert!(matches!(wrong_product, Err(CommerceError::NotPurchased(_))));

        assert_eq!(book.summary(&ProductId::new("mug")), RatingSummary::default());
    }
}
