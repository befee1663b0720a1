//! Star ratings and their running average.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A star rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Stars(u8);

impl Stars {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn new(stars: i64) -> Result<Self, CommerceError> {
        if !(Self::MIN..=Self::MAX).contains(&stars) {
            return Err(CommerceError::InvalidRating(stars));
        }
        Ok(Self(stars as u8))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Stars {
    type Error = CommerceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stars> for i64 {
    fn from(stars: Stars) -> Self {
        i64::from(stars.0)
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// Aggregate rating for a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RatingSummary {
    /// Mean star rating; 0 when there are no ratings.
    pub average: f64,
    /// Number of ratings.
    pub count: u32,
}

impl RatingSummary {
    /// Fold a new rating into the running average.
    pub fn record(&mut self, stars: Stars) {
        let count = f64::from(self.count);
        self.average = (self.average * count + f64::from(stars.get())) / (count + 1.0);
        self.count += 1;
    }

    /// Swap one existing rating for another without changing the count.
    pub fn replace(&mut self, old: Stars, new: Stars) {
        if self.count == 0 {
            self.record(new);
            return;
        }
        let delta = f64::from(new.get()) - f64::from(old.get());
        self.average += delta / f64::from(self.count);
    }

    /// Average rounded to one decimal place, e.g. "4.3".
    pub fn display(&self) -> String {
        format!("{:.1}", self.average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stars(n: i64) -> Stars {
        Stars::new(n).unwrap()
    }

    #[test]
    fn test_stars_range() {
        assert!(Stars::new(1).is_ok());
        assert!(Stars::new(5).is_ok());
        assert_eq!(Stars::new(0), Err(CommerceError::InvalidRating(0)));
        assert_eq!(Stars::new(6), Err(CommerceError::InvalidRating(6)));
    }

    #[test]
    fn test_stars_deserialize_validates() {
        let ok: Stars = serde_json::from_str("4").unwrap();
        assert_eq!(ok.get(), 4);
        assert!(serde_json::from_str::<Stars>("9").is_err());
    }

    #[test]
    fn test_running_average() {
        let mut summary = RatingSummary::default();
        summary.record(stars(5));
        summary.record(stars(4));
        summary.record(stars(3));

        assert_eq!(summary.count, 3);
        assert!((summary.average - 4.0).abs() < 1e-9);
        assert_eq!(summary.display(), "4.0");
    }

    #[test]
    fn test_replace_keeps_count() {
        let mut summary = RatingSummary::default();
        summary.record(stars(5));
        summary.record(stars(3));
        summary.replace(stars(3), stars(4));

        assert_eq!(summary.count, 2);
        assert!((summary.average - 4.5).abs() < 1e-9);
    }
}
