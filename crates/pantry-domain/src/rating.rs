//! Per-user recipe ratings and their aggregate.
//!
//! A recipe's average and count are never persisted. They are recomputed
//! from the full set of per-user ratings every time they are shown, so the
//! only source of truth is the rating set itself.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::UserId;

/// Highest value a rating may take, in stars.
pub const MAX_STARS: f64 = 5.0;

/// A star value in `[0, 5]` with half-star granularity.
///
/// Stored as the number of half stars (`0..=10`) so equality and storage
/// are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RatingValue(u8);

/// Returned when a value is not a half-star multiple inside `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("rating must be a multiple of 0.5 between 0 and 5, got {0}")]
pub struct InvalidRatingValue(pub f64);

impl RatingValue {
    pub const MAX_HALF_STARS: u8 = 10;

    pub fn from_half_stars(half_stars: u8) -> Option<Self> {
        (half_stars <= Self::MAX_HALF_STARS).then_some(Self(half_stars))
    }

    pub fn try_from_f64(stars: f64) -> Result<Self, InvalidRatingValue> {
        if !stars.is_finite() || !(0.0..=MAX_STARS).contains(&stars) {
            return Err(InvalidRatingValue(stars));
        }
        let doubled = stars * 2.0;
        if doubled.fract() != 0.0 {
            return Err(InvalidRatingValue(stars));
        }
        Ok(Self(doubled as u8))
    }

    pub fn half_stars(self) -> u8 {
        self.0
    }

    pub fn stars(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl Serialize for RatingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.stars())
    }
}

impl<'de> Deserialize<'de> for RatingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stars = f64::deserialize(deserializer)?;
        Self::try_from_f64(stars).map_err(serde::de::Error::custom)
    }
}

/// One user's rating of one recipe. At most one exists per (recipe, user).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    pub user_id: UserId,
    pub value: RatingValue,
}

/// Mean and cardinality of a recipe's current rating set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AggregateRating {
    pub average: f64,
    pub count: u64,
}

/// Compute the arithmetic mean and count of a rating snapshot.
///
/// An empty snapshot yields `{ average: 0.0, count: 0 }`: the mean of
/// nothing is undefined, and zero is what an unrated recipe displays.
pub fn compute_aggregate_rating(ratings: &[Rating]) -> AggregateRating {
    if ratings.is_empty() {
        return AggregateRating::default();
    }
    let half_star_sum: u64 = ratings
        .iter()
        .map(|r| u64::from(r.value.half_stars()))
        .sum();
    let count = ratings.len() as u64;
    AggregateRating {
        average: half_star_sum as f64 / 2.0 / count as f64,
        count,
    }
}
