//! Star rating attached to a feedback record.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// Integer rating in `1..=5`.
///
/// Wire format: bare integer. Deserialization rejects out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

/// Error returned when a value falls outside `1..=5`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct InvalidRating(pub i64);

impl Rating {
    pub fn new(value: i64) -> Result<Self, InvalidRating> {
        if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(InvalidRating(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = InvalidRating;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
