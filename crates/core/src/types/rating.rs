//! Testimonial star ratings.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a rating is outside `1..=5`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rating must be between {min} and {max} (got {0})", min = Rating::MIN, max = Rating::MAX)]
pub struct RatingError(pub i64);

/// A star rating from 1 to 5. Defaults to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns `RatingError` if `stars` is outside `1..=5`.
    pub fn new(stars: u8) -> Result<Self, RatingError> {
        Self::try_from(i64::from(stars))
    }

    /// A rating from a whole-valued float such as `4.0`.
    ///
    /// Returns `None` for fractional or out-of-range values.
    #[must_use]
    pub fn from_whole(value: f64) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .find(|stars| (f64::from(*stars) - value).abs() < f64::EPSILON)
            .map(Self)
    }

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|stars| (Self::MIN..=Self::MAX).contains(stars))
            .map(Self)
            .ok_or(RatingError(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}
