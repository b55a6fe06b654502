//! Customer age in years.

use serde::{Deserialize, Serialize};

/// Error returned when an age is outside `0..=120`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("age must be between 0 and {max} (got {0})", max = Age::MAX)]
pub struct AgeError(pub i64);

/// Age in years, `0..=120`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Age(u8);

impl Age {
    /// Oldest accepted age.
    pub const MAX: u8 = 120;

    /// Age in years.
    #[must_use]
    pub const fn years(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Age {
    type Error = AgeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|years| *years <= Self::MAX)
            .map(Self)
            .ok_or(AgeError(value))
    }
}

impl From<Age> for u8 {
    fn from(age: Age) -> Self {
        age.0
    }
}
