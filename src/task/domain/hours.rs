//! Effort quantities measured in hours.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A finite, non-negative number of hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Hours(f64);

impl Hours {
    /// Zero hours.
    pub const ZERO: Self = Self(0.0);

    /// Creates a validated hour quantity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidHours`] when the value is negative,
    /// NaN or infinite.
    pub fn new(value: f64) -> Result<Self, TaskDomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(TaskDomainError::InvalidHours(value));
        }
        Ok(Self(value))
    }

    /// Returns the number of hours.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Adds two quantities, saturating at the largest finite value.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "accumulated effort is stored as fractional hours"
    )]
    pub fn saturating_add(self, other: Self) -> Self {
        let sum = self.0 + other.0;
        if sum.is_finite() {
            Self(sum)
        } else {
            Self(f64::MAX)
        }
    }
}

impl TryFrom<f64> for Hours {
    type Error = TaskDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hours> for f64 {
    fn from(value: Hours) -> Self {
        value.0
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.0)
    }
}
