// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Precipitation probability type.
//!
//! This module provides a validated representation of a chance of rain,
//! guaranteed to be a finite percentage in the range 0-100.

use std::fmt;

use crate::error::ValueError;

/// Chance of rain as a percentage (0-100).
///
/// Weather sources usually report whole percentages, but fractional values
/// are accepted and compared as-is. Out-of-range and non-finite values are
/// rejected rather than clamped so that bad upstream data is never hidden.
///
/// # Examples
///
/// ```
/// use rainlamp::types::PrecipitationProbability;
///
/// let p = PrecipitationProbability::new(40.0).unwrap();
/// assert_eq!(p.value(), 40.0);
/// assert_eq!(p.to_string(), "40%");
///
/// assert!(PrecipitationProbability::new(101.0).is_err());
/// assert!(PrecipitationProbability::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PrecipitationProbability(f64);

impl PrecipitationProbability {
    /// No chance of rain.
    pub const NONE: Self = Self(0.0);

    /// Certain rain.
    pub const CERTAIN: Self = Self(100.0);

    /// Creates a new probability value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidProbability` if `value` is NaN, infinite
    /// or outside [0, 100].
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ValueError::InvalidProbability(value));
        }
        Ok(Self(value))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for PrecipitationProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<f64> for PrecipitationProbability {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u8> for PrecipitationProbability {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(f64::from(value))
    }
}
