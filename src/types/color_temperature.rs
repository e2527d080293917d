// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color temperature type for white-light control.

use std::fmt;

use crate::error::ValueError;

/// White-light color temperature in Kelvin (2700-6500).
///
/// Lower values are warmer (more orange), higher values are cooler (bluer).
/// The range matches the SwitchBot floor lamp's white channel.
///
/// # Examples
///
/// ```
/// use rainlamp::types::ColorTemperature;
///
/// let ct = ColorTemperature::new(4600).unwrap();
/// assert_eq!(ct.kelvin(), 4600);
/// assert_eq!(ct.to_string(), "4600K");
///
/// assert!(ColorTemperature::new(2000).is_err());
/// assert_eq!(ColorTemperature::clamped(9000), ColorTemperature::COOL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorTemperature(u16);

impl ColorTemperature {
    /// Minimum color temperature (warmest).
    pub const MIN_KELVIN: u16 = 2700;

    /// Maximum color temperature (coolest).
    pub const MAX_KELVIN: u16 = 6500;

    /// Warm white (2700K).
    pub const WARM: Self = Self(Self::MIN_KELVIN);

    /// Cool daylight (6500K).
    pub const COOL: Self = Self(Self::MAX_KELVIN);

    /// Creates a new color temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidColorTemperature` if `kelvin` is outside
    /// [2700, 6500].
    pub fn new(kelvin: u16) -> Result<Self, ValueError> {
        if !(Self::MIN_KELVIN..=Self::MAX_KELVIN).contains(&kelvin) {
            return Err(ValueError::InvalidColorTemperature {
                min: Self::MIN_KELVIN,
                max: Self::MAX_KELVIN,
                actual: kelvin,
            });
        }
        Ok(Self(kelvin))
    }

    /// Creates a color temperature, clamping to the valid range.
    #[must_use]
    pub const fn clamped(kelvin: u16) -> Self {
        if kelvin < Self::MIN_KELVIN {
            Self::WARM
        } else if kelvin > Self::MAX_KELVIN {
            Self::COOL
        } else {
            Self(kelvin)
        }
    }

    /// Returns the value in Kelvin.
    #[must_use]
    pub const fn kelvin(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ColorTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

impl TryFrom<u16> for ColorTemperature {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
