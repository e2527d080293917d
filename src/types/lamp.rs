// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lamp mode and the resolved lamp setting.

use std::fmt;

use super::{ColorTemperature, RgbColor};

/// How the lamp expresses the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LampMode {
    /// Six distinct colours, warm to cool.
    #[default]
    Rgb,
    /// White light, interpolated from 2700K to 6500K.
    ColorTemperature,
}

impl fmt::Display for LampMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb => f.write_str("rgb"),
            Self::ColorTemperature => f.write_str("color-temperature"),
        }
    }
}

/// The colour or white point to send to the lamp for one run.
///
/// # Examples
///
/// ```
/// use rainlamp::types::{ColorTemperature, LampMode, LampSetting, RgbColor};
///
/// let setting = LampSetting::Rgb(RgbColor::CYAN);
/// assert_eq!(setting.mode(), LampMode::Rgb);
/// assert_eq!(setting.to_string(), "RGB(0,255,255)");
///
/// let setting = LampSetting::ColorTemperature(ColorTemperature::WARM);
/// assert_eq!(setting.mode(), LampMode::ColorTemperature);
/// assert_eq!(setting.to_string(), "Color Temp: 2700K");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LampSetting {
    /// A colour.
    Rgb(RgbColor),
    /// A white color temperature.
    ColorTemperature(ColorTemperature),
}

impl LampSetting {
    /// Returns the mode this setting belongs to.
    #[must_use]
    pub const fn mode(&self) -> LampMode {
        match self {
            Self::Rgb(_) => LampMode::Rgb,
            Self::ColorTemperature(_) => LampMode::ColorTemperature,
        }
    }

    /// Returns the colour, if this is an RGB setting.
    #[must_use]
    pub const fn rgb(&self) -> Option<RgbColor> {
        match self {
            Self::Rgb(color) => Some(*color),
            Self::ColorTemperature(_) => None,
        }
    }

    /// Returns the color temperature, if this is a white-light setting.
    #[must_use]
    pub const fn color_temperature(&self) -> Option<ColorTemperature> {
        match self {
            Self::Rgb(_) => None,
            Self::ColorTemperature(ct) => Some(*ct),
        }
    }
}

impl fmt::Display for LampSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(color) => write!(f, "{color}"),
            Self::ColorTemperature(ct) => write!(f, "Color Temp: {ct}"),
        }
    }
}

impl From<RgbColor> for LampSetting {
    fn from(color: RgbColor) -> Self {
        Self::Rgb(color)
    }
}

impl From<ColorTemperature> for LampSetting {
    fn from(ct: ColorTemperature) -> Self {
        Self::ColorTemperature(ct)
    }
}
