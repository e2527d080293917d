// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type.
//!
//! This module provides an RGB color representation together with the
//! renderings used on the wire: the SwitchBot `r:g:b` parameter and the
//! 24-bit integer used for Discord embed colours.

use std::fmt;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use rainlamp::types::RgbColor;
///
/// let color = RgbColor::new(0, 127, 255);
/// assert_eq!(color.red(), 0);
/// assert_eq!(color.green(), 127);
/// assert_eq!(color.blue(), 255);
///
/// assert_eq!(color.to_command_parameter(), "0:127:255");
/// assert_eq!(color.to_decimal(), 0x007F_FF);
/// assert_eq!(color.to_string(), "RGB(0,127,255)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Orange, shown on days with no chance of rain.
    pub const ORANGE: Self = Self::new(255, 127, 0);

    /// Yellow.
    pub const YELLOW: Self = Self::new(255, 255, 0);

    /// Lime green.
    pub const LIME: Self = Self::new(127, 255, 0);

    /// Cyan.
    pub const CYAN: Self = Self::new(0, 255, 255);

    /// Azure, a lighter blue.
    pub const AZURE: Self = Self::new(0, 127, 255);

    /// Pure blue, shown when rain is very likely.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the color packed as `0xRRGGBB`.
    #[must_use]
    pub const fn to_decimal(&self) -> u32 {
        ((self.red as u32) << 16) + ((self.green as u32) << 8) + self.blue as u32
    }

    /// Returns the `setColor` parameter, `"r:g:b"`.
    #[must_use]
    pub fn to_command_parameter(&self) -> String {
        format!("{}:{}:{}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({},{},{})", self.red, self.green, self.blue)
    }
}
