// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for lamp control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time.
//!
//! # Types
//!
//! - [`PrecipitationProbability`] - Chance of rain (0-100%)
//! - [`RgbColor`] - 8-bit RGB colour
//! - [`ColorTemperature`] - White point in Kelvin (2700-6500)
//! - [`Brightness`] - Lamp brightness (1-100%)
//! - [`LampMode`] / [`LampSetting`] - What the lamp is asked to show

mod brightness;
mod color_temperature;
mod lamp;
mod probability;
mod rgb_color;

pub use brightness::Brightness;
pub use color_temperature::ColorTemperature;
pub use lamp::{LampMode, LampSetting};
pub use probability::PrecipitationProbability;
pub use rgb_color::RgbColor;
