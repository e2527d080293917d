// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mapping from chance of rain to a lamp setting.
//!
//! RGB mode uses six fixed colour buckets, warm to cool. Color-temperature
//! mode interpolates linearly between 2700K and 6500K. The two schemes must
//! stay separate; RGB is never interpolated.
//!
//! The mapper takes a single, already-reduced probability (the day's
//! maximum), never a collection of time slots.
//!
//! | chance of rain | RGB |
//! |---|---|
//! | 0% | orange `(255,127,0)` |
//! | up to 20% | yellow `(255,255,0)` |
//! | up to 40% | lime `(127,255,0)` |
//! | up to 60% | cyan `(0,255,255)` |
//! | up to 80% | azure `(0,127,255)` |
//! | above 80% | blue `(0,0,255)` |

use crate::error::ValueError;
use crate::types::{ColorTemperature, LampMode, LampSetting, PrecipitationProbability, RgbColor};

/// Computes the lamp setting for a chance of rain.
///
/// # Examples
///
/// ```
/// use rainlamp::mapper::compute_lamp_setting;
/// use rainlamp::types::{LampMode, LampSetting, PrecipitationProbability, RgbColor};
///
/// let p = PrecipitationProbability::new(55.0).unwrap();
/// assert_eq!(compute_lamp_setting(p, LampMode::Rgb), LampSetting::Rgb(RgbColor::CYAN));
///
/// let setting = compute_lamp_setting(p, LampMode::ColorTemperature);
/// assert_eq!(setting.to_string(), "Color Temp: 4790K");
/// ```
#[must_use]
pub fn compute_lamp_setting(probability: PrecipitationProbability, mode: LampMode) -> LampSetting {
    match mode {
        LampMode::Rgb => LampSetting::Rgb(rgb_for(probability)),
        LampMode::ColorTemperature => LampSetting::ColorTemperature(color_temperature_for(probability)),
    }
}

/// Validates a raw percentage and maps it.
///
/// # Errors
///
/// Returns `ValueError::InvalidProbability` if `probability` is outside
/// [0, 100]. The value is never clamped.
pub fn map_probability(probability: f64, mode: LampMode) -> Result<LampSetting, ValueError> {
    let probability = PrecipitationProbability::new(probability)?;
    Ok(compute_lamp_setting(probability, mode))
}

/// Picks the RGB bucket. Zero is its own bucket, separate from "up to 20%".
#[must_use]
#[allow(clippy::float_cmp)]
pub fn rgb_for(probability: PrecipitationProbability) -> RgbColor {
    let p = probability.value();
    if p == 0.0 {
        RgbColor::ORANGE
    } else if p <= 20.0 {
        RgbColor::YELLOW
    } else if p <= 40.0 {
        RgbColor::LIME
    } else if p <= 60.0 {
        RgbColor::CYAN
    } else if p <= 80.0 {
        RgbColor::AZURE
    } else {
        RgbColor::BLUE
    }
}

/// Interpolates the white point, rounded to the nearest Kelvin.
#[must_use]
pub fn color_temperature_for(probability: PrecipitationProbability) -> ColorTemperature {
    let min = f64::from(ColorTemperature::MIN_KELVIN);
    let span = f64::from(ColorTemperature::MAX_KELVIN - ColorTemperature::MIN_KELVIN);
    let kelvin = (min + span * probability.value() / 100.0).round();

    // Unreachable for a validated probability; kept as an invariant check.
    debug_assert!((min..=f64::from(ColorTemperature::MAX_KELVIN)).contains(&kelvin));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let kelvin = kelvin as u16;
    ColorTemperature::clamped(kelvin)
}
