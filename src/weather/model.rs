// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Forecast response model and the per-run forecast summary.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::error::{Error, FetchError};
use crate::types::PrecipitationProbability;

// ============================================================================
// Wire format
// ============================================================================

/// Top-level response of `GET /api/forecast/city/{code}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    #[serde(default)]
    pub publishing_office: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub forecasts: Vec<DailyForecast>,
    #[serde(default)]
    pub location: Location,
}

/// One day of forecast. Index 0 is today.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    #[serde(default)]
    pub telop: String,
    #[serde(default)]
    pub detail: Detail,
    #[serde(default)]
    pub temperature: Temperature,
    #[serde(default)]
    pub chance_of_rain: HashMap<String, Option<String>>,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Detail {
    #[serde(default)]
    pub weather: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Temperature {
    #[serde(default)]
    pub min: Option<TemperatureValue>,
    #[serde(default)]
    pub max: Option<TemperatureValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemperatureValue {
    #[serde(default)]
    pub celsius: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
}

/// Forecast area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub prefecture: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub city: String,
}

// ============================================================================
// Time slots
// ============================================================================

/// The daytime slots that feed the day's maximum.
///
/// The overnight slot (`T00_06`) is not used: by the time the lamp is set in
/// the morning it has already passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    /// 06:00-12:00.
    Morning,
    /// 12:00-18:00.
    Afternoon,
    /// 18:00-24:00.
    Evening,
}

impl TimeSlot {
    /// All slots in chronological order.
    pub const ALL: [Self; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    /// Returns the key used in `chanceOfRain`.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Morning => "T06_12",
            Self::Afternoon => "T12_18",
            Self::Evening => "T18_24",
        }
    }

    /// Returns the short display label, e.g. `"06-12"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Morning => "06-12",
            Self::Afternoon => "12-18",
            Self::Evening => "18-24",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Chance of rain for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotForecast {
    /// The slot.
    pub slot: TimeSlot,
    /// The text as reported, e.g. `"40%"` or `"--%"`.
    pub raw: String,
    /// Parsed percentage, `None` when the slot has no forecast.
    pub probability: Option<PrecipitationProbability>,
}

/// Parses a slot string such as `"40%"` or `"4.5%"`.
///
/// Surrounding whitespace and one trailing `%` are removed and the rest is
/// read as a number. An empty value or dashes only (`""`, `"--%"`) means the
/// slot has no forecast.
///
/// # Errors
///
/// Returns `Error::UpstreamFetch` (`FetchError::InvalidValue`) if the text is
/// not a finite number, and `Error::Value` if the number is outside [0, 100].
pub fn parse_percent(
    slot: TimeSlot,
    raw: &str,
) -> Result<Option<PrecipitationProbability>, Error> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    if number.chars().all(|c| c == '-') {
        return Ok(None);
    }

    let value = number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FetchError::InvalidValue {
            field: format!("chanceOfRain.{}", slot.key()),
            message: format!("{raw:?} is not a percentage"),
        })?;
    Ok(Some(PrecipitationProbability::new(value)?))
}

// ============================================================================
// Summary
// ============================================================================

/// Forecast temperatures in Celsius, as reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemperatureRange {
    /// Minimum temperature, if reported.
    pub min_celsius: Option<String>,
    /// Maximum temperature, if reported.
    pub max_celsius: Option<String>,
}

impl fmt::Display for TemperatureRange {
    /// Formats as `"9C / 15C"`, `"Max 15C"`, `"Min 9C"` or `"--"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.min_celsius, &self.max_celsius) {
            (Some(min), Some(max)) => write!(f, "{min}C / {max}C"),
            (None, Some(max)) => write!(f, "Max {max}C"),
            (Some(min), None) => write!(f, "Min {min}C"),
            (None, None) => f.write_str("--"),
        }
    }
}

/// Today's forecast, reduced to what a run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    /// Short weather text (telop), e.g. "晴れ".
    pub headline: String,
    /// Longer weather description.
    pub description: Option<String>,
    /// Weather icon URL.
    pub icon_url: Option<String>,
    /// Chance of rain per daytime slot, chronological.
    pub slots: [SlotForecast; 3],
    /// Maximum over the slots that have a forecast.
    pub max_probability: PrecipitationProbability,
    /// Forecast temperatures.
    pub temperature: TemperatureRange,
    /// Forecast area.
    pub location: Location,
    /// Link to the forecast page.
    pub link: Option<String>,
    /// Office that published the forecast.
    pub publishing_office: String,
}

impl ForecastSummary {
    /// Returns the slot forecast for `slot`.
    #[must_use]
    pub fn slot(&self, slot: TimeSlot) -> &SlotForecast {
        match slot {
            TimeSlot::Morning => &self.slots[0],
            TimeSlot::Afternoon => &self.slots[1],
            TimeSlot::Evening => &self.slots[2],
        }
    }
}

/// Returns the largest slot value, or `None` if no slot has a forecast.
#[must_use]
pub fn max_of_slots(slots: &[SlotForecast]) -> Option<PrecipitationProbability> {
    slots
        .iter()
        .filter_map(|s| s.probability)
        .max_by(|a, b| a.value().total_cmp(&b.value()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TryFrom<ForecastResponse> for ForecastSummary {
    type Error = Error;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let today = response
            .forecasts
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::MissingField("forecasts[0]".to_string()))?;

        let mut slots = Vec::with_capacity(TimeSlot::ALL.len());
        for slot in TimeSlot::ALL {
            let raw = today
                .chance_of_rain
                .get(slot.key())
                .cloned()
                .flatten()
                .unwrap_or_default();
            let probability = parse_percent(slot, &raw)?;
            slots.push(SlotForecast {
                slot,
                raw,
                probability,
            });
        }

        let max = max_of_slots(&slots)
            .ok_or_else(|| FetchError::MissingField("chanceOfRain".to_string()))?;
        let slots: [SlotForecast; 3] = slots
            .try_into()
            .map_err(|_| FetchError::MissingField("chanceOfRain".to_string()))?;

        Ok(Self {
            headline: today.telop,
            description: non_blank(today.detail.weather),
            icon_url: non_blank(today.image.and_then(|i| i.url)),
            slots,
            max_probability: max,
            temperature: TemperatureRange {
                min_celsius: non_blank(today.temperature.min.and_then(|t| t.celsius)),
                max_celsius: non_blank(today.temperature.max.and_then(|t| t.celsius)),
            },
            location: response.location,
            link: non_blank(response.link),
            publishing_office: response.publishing_office,
        })
    }
}
