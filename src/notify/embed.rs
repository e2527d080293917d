// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discord embed construction.

use serde::Serialize;

use crate::types::{LampSetting, RgbColor};
use crate::weather::{ForecastSummary, TimeSlot};

/// Fallback link when the forecast carries none.
pub const JMA_MAP_URL: &str = "https://www.jma.go.jp/bosai/map.html#contents=forecast_map";

/// Embed colour used for white-light settings.
const WHITE_LIGHT_EMBED_COLOR: RgbColor = RgbColor::ORANGE;

/// Body of a webhook execution.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

/// A Discord rich embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub url: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedThumbnail {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Builds the embed describing today's forecast and the lamp setting.
///
/// The embed colour is the lamp colour in RGB mode, and warm orange in
/// color-temperature mode.
#[must_use]
pub fn build_embed(summary: &ForecastSummary, setting: &LampSetting) -> Embed {
    let location = &summary.location;
    let title = format!(
        "🌤️ Today's Weather - {} {}",
        location.prefecture, location.city
    )
    .trim_end()
    .to_string();

    let area = if location.district.is_empty() {
        &location.city
    } else {
        &location.district
    };
    let description = if area.is_empty() {
        summary.headline.clone()
    } else {
        format!("{} - {area}", summary.headline)
    };

    let color = setting.rgb().unwrap_or(WHITE_LIGHT_EMBED_COLOR).to_decimal();

    let mut fields = vec![EmbedField::inline(
        "Precipitation (Max)",
        summary.max_probability.to_string(),
    )];
    for slot in TimeSlot::ALL {
        let raw = &summary.slot(slot).raw;
        let value = if raw.is_empty() { "--%" } else { raw.as_str() };
        fields.push(EmbedField::inline(slot.label(), value));
    }
    fields.push(EmbedField::inline(
        "Temperature",
        summary.temperature.to_string(),
    ));
    fields.push(EmbedField::inline("Lamp Setting", setting.to_string()));
    if let Some(details) = &summary.description {
        fields.push(EmbedField {
            name: "Details".to_string(),
            value: details.clone(),
            inline: false,
        });
    }

    Embed {
        title,
        url: summary
            .link
            .clone()
            .unwrap_or_else(|| JMA_MAP_URL.to_string()),
        description,
        color,
        fields,
        thumbnail: summary
            .icon_url
            .clone()
            .map(|url| EmbedThumbnail { url }),
        footer: EmbedFooter {
            text: format!("{} / Tsukumijima Weather API", summary.publishing_office),
        },
    }
}
