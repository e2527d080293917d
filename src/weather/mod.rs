// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weather forecast client.
//!
//! Fetches today's forecast from the Tsukumijima weather API (a JSON mirror
//! of the Japan Meteorological Agency forecasts) and reduces it to a
//! [`ForecastSummary`].

mod model;

pub use model::{
    ForecastResponse, ForecastSummary, Location, SlotForecast, TemperatureRange, TimeSlot,
    max_of_slots, parse_percent,
};

use std::time::Duration;

use reqwest::Client;

use crate::error::{Error, FetchError};

/// Configuration for the weather client.
///
/// # Examples
///
/// ```
/// use rainlamp::weather::WeatherConfig;
/// use std::time::Duration;
///
/// let config = WeatherConfig::new().with_timeout(Duration::from_secs(3));
/// assert_eq!(config.base_url(), "https://weather.tsukumijima.net/api/forecast/city");
/// assert_eq!(config.timeout(), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    base_url: String,
    timeout: Duration,
}

impl WeatherConfig {
    /// Default forecast endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://weather.tsukumijima.net/api/forecast/city";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration pointing at the public endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the endpoint. A trailing slash is removed.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates a `WeatherClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<WeatherClient, FetchError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(FetchError::Http)?;

        Ok(WeatherClient {
            base_url: self.base_url,
            client,
        })
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the forecast API.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
    client: Client,
}

impl WeatherClient {
    /// Builds the forecast URL for a city.
    fn forecast_url(&self, city_code: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(city_code))
    }

    /// Fetches today's forecast for `city_code` (for example `130010`, Tokyo).
    ///
    /// # Errors
    ///
    /// Returns `Error::UpstreamFetch` if the service is unreachable, answers
    /// with a non-success status, or returns data without a usable chance of
    /// rain. Returns `Error::Value` if a slot is outside [0, 100].
    pub async fn fetch_today(&self, city_code: &str) -> Result<ForecastSummary, Error> {
        let url = self.forecast_url(city_code);

        tracing::debug!(url = %url, "Fetching forecast");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::Http)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url,
            }
            .into());
        }

        let body = response.text().await.map_err(FetchError::Http)?;
        let parsed: ForecastResponse = serde_json::from_str(&body).map_err(FetchError::Json)?;
        let summary = ForecastSummary::try_from(parsed)?;

        tracing::info!(
            slots = ?summary
                .slots
                .iter()
                .map(|s| (s.slot.key(), s.probability.map(|p| p.value())))
                .collect::<Vec<_>>(),
            max = %summary.max_probability,
            "Chance of rain today"
        );

        Ok(summary)
    }
}
