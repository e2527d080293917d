// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One run: fetch, map, command, notify.

use crate::config::Settings;
use crate::error::Result;
use crate::mapper::map_probability;
use crate::notify::{Notifier, NotifyOutcome};
use crate::protocol::SwitchBotClient;
use crate::types::{Brightness, LampMode, LampSetting, PrecipitationProbability};
use crate::weather::{ForecastSummary, WeatherClient};

/// What a run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Today's forecast.
    pub summary: ForecastSummary,
    /// The probability the setting was derived from.
    pub probability: PrecipitationProbability,
    /// The setting derived from it.
    pub setting: LampSetting,
    /// Whether the lamp was commanded (false on dry-run).
    pub device_updated: bool,
    /// What happened to the notification.
    pub notification: NotifyOutcome,
}

/// The clients and settings for a run.
///
/// # Examples
///
/// ```no_run
/// use rainlamp::{Pipeline, Settings};
///
/// # async fn example() -> rainlamp::Result<()> {
/// let settings = Settings::load()?;
/// let report = Pipeline::new(&settings)?.run().await?;
/// println!("lamp set to {}", report.setting);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Pipeline {
    weather: WeatherClient,
    device: SwitchBotClient,
    notifier: std::result::Result<Notifier, String>,
    city_code: String,
    device_id: String,
    mode: LampMode,
    brightness: Brightness,
    dry_run: bool,
}

impl Pipeline {
    /// Builds the clients from `settings`.
    ///
    /// A Discord client that cannot be built is reported as a failed
    /// notification when the run ends.
    ///
    /// # Errors
    ///
    /// Returns error if the weather or SwitchBot HTTP client cannot be created.
    pub fn new(settings: &Settings) -> Result<Self> {
        let notifier = settings.discord_config().into_notifier().map_err(|e| {
            tracing::warn!(error = %e, "Discord client unavailable");
            e.to_string()
        });

        Ok(Self {
            weather: settings.weather_config().into_client()?,
            device: settings.switchbot_config().into_client()?,
            notifier,
            city_code: settings.city_code.clone(),
            device_id: settings.device_id.clone(),
            mode: settings.mode,
            brightness: settings.brightness,
            dry_run: settings.dry_run,
        })
    }

    /// Executes one run.
    ///
    /// The lamp is only commanded once a complete forecast has been fetched
    /// and mapped. A failed notification is logged and reported in the
    /// [`RunReport`] but does not fail the run.
    ///
    /// # Errors
    ///
    /// Returns `Error::UpstreamFetch` or `Error::Device` on failure of the
    /// corresponding stage, and `Error::Value` if the chance of rain is not a
    /// valid percentage.
    pub async fn run(&self) -> Result<RunReport> {
        let summary = self.weather.fetch_today(&self.city_code).await?;
        let probability = summary.max_probability;
        tracing::info!(probability = %probability, "Rain chance used");

        let setting = map_probability(probability.value(), self.mode)?;
        tracing::info!(mode = %self.mode, setting = %setting, brightness = %self.brightness, "Lamp setting");

        let device_updated = if self.dry_run {
            tracing::info!("Dry run, lamp not commanded");
            false
        } else {
            self.device
                .apply_setting(&self.device_id, &setting, self.brightness)
                .await?;
            true
        };

        let notification = match &self.notifier {
            Ok(notifier) => match notifier.notify(&summary, &setting).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(error = %e, "Discord notification failed");
                    NotifyOutcome::Failed(e.to_string())
                }
            },
            Err(reason) => NotifyOutcome::Failed(reason.clone()),
        };

        Ok(RunReport {
            summary,
            probability,
            setting,
            device_updated,
            notification,
        })
    }
}
