// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run configuration.
//!
//! Settings are read once at startup from the process environment (after
//! loading a `.env` file, if present) and passed by reference to each
//! client. Nothing reads the environment after that.
//!
//! | Variable | Default |
//! |---|---|
//! | `SWITCHBOT_ACCESS_TOKEN` | required |
//! | `SWITCHBOT_SECRET` | required |
//! | `SWITCHBOT_FLOOR_LAMP_DEVICE_ID` | required |
//! | `WEATHER_CITY_CODE` | required |
//! | `USE_COLOR_TEMPERATURE` | `0` |
//! | `LAMP_BRIGHTNESS` | `100` |
//! | `DISCORD_WEBHOOK_URL` | unset |
//! | `DISCORD_ENABLED` | `1` |
//! | `DISCORD_TIMEOUT` | `10` (seconds) |
//! | `HTTP_TIMEOUT` | `10` (seconds) |
//! | `SWITCHBOT_API_BASE_URL` | `https://api.switch-bot.com` |
//! | `WEATHER_API_BASE_URL` | `https://weather.tsukumijima.net/api/forecast/city` |

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use config::Environment;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::notify::DiscordConfig;
use crate::protocol::SwitchBotConfig;
use crate::types::{Brightness, LampMode};
use crate::weather::WeatherConfig;

/// A credential that never appears in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a credential.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the credential.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Environment variables as deserialized, before validation.
#[derive(Debug, Deserialize)]
struct RawSettings {
    switchbot_access_token: String,
    switchbot_secret: String,
    switchbot_floor_lamp_device_id: String,
    weather_city_code: String,
    use_color_temperature: String,
    lamp_brightness: String,
    #[serde(default)]
    discord_webhook_url: Option<String>,
    discord_enabled: String,
    discord_timeout: String,
    http_timeout: String,
    switchbot_api_base_url: String,
    weather_api_base_url: String,
}

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// SwitchBot API token.
    pub access_token: Secret,
    /// SwitchBot API secret.
    pub secret: Secret,
    /// Lamp device id.
    pub device_id: String,
    /// Forecast city code.
    pub city_code: String,
    /// RGB or color-temperature mode.
    pub mode: LampMode,
    /// Brightness sent with every run.
    pub brightness: Brightness,
    /// Timeout for weather and SwitchBot requests.
    pub http_timeout: Duration,
    /// SwitchBot API endpoint.
    pub switchbot_base_url: String,
    /// Forecast API endpoint.
    pub weather_base_url: String,
    /// Discord webhook URL.
    pub discord_webhook_url: Option<String>,
    /// Whether Discord notifications are on.
    pub discord_enabled: bool,
    /// Timeout for the webhook request.
    pub discord_timeout: Duration,
    /// Compute and notify without commanding the lamp.
    pub dry_run: bool,
}

impl Settings {
    /// Loads `.env` (if present) and reads settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "Failed to read .env"),
        }
        Self::from_environment(Environment::default())
    }

    /// Reads settings from an explicit variable map instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env_map(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default().source(Some(vars)))
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        let raw: RawSettings = config::Config::builder()
            .set_default("use_color_temperature", "0")?
            .set_default("lamp_brightness", "100")?
            .set_default("discord_enabled", "1")?
            .set_default("discord_timeout", "10")?
            .set_default("http_timeout", "10")?
            .set_default("switchbot_api_base_url", SwitchBotConfig::DEFAULT_BASE_URL)?
            .set_default("weather_api_base_url", WeatherConfig::DEFAULT_BASE_URL)?
            .add_source(env)
            .build()?
            .try_deserialize()?;

        Self::try_from(raw)
    }

    /// Overrides the lamp mode.
    #[must_use]
    pub fn with_mode(mut self, mode: LampMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables dry-run.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables or disables Discord notifications.
    #[must_use]
    pub fn with_discord_enabled(mut self, enabled: bool) -> Self {
        self.discord_enabled = enabled;
        self
    }

    /// Returns the weather client configuration.
    #[must_use]
    pub fn weather_config(&self) -> WeatherConfig {
        WeatherConfig::new()
            .with_base_url(&self.weather_base_url)
            .with_timeout(self.http_timeout)
    }

    /// Returns the SwitchBot client configuration.
    #[must_use]
    pub fn switchbot_config(&self) -> SwitchBotConfig {
        SwitchBotConfig::new(self.access_token.expose(), self.secret.expose())
            .with_base_url(&self.switchbot_base_url)
            .with_timeout(self.http_timeout)
    }

    /// Returns the Discord configuration.
    #[must_use]
    pub fn discord_config(&self) -> DiscordConfig {
        DiscordConfig::new(self.discord_webhook_url.clone())
            .with_enabled(self.discord_enabled)
            .with_timeout(self.discord_timeout)
    }
}

impl TryFrom<RawSettings> for Settings {
    type Error = ConfigError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let mode = if parse_flag("USE_COLOR_TEMPERATURE", &raw.use_color_temperature) {
            LampMode::ColorTemperature
        } else {
            LampMode::Rgb
        };

        let brightness = raw
            .lamp_brightness
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(|b| Brightness::new(b).ok())
            .ok_or_else(|| invalid("LAMP_BRIGHTNESS", "expected an integer from 1 to 100"))?;

        Ok(Self {
            access_token: Secret::new(required("SWITCHBOT_ACCESS_TOKEN", raw.switchbot_access_token)?),
            secret: Secret::new(required("SWITCHBOT_SECRET", raw.switchbot_secret)?),
            device_id: required("SWITCHBOT_FLOOR_LAMP_DEVICE_ID", raw.switchbot_floor_lamp_device_id)?,
            city_code: required("WEATHER_CITY_CODE", raw.weather_city_code)?,
            mode,
            brightness,
            http_timeout: parse_seconds("HTTP_TIMEOUT", &raw.http_timeout)?,
            switchbot_base_url: required("SWITCHBOT_API_BASE_URL", raw.switchbot_api_base_url)?,
            weather_base_url: required("WEATHER_API_BASE_URL", raw.weather_api_base_url)?,
            discord_webhook_url: raw.discord_webhook_url.filter(|url| !url.trim().is_empty()),
            discord_enabled: parse_flag("DISCORD_ENABLED", &raw.discord_enabled),
            discord_timeout: parse_seconds("DISCORD_TIMEOUT", &raw.discord_timeout)?,
            dry_run: false,
        })
    }
}

/// Interprets a boolean flag: `1`, `true`, `t`, `yes` and `y` (any case) are
/// true, everything else is false.
#[must_use]
pub fn parse_flag(key: &str, value: &str) -> bool {
    let enabled = matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "t" | "yes" | "y"
    );
    tracing::trace!(key, value, enabled, "Parsed flag");
    enabled
}

fn parse_seconds(key: &str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(invalid(key, "expected a positive number of seconds")),
    }
}

fn required(key: &str, value: String) -> Result<String, ConfigError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(invalid(key, "must not be empty"));
    }
    Ok(value)
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
