// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the SwitchBot Cloud API v1.1.

use std::fmt;
use std::time::Duration;

use reqwest::Client;

use crate::command::{BrightnessCommand, Command, PowerOnCommand, setting_command};
use crate::error::DeviceError;
use crate::protocol::CommandResponse;
use crate::protocol::sign::sign_now;
use crate::types::{Brightness, LampSetting};

// ============================================================================
// SwitchBotConfig
// ============================================================================

/// Configuration for the SwitchBot Cloud API.
///
/// # Examples
///
/// ```
/// use rainlamp::protocol::SwitchBotConfig;
/// use std::time::Duration;
///
/// let config = SwitchBotConfig::new("token", "secret")
///     .with_base_url("http://127.0.0.1:8080/")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://127.0.0.1:8080");
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct SwitchBotConfig {
    token: String,
    secret: String,
    base_url: String,
    timeout: Duration,
}

impl SwitchBotConfig {
    /// Production API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.switch-bot.com";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration from an API token and secret.
    #[must_use]
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API base URL. A trailing slash is removed.
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

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates a `SwitchBotClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<SwitchBotClient, DeviceError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(DeviceError::Http)?;

        Ok(SwitchBotClient {
            config: self,
            client,
        })
    }
}

impl fmt::Debug for SwitchBotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchBotConfig")
            .field("token", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// SwitchBotClient
// ============================================================================

/// Client that sends signed commands to SwitchBot devices.
///
/// # Examples
///
/// ```no_run
/// use rainlamp::protocol::SwitchBotConfig;
/// use rainlamp::types::{Brightness, LampSetting, RgbColor};
///
/// # async fn example() -> rainlamp::Result<()> {
/// let client = SwitchBotConfig::new("token", "secret").into_client()?;
/// client
///     .apply_setting("ABCDEF123456", &LampSetting::Rgb(RgbColor::CYAN), Brightness::MAX)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SwitchBotClient {
    config: SwitchBotConfig,
    client: Client,
}

impl SwitchBotClient {
    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Builds the commands URL for a device.
    fn command_url(&self, device_id: &str) -> String {
        format!(
            "{}/v1.1/devices/{}/commands",
            self.config.base_url,
            urlencoding::encode(device_id)
        )
    }

    /// Sends one command and checks the SwitchBot status code.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError` on transport failure, a non-success HTTP status,
    /// an unparseable body, or a `statusCode` other than 100.
    pub async fn send_command<C: Command + ?Sized>(
        &self,
        device_id: &str,
        command: &C,
    ) -> Result<CommandResponse, DeviceError> {
        let url = self.command_url(device_id);
        let body = command.to_body();
        let signature = sign_now(&self.config.token, &self.config.secret)?;

        tracing::info!(url = %url, body = %body, "Sending SwitchBot command");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json; charset=utf8")
            .header("Authorization", &self.config.token)
            .header("t", &signature.t)
            .header("sign", &signature.sign)
            .header("nonce", &signature.nonce)
            .body(body.to_string())
            .send()
            .await
            .map_err(DeviceError::Http)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DeviceError::AuthenticationFailed(status.as_u16()));
        }
        if !status.is_success() {
            return Err(DeviceError::Status {
                status: status.as_u16(),
                command: command.name(),
            });
        }

        let text = response.text().await.map_err(DeviceError::Http)?;
        tracing::debug!(body = %text, "Received SwitchBot response");

        let parsed: CommandResponse = serde_json::from_str(&text)?;
        if !parsed.is_success() {
            tracing::error!(
                command = %command.name(),
                status_code = parsed.status_code,
                message = %parsed.message,
                "SwitchBot rejected command"
            );
            return Err(DeviceError::CommandRejected {
                command: command.name(),
                status_code: parsed.status_code,
                message: parsed.message,
            });
        }

        tracing::info!(command = %command.name(), "SwitchBot OK");
        Ok(parsed)
    }

    /// Applies a lamp setting: brightness, then colour or white point, then power on.
    ///
    /// Stops at the first failed command.
    ///
    /// # Errors
    ///
    /// Returns the first `DeviceError` encountered.
    pub async fn apply_setting(
        &self,
        device_id: &str,
        setting: &LampSetting,
        brightness: Brightness,
    ) -> Result<(), DeviceError> {
        tracing::info!(setting = %setting, brightness = %brightness, "Applying lamp setting");

        self.send_command(device_id, &BrightnessCommand::new(brightness))
            .await?;
        self.send_command(device_id, setting_command(setting).as_ref())
            .await?;
        self.send_command(device_id, &PowerOnCommand).await?;
        Ok(())
    }
}
