// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discord webhook notifications.
//!
//! Notifications are best-effort: the lamp has already been set by the time
//! a notification is sent, so callers log a failure and carry on.

mod embed;

pub use embed::{Embed, EmbedField, EmbedFooter, EmbedThumbnail, JMA_MAP_URL, WebhookPayload, build_embed};

use std::time::Duration;

use reqwest::Client;

use crate::error::NotificationError;
use crate::types::LampSetting;
use crate::weather::ForecastSummary;

/// Configuration for Discord notifications.
///
/// # Examples
///
/// ```
/// use rainlamp::notify::DiscordConfig;
///
/// let config = DiscordConfig::new(Some("https://discord.com/api/webhooks/1/abc".into()));
/// assert!(config.enabled());
///
/// let disabled = config.clone().with_enabled(false);
/// assert!(!disabled.enabled());
/// ```
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    webhook_url: Option<String>,
    enabled: bool,
    timeout: Duration,
}

impl DiscordConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates an enabled configuration. Blank URLs are treated as unset.
    #[must_use]
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url: webhook_url.filter(|url| !url.trim().is_empty()),
            enabled: true,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Enables or disables notifications.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns whether notifications are enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the webhook URL, if set.
    #[must_use]
    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref()
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates a `Notifier` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_notifier(self) -> Result<Notifier, NotificationError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(NotificationError::Http)?;

        Ok(Notifier {
            config: self,
            client,
        })
    }
}

/// What happened to the notification of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The webhook accepted the message.
    Sent,
    /// Notifications are turned off.
    Disabled,
    /// Notifications are on but no webhook URL is configured.
    Skipped,
    /// Sending failed; the run still succeeds.
    Failed(String),
}

/// Posts forecast summaries to a Discord webhook.
#[derive(Debug, Clone)]
pub struct Notifier {
    config: DiscordConfig,
    client: Client,
}

impl Notifier {
    /// Sends the summary for this run.
    ///
    /// Returns `Disabled` or `Skipped` without any request when there is
    /// nothing to send to.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the webhook is unreachable or rejects
    /// the payload.
    pub async fn notify(
        &self,
        summary: &ForecastSummary,
        setting: &LampSetting,
    ) -> Result<NotifyOutcome, NotificationError> {
        if !self.config.enabled {
            tracing::info!("Discord notification is disabled");
            return Ok(NotifyOutcome::Disabled);
        }
        let Some(url) = self.config.webhook_url() else {
            tracing::warn!("DISCORD_WEBHOOK_URL is not set");
            return Ok(NotifyOutcome::Skipped);
        };

        let payload = WebhookPayload {
            embeds: vec![build_embed(summary, setting)],
        };

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(NotificationError::Http)?;

        if !response.status().is_success() {
            return Err(NotificationError::Status(response.status().as_u16()));
        }

        tracing::info!("Discord notification sent");
        Ok(NotifyOutcome::Sent)
    }
}
