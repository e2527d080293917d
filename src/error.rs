// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for `rainlamp`.
//!
//! Each stage of a run has its own error enum so that the message reaching
//! the operator names both the stage and the underlying cause. Only
//! [`Error::Notification`] is recoverable; every other variant aborts the run.

use thiserror::Error;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A value failed validation (for example a probability outside 0-100).
    #[error("invalid input: {0}")]
    Value(#[from] ValueError),

    /// The weather forecast could not be fetched or understood.
    #[error("weather fetch failed: {0}")]
    UpstreamFetch(#[from] FetchError),

    /// The lamp rejected a command or could not be reached.
    #[error("device command failed: {0}")]
    Device(#[from] DeviceError),

    /// The webhook notification failed.
    #[error("notification failed: {0}")]
    Notification(#[from] NotificationError),

    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns `true` if this error must abort the run.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Notification(_))
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A precipitation probability is outside [0, 100] or not a number.
    #[error("precipitation probability {0} is out of range [0, 100]")]
    InvalidProbability(f64),

    /// A colour temperature is outside the lamp's range.
    #[error("color temperature {actual}K is out of range [{min}K, {max}K]")]
    InvalidColorTemperature {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A brightness value is outside [1, 100].
    #[error("brightness value {0} is out of range [1, 100]")]
    InvalidBrightness(u8),
}

/// Errors raised while fetching or decoding the forecast.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The weather service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected data is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// A field is present but cannot be interpreted.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to device commands.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed.
    #[error("authentication failed (HTTP {0})")]
    AuthenticationFailed(u16),

    /// The API answered with a non-success HTTP status.
    #[error("HTTP {status} for command {command}")]
    Status {
        /// Response status code.
        status: u16,
        /// Command name.
        command: String,
    },

    /// Command was rejected by the API.
    #[error("command {command} rejected with status {status_code}: {message}")]
    CommandRejected {
        /// Command name.
        command: String,
        /// SwitchBot `statusCode`.
        status_code: i64,
        /// SwitchBot `message`.
        message: String,
    },

    /// The response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Signing the request failed.
    #[error("failed to sign request: {0}")]
    Signing(String),
}

/// Errors related to the webhook notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status.
    #[error("webhook returned HTTP {0}")]
    Status(u16),
}

/// Errors related to configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source could not be read or deserialized.
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    /// A setting has an unusable value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// The environment variable name.
        key: String,
        /// Description of the problem.
        message: String,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
