// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SwitchBot Cloud API client.
//!
//! - [`SwitchBotConfig`]: connection parameters (token, secret, base URL, timeout)
//! - [`SwitchBotClient`]: sends signed commands to a single device
//! - [`sign`]: request signing

mod http;
pub mod sign;

pub use http::{SwitchBotClient, SwitchBotConfig};

use serde::Deserialize;

/// Body of a SwitchBot API response.
///
/// A `status_code` of 100 means success; anything else is a rejection even
/// when the HTTP status is 200.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandResponse {
    /// SwitchBot status code.
    #[serde(rename = "statusCode")]
    pub status_code: i64,
    /// Human-readable status message.
    #[serde(default)]
    pub message: String,
    /// Command-specific payload.
    #[serde(default)]
    pub body: serde_json::Value,
}

impl CommandResponse {
    /// The `statusCode` SwitchBot uses for success.
    pub const SUCCESS: i64 = 100;

    /// Returns `true` if the API accepted the command.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code == Self::SUCCESS
    }
}
