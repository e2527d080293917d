// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SwitchBot device command definitions.
//!
//! This module provides typed representations of the lamp commands sent
//! through the SwitchBot Cloud API.
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Example |
//! |-------------|---------|---------|
//! | [`PowerOnCommand`] | Turn the lamp on | `turnOn` |
//! | [`BrightnessCommand`] | Set brightness (1-100) | `setBrightness 100` |
//! | [`ColorCommand`] | Set an RGB colour | `setColor 0:255:255` |
//! | [`ColorTemperatureCommand`] | Set white color temperature | `setColorTemperature 5550` |
//!
//! # Command Structure
//!
//! Each command is posted as a JSON body with three fields:
//! - `command`: the command name (e.g. `"setColor"`)
//! - `parameter`: the command argument, or `"default"` when it takes none
//! - `commandType`: always `"command"` for these lamp commands
//!
//! # Examples
//!
//! ```
//! use rainlamp::command::{ColorCommand, Command};
//! use rainlamp::types::RgbColor;
//!
//! let cmd = ColorCommand::new(RgbColor::CYAN);
//! assert_eq!(cmd.name(), "setColor");
//! assert_eq!(cmd.parameter(), "0:255:255");
//! assert_eq!(
//!     cmd.to_body(),
//!     serde_json::json!({
//!         "command": "setColor",
//!         "parameter": "0:255:255",
//!         "commandType": "command"
//!     })
//! );
//! ```

mod light;

pub use light::{BrightnessCommand, ColorCommand, ColorTemperatureCommand, PowerOnCommand};
pub(crate) use light::setting_command;

/// Parameter sent with commands that take no argument.
pub const DEFAULT_PARAMETER: &str = "default";

/// A command that can be sent to a SwitchBot device.
pub trait Command {
    /// Returns the command name, for example `"turnOn"` or `"setColor"`.
    fn name(&self) -> String;

    /// Returns the command parameter.
    ///
    /// Commands without an argument use [`DEFAULT_PARAMETER`].
    fn parameter(&self) -> String {
        DEFAULT_PARAMETER.to_string()
    }

    /// Returns the command type. Lamp commands are all plain `"command"`s.
    fn command_type(&self) -> &'static str {
        "command"
    }

    /// Returns the JSON request body for this command.
    fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "command": self.name(),
            "parameter": self.parameter(),
            "commandType": self.command_type(),
        })
    }
}
