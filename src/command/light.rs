// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lamp control commands.
//!
//! This module provides commands for switching a SwitchBot color lamp on and
//! setting its brightness, RGB colour and color temperature.

use crate::command::Command;
use crate::types::{Brightness, ColorTemperature, LampSetting, RgbColor};

/// Command to switch the lamp on.
///
/// # Examples
///
/// ```
/// use rainlamp::command::{Command, PowerOnCommand};
///
/// assert_eq!(PowerOnCommand.name(), "turnOn");
/// assert_eq!(PowerOnCommand.parameter(), "default");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerOnCommand;

impl Command for PowerOnCommand {
    fn name(&self) -> String {
        "turnOn".to_string()
    }
}

/// Command to set brightness.
///
/// # Examples
///
/// ```
/// use rainlamp::command::{BrightnessCommand, Command};
/// use rainlamp::types::Brightness;
///
/// let cmd = BrightnessCommand::new(Brightness::new(75).unwrap());
/// assert_eq!(cmd.name(), "setBrightness");
/// assert_eq!(cmd.parameter(), "75");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessCommand(Brightness);

impl BrightnessCommand {
    /// Creates a command to set a specific brightness.
    #[must_use]
    pub const fn new(value: Brightness) -> Self {
        Self(value)
    }
}

impl Command for BrightnessCommand {
    fn name(&self) -> String {
        "setBrightness".to_string()
    }

    fn parameter(&self) -> String {
        self.0.value().to_string()
    }
}

/// Command to set an RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCommand(RgbColor);

impl ColorCommand {
    /// Creates a command to set a colour.
    #[must_use]
    pub const fn new(color: RgbColor) -> Self {
        Self(color)
    }
}

impl Command for ColorCommand {
    fn name(&self) -> String {
        "setColor".to_string()
    }

    fn parameter(&self) -> String {
        self.0.to_command_parameter()
    }
}

/// Command to set the white color temperature.
///
/// # Examples
///
/// ```
/// use rainlamp::command::{ColorTemperatureCommand, Command};
/// use rainlamp::types::ColorTemperature;
///
/// let cmd = ColorTemperatureCommand::new(ColorTemperature::new(5550).unwrap());
/// assert_eq!(cmd.name(), "setColorTemperature");
/// assert_eq!(cmd.parameter(), "5550");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTemperatureCommand(ColorTemperature);

impl ColorTemperatureCommand {
    /// Creates a command to set a color temperature.
    #[must_use]
    pub const fn new(value: ColorTemperature) -> Self {
        Self(value)
    }
}

impl Command for ColorTemperatureCommand {
    fn name(&self) -> String {
        "setColorTemperature".to_string()
    }

    fn parameter(&self) -> String {
        self.0.kelvin().to_string()
    }
}

/// Returns the command that applies `setting`.
#[must_use]
pub(crate) fn setting_command(setting: &LampSetting) -> Box<dyn Command + Send + Sync> {
    match *setting {
        LampSetting::Rgb(color) => Box::new(ColorCommand::new(color)),
        LampSetting::ColorTemperature(ct) => Box::new(ColorTemperatureCommand::new(ct)),
    }
}
