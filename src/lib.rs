// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `rainlamp` - show today's chance of rain on a SwitchBot lamp.
//!
//! Each run fetches today's forecast, takes the highest chance of rain over
//! the morning, afternoon and evening slots, turns it into a lamp colour or
//! white color temperature, sends that to a SwitchBot lamp and optionally
//! posts a summary to a Discord webhook. Runs are meant to be triggered by an
//! external scheduler such as cron.
//!
//! # Lamp Modes
//!
//! - **RGB**: six colours from orange (no rain) to deep blue (rain likely)
//! - **Color temperature**: 2700K (no rain) to 6500K (certain rain), linear
//!
//! # Quick Start
//!
//! ```no_run
//! use rainlamp::{Pipeline, Settings};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> rainlamp::Result<()> {
//!     let settings = Settings::load()?;
//!     let report = Pipeline::new(&settings)?.run().await?;
//!     println!("{} -> {}", report.probability, report.setting);
//!     Ok(())
//! }
//! ```
//!
//! ## Mapping Only
//!
//! ```
//! use rainlamp::mapper::map_probability;
//! use rainlamp::types::{LampMode, RgbColor};
//!
//! let setting = map_probability(0.0, LampMode::Rgb).unwrap();
//! assert_eq!(setting.rgb(), Some(RgbColor::ORANGE));
//!
//! let setting = map_probability(75.0, LampMode::ColorTemperature).unwrap();
//! assert_eq!(setting.to_string(), "Color Temp: 5550K");
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod mapper;
pub mod notify;
pub mod protocol;
mod run;
pub mod types;
pub mod weather;

pub use crate::config::Settings;
pub use error::{
    ConfigError, DeviceError, Error, FetchError, NotificationError, Result, ValueError,
};
pub use mapper::{compute_lamp_setting, map_probability};
pub use notify::{DiscordConfig, Notifier, NotifyOutcome};
pub use protocol::{SwitchBotClient, SwitchBotConfig};
pub use run::{Pipeline, RunReport};
pub use types::{
    Brightness, ColorTemperature, LampMode, LampSetting, PrecipitationProbability, RgbColor,
};
pub use weather::{ForecastSummary, WeatherClient, WeatherConfig};
