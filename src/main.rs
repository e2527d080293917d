// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `rainlamp` command-line entry point.
//!
//! # Usage
//!
//! ```bash
//! rainlamp                      # settings from the environment / .env
//! rainlamp --color-temperature  # force color-temperature mode
//! rainlamp --dry-run --no-notify
//! ```

use std::process::ExitCode;

use clap::Parser;
use rainlamp::{LampMode, NotifyOutcome, Pipeline, Settings};
use tracing_subscriber::EnvFilter;

/// Show today's chance of rain on a SwitchBot lamp.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Use color-temperature mode regardless of USE_COLOR_TEMPERATURE.
    #[arg(long, conflicts_with = "rgb")]
    color_temperature: bool,

    /// Use RGB mode regardless of USE_COLOR_TEMPERATURE.
    #[arg(long)]
    rgb: bool,

    /// Fetch and map, but do not command the lamp.
    #[arg(long)]
    dry_run: bool,

    /// Do not post to Discord.
    #[arg(long)]
    no_notify: bool,
}

impl Cli {
    fn apply(&self, mut settings: Settings) -> Settings {
        if self.color_temperature {
            settings = settings.with_mode(LampMode::ColorTemperature);
        } else if self.rgb {
            settings = settings.with_mode(LampMode::Rgb);
        }
        if self.no_notify {
            settings = settings.with_discord_enabled(false);
        }
        settings.with_dry_run(self.dry_run)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rainlamp=info")),
        )
        .init();

    let settings = match Settings::load() {
        Ok(settings) => cli.apply(settings),
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("error: configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match Pipeline::new(&settings) {
        Ok(pipeline) => pipeline.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            if let NotifyOutcome::Failed(reason) = &report.notification {
                tracing::warn!(reason = %reason, "Lamp set, notification not delivered");
            }
            tracing::info!(
                setting = %report.setting,
                device_updated = report.device_updated,
                "Run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
