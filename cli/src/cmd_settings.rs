// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use classtable_core::{ClassTable, Color, Id, Settings, SettingsPatch, ThemeMode};
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use crate::arg::CommonArgs;
use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdSettingsShow {
    pub output_format: OutputFormat,
}

impl CmdSettingsShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the application settings")
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!("showing settings...");
        let settings = app.settings().await?;
        print_settings(app, &settings, self.output_format).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdSettingsSet {
    pub patch: SettingsPatch,
    pub output_format: OutputFormat,
}

impl CmdSettingsSet {
    pub const NAME: &str = "set";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Change the application settings")
            .arg(arg!(--theme <THEME> "Colour scheme").value_parser(value_parser!(ThemeMode)))
            .arg(
                arg!(--accent <COLOR> "Accent colour as #RRGGBB")
                    .value_parser(|s: &str| s.parse::<Color>().map_err(|e| e.to_string())),
            )
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let patch = SettingsPatch {
            theme: matches.get_one("theme").copied(),
            accent: matches.get_one("accent").copied(),
        };
        if patch.is_empty() {
            return Err("Nothing to change, pass --theme or --accent".into());
        }

        Ok(Self {
            patch,
            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(patch = ?self.patch, "updating settings...");
        let settings = app.update_settings(self.patch).await?;
        print_settings(app, &settings, self.output_format).await
    }
}

async fn print_settings(
    app: &ClassTable,
    settings: &Settings,
    output_format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(settings)?);
        return Ok(());
    }

    let selected = match &settings.selected_schedule {
        Some(uid) => app.get_schedule(&Id::Uid(uid.clone())).await?.name.clone(),
        None => "none".italic().to_string(),
    };
    let accent = settings.accent;
    let swatch = "■".truecolor(accent.r, accent.g, accent.b);
    for (key, value) in settings_rows(settings, selected) {
        match key {
            "accent" => println!("{}{value} {swatch}", format!("{key:<10}").bold()),
            _ => println!("{}{value}", format!("{key:<10}").bold()),
        }
    }
    Ok(())
}

fn settings_rows(settings: &Settings, selected: String) -> [(&'static str, String); 3] {
    [
        ("theme", settings.theme.to_string()),
        ("accent", settings.accent.to_string()),
        ("schedule", selected),
    ]
}
