// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Color;

/// Colour scheme preference.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the system.
    #[default]
    System,
    Light,
    Dark,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::System => write!(f, "system"),
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

/// Application-wide preferences.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: ThemeMode,
    pub accent: Color,
    /// Uid of the schedule shown by default.
    pub selected_schedule: Option<String>,
}

/// Partial update of the settings.
///
/// The selected schedule is not part of the patch, it is changed through
/// [`crate::ClassTable::select_schedule`] only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SettingsPatch {
    pub theme: Option<ThemeMode>,
    pub accent: Option<Color>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.accent.is_none()
    }

    pub fn apply_to(&self, settings: &Settings) -> Settings {
        Settings {
            theme: self.theme.unwrap_or(settings.theme),
            accent: self.accent.unwrap_or(settings.accent),
            selected_schedule: settings.selected_schedule.clone(),
        }
    }
}
