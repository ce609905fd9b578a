// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::schedule::DEFAULT_TOTAL_WEEKS;
use crate::week::MAX_WEEKS;
use crate::{LessonTimePeriodInfo, LessonsPerDay, lesson::DEFAULT_PERIODS};

/// The name of the application.
pub const APP_NAME: &str = "classtable";

/// Configuration for the application core.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Term length of new schedules, in weeks.
    #[serde(default = "default_total_weeks")]
    pub default_total_weeks: u16,

    /// Lesson period generators used for new schedules.
    #[serde(default)]
    pub default_lessons: DefaultLessons,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            default_total_weeks: DEFAULT_TOTAL_WEEKS,
            default_lessons: DefaultLessons::default(),
        }
    }
}

fn default_total_weeks() -> u16 {
    DEFAULT_TOTAL_WEEKS
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        if self.default_total_weeks == 0 || self.default_total_weeks > MAX_WEEKS {
            return Err(format!(
                "Invalid default_total_weeks {}, expected 1 to {MAX_WEEKS}",
                self.default_total_weeks
            )
            .into());
        }

        self.default_lessons
            .generate()
            .map_err(|e| format!("Invalid default_lessons: {e}"))?;

        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                )
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        };

        Ok(())
    }
}

/// Generators of the three lesson periods of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultLessons {
    pub morning: LessonTimePeriodInfo,
    pub afternoon: LessonTimePeriodInfo,
    pub evening: LessonTimePeriodInfo,
}

impl Default for DefaultLessons {
    fn default() -> Self {
        let (morning, afternoon, evening) = DEFAULT_PERIODS;
        Self {
            morning,
            afternoon,
            evening,
        }
    }
}

impl DefaultLessons {
    pub fn generate(&self) -> Result<LessonsPerDay, crate::ValidationError> {
        LessonsPerDay::from_periods(&self.morning, &self.afternoon, &self.evening)
    }
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

/// The user-specific configuration directory.
pub fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_local_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_local_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}
