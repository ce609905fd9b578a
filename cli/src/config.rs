// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use classtable_core::{APP_NAME, Config as CoreConfig, get_config_dir};
use tokio::fs;

const CONFIG_ENV: &str = "CLASSTABLE_CONFIG";
const DEV_ENV: &str = "CLASSTABLE_DEV";

const DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

const DEFAULT_CELL_WIDTH: usize = 14;

/// Resolves and reads the configuration file.
///
/// The path comes from `--config`, then `$CLASSTABLE_CONFIG`, then the user
/// config directory. Only an explicitly given file has to exist.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, Config), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({DEV_ENV} is set): config must be explicitly specified via --config or {CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            return Ok((CoreConfig::default(), Config::default()));
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| (a.core, a.cli))
}

/// Configuration of the command-line interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct Config {
    /// Width of a day column in the week table, in terminal columns.
    #[serde(default = "default_cell_width")]
    pub cell_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
        }
    }
}

fn default_cell_width() -> usize {
    DEFAULT_CELL_WIDTH
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,

    #[serde(default)]
    cli: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| format!("Failed to parse config: {e}").into())
    }
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            DEV_ENV,
            val,
            DEV_VALID_TRUE.join(", "),
            DEV_VALID_FALSE.join(", "),
        );
        None
    }
}
