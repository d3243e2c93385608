// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use bookingsync_core::{APP_NAME, SyncConfig};
use bookingsync_dataverse::DataverseConfig;

const BOOKINGSYNC_CONFIG_ENV: &str = "BOOKINGSYNC_CONFIG";

/// Locates and reads the configuration.
///
/// The explicit `path` wins over `$BOOKINGSYNC_CONFIG`, which wins over the
/// per-user default. A missing default file yields the default
/// configuration, which has no `[dataverse]` section.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(BOOKINGSYNC_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Configuration for the bookingsync application.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Remote booking service; required unless replaying with `--dry-run`.
    #[serde(default)]
    pub dataverse: Option<DataverseConfig>,

    /// Synchronizer settings.
    #[serde(default)]
    pub sync: SyncConfig,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
