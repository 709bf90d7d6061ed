// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fs, path::PathBuf};

use koyomi_core::{APP_NAME, ViewMode};

const KOYOMI_CONFIG_ENV: &str = "KOYOMI_CONFIG";

/// User preferences. Every key is optional; koyomi runs fine with no
/// config file at all.
#[derive(Debug, Default, Clone, Copy, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window strategy used when `--mode` is not given.
    pub default_view: ViewMode,
}

/// Resolves and parses the configuration.
///
/// Priority: the `--config` flag, then the `KOYOMI_CONFIG` environment
/// variable, then `config.toml` under the user config directory. A missing
/// default file is not an error since nothing in it is required.
#[tracing::instrument]
pub fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(KOYOMI_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Ok(Config::default());
        }
        config
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?;
    toml::from_str(&content)
        .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e).into())
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
