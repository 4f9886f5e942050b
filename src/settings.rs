use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{
    ConfigError, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_TICK_INTERVAL_MS, GridSize,
};
use crate::error::AppError;

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// On-disk settings; every field is optional and falls back to the defaults.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub width: Option<u16>,
    #[serde(default)]
    pub height: Option<u16>,
    #[serde(default)]
    pub tick_interval_ms: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SettingsFile {
    /// Layers `overrides` on top of this file; set fields in `overrides` win.
    #[must_use]
    pub fn merged_with(self, overrides: SettingsFile) -> Self {
        Self {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            tick_interval_ms: overrides.tick_interval_ms.or(self.tick_interval_ms),
            seed: overrides.seed.or(self.seed),
        }
    }
}

/// Validated runtime settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Settings {
    pub grid: GridSize,
    pub tick_interval: Duration,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            seed: None,
        }
    }
}

impl Settings {
    /// Fills unset fields with defaults and validates the result.
    pub fn resolve(file: SettingsFile) -> Result<Self, ConfigError> {
        let grid = GridSize::new(
            file.width.unwrap_or(DEFAULT_GRID_WIDTH),
            file.height.unwrap_or(DEFAULT_GRID_HEIGHT),
        )?;

        let tick_ms = file.tick_interval_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS);
        if tick_ms == 0 {
            return Err(ConfigError::TickIntervalZero);
        }

        Ok(Self {
            grid,
            tick_interval: Duration::from_millis(tick_ms),
            seed: file.seed,
        })
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}

/// Loads settings from `path`.
///
/// A missing file yields the defaults unless `required` is set (an explicit
/// `--config` path must exist). A file that exists but cannot be read or
/// parsed is always an error.
pub fn load_settings_file(path: &Path, required: bool) -> Result<SettingsFile, AppError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            log::debug!("no settings file at {}", path.display());
            return Ok(SettingsFile::default());
        }
        Err(source) => {
            return Err(AppError::SettingsRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str::<SettingsFile>(&raw).map_err(|source| AppError::SettingsParse {
        path: path.to_path_buf(),
        source,
    })
}
