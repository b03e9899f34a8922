//! Settings file for the `mhd` CLI.
//!
//! Settings come from an optional TOML file. Every key has a default, so an
//! empty file (or no file at all) is valid:
//!
//! ```toml
//! data_dir = "data"
//! region = "global"
//! sensitivity = "medium"
//! forecast_periods = 5
//! interval_width = 0.8
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use mhd_analysis::{ForecastOptions, Sensitivity};
use mhd_model::Region;
use serde::{Deserialize, Serialize};

/// File read when no `--config` is given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "mhd.toml";

/// CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding one `<dataset>.csv` per dataset.
    pub data_dir: PathBuf,
    /// Region applied when a command does not name one.
    pub region: String,
    pub sensitivity: Sensitivity,
    pub forecast_periods: usize,
    pub interval_width: f64,
}

impl Default for Settings {
    fn default() -> Self {
        let forecast = ForecastOptions::default();
        Self {
            data_dir: PathBuf::from("data"),
            region: Region::Global.name().to_string(),
            sensitivity: Sensitivity::default(),
            forecast_periods: forecast.periods,
            interval_width: forecast.interval_width,
        }
    }
}

impl Settings {
    /// Loads settings.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] is read when present and defaults are used
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds an out-of-range value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("no settings file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = fs::read_to_string(&path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        let settings = Self::from_toml(&content)
            .with_context(|| format!("parse settings file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML, unknown keys, an unknown region,
    /// or an interval width outside `[0, 1]`.
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        self.region.parse::<Region>()?;
        if !(0.0..=1.0).contains(&self.interval_width) {
            bail!(
                "interval_width must be between 0 and 1, got {}",
                self.interval_width
            );
        }
        Ok(())
    }

    pub fn forecast_options(&self) -> ForecastOptions {
        ForecastOptions {
            periods: self.forecast_periods,
            interval_width: self.interval_width,
        }
    }
}
