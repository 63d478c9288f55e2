//! TOML-based application configuration.
//!
//! Stores the scheduling knobs: work window, extended end hour, and the
//! daily cognitive budget. Stored at `<data_dir>/config.toml`; a missing
//! file means defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cost;
use crate::error::{ConfigError, Result};
use crate::optimizer::OptimizerConfig;

use super::data_dir;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_work_start_hour")]
    pub work_start_hour: u32,
    #[serde(default = "default_work_end_hour")]
    pub work_end_hour: u32,
    #[serde(default = "default_extended_end_hour")]
    pub extended_end_hour: u32,
    #[serde(default = "default_daily_budget")]
    pub daily_budget: i32,
}

fn default_work_start_hour() -> u32 {
    9
}

fn default_work_end_hour() -> u32 {
    17
}

fn default_extended_end_hour() -> u32 {
    19
}

fn default_daily_budget() -> i32 {
    cost::DAILY_BUDGET
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            work_start_hour: default_work_start_hour(),
            work_end_hour: default_work_end_hour(),
            extended_end_hour: default_extended_end_hour(),
            daily_budget: default_daily_budget(),
        }
    }
}

impl AppConfig {
    /// Path of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config: Self =
            toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Persist the configuration.
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Reject configurations the slot finder cannot anchor.
    pub fn validate(&self) -> Result<()> {
        if self.work_start_hour >= 24 || self.work_end_hour > 24 || self.extended_end_hour > 24 {
            return Err(ConfigError::InvalidValue {
                key: "work hours".to_string(),
                message: "hours must be within a day".to_string(),
            }
            .into());
        }
        if self.work_start_hour >= self.work_end_hour {
            return Err(ConfigError::InvalidValue {
                key: "work_end_hour".to_string(),
                message: "work day must end after it starts".to_string(),
            }
            .into());
        }
        if self.extended_end_hour < self.work_end_hour {
            return Err(ConfigError::InvalidValue {
                key: "extended_end_hour".to_string(),
                message: "extended hours cannot end before standard hours".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Optimizer view of this configuration.
    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            work_start_hour: self.work_start_hour,
            work_end_hour: self.work_end_hour,
            extended_end_hour: self.extended_end_hour,
            daily_budget: self.daily_budget,
        }
    }
}
