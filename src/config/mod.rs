//! Typed configuration surface: runtime flags grouped into plain-struct
//! blocks — scheduling, fisheries, management, contaminants, atomic
//! ratios — loaded once at init from TOML via `serde` and passed by
//! const reference thereafter.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Clock/dispatch scheduling knobs
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    pub dt_seconds: f64,
    pub start_year: i32,
    pub run_years: u32,
    #[serde(default)]
    pub snapshot_cadence_days: u32,
}

/// Top-level harvest engine knobs that aren't per-fleet
#[derive(Debug, Clone, Deserialize)]
pub struct FisheriesConfig {
    pub max_num_sp_over_tac: usize,
    #[serde(default)]
    pub needs_shots: bool,
    #[serde(default = "default_true")]
    pub flag_tac_include_discard: bool,
}

fn default_true() -> bool {
    true
}

/// Management/HCR cadence and global switches
#[derive(Debug, Clone, Deserialize)]
pub struct ManagementConfig {
    pub assessment_interval_years: u32,
    #[serde(default)]
    pub multi_year_tac_period: u32,
    #[serde(default)]
    pub assessment_mode: AssessmentMode,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentMode {
    #[default]
    Pseudo,
    External,
    RBridge,
}

/// Contaminant ledger switches
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContaminantConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub closure_threshold: f64,
}

/// Atomic-ratio (C:N, etc.) tracking switches
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatioConfig {
    #[serde(default)]
    pub track_carbon: bool,
    #[serde(default)]
    pub redfield_cn: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scheduling: SchedulingConfig,
    pub fisheries: FisheriesConfig,
    pub management: ManagementConfig,
    #[serde(default)]
    pub contaminants: ContaminantConfig,
    #[serde(default)]
    pub ratios: RatioConfig,
}

impl Config {
    /// loads and validates a run configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            file: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            file: path.display().to_string(),
            source,
        })?;
        config.validate(&path.display().to_string())?;
        Ok(config)
    }

    fn validate(&self, file: &str) -> Result<(), ConfigError> {
        if self.scheduling.dt_seconds <= 0.0 {
            return Err(ConfigError::NonPositive {
                file: file.to_string(),
                parameter: "scheduling.dt_seconds".to_string(),
                value: self.scheduling.dt_seconds,
            });
        }
        if self.scheduling.run_years == 0 {
            return Err(ConfigError::MissingParameter {
                file: file.to_string(),
                parameter: "scheduling.run_years".to_string(),
            });
        }
        Ok(())
    }
}
