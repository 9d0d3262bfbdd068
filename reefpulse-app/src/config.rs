use anyhow::{bail, Context, Result};
use log::debug;
use reefpulse_core::history::{HISTORY_CAPACITY, OVERDUE_AFTER_DAYS};
use reefpulse_schemas::{
    coral::CoralType,
    dosing::DoseUnit,
    tank::{TankProfile, DEFAULT_TANK_GALLONS},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "reefpulse.yaml";

/// User settings read from the YAML config file. Absent keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the tank profile and history are persisted (JSON).
    pub data_file: PathBuf,
    /// Profile used until one has been saved.
    pub default_tank_gallons: f64,
    pub default_coral_type: Option<CoralType>,
    /// Unit doses are displayed in unless overridden per command.
    pub dose_unit: DoseUnit,
    pub history_capacity: usize,
    pub overdue_after_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("reefpulse-data.json"),
            default_tank_gallons: DEFAULT_TANK_GALLONS,
            default_coral_type: Some(CoralType::Mixed),
            dose_unit: DoseUnit::Tsp,
            history_capacity: HISTORY_CAPACITY,
            overdue_after_days: OVERDUE_AFTER_DAYS,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or the defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at '{}', using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
        settings
            .validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        debug!("Loaded settings from '{}'", path.display());
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            bail!("history_capacity must be at least 1, or saved tests would be discarded");
        }
        Ok(())
    }

    pub fn default_profile(&self) -> TankProfile {
        TankProfile::new(self.default_tank_gallons, self.default_coral_type)
    }
}
