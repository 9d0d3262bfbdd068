//! Best-effort persistence of the tank profile and history. Failures are logged and
//! never interrupt a command.

use anyhow::{Context, Result};
use log::{debug, warn};
use reefpulse_schemas::file_formats::TankState;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved state, or an empty state if nothing could be read.
    pub fn load(&self) -> TankState {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                warn!("Ignoring saved tank data: {e:#}");
                TankState::default()
            }
        }
    }

    pub fn save(&self, state: &TankState) {
        if let Err(e) = self.try_save(state) {
            warn!("Could not save tank data: {e:#}");
        }
    }

    fn try_load(&self) -> Result<TankState> {
        if !self.path.exists() {
            debug!("No saved tank data at '{}'", self.path.display());
            return Ok(TankState::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        TankState::from_json(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn try_save(&self, state: &TankState) -> Result<()> {
        let json = state
            .to_json_pretty()
            .context("Failed to serialize tank data")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!("Saved tank data to '{}'", self.path.display());
        Ok(())
    }
}
