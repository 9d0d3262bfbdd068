use crate::coral::CoralType;
use serde::{Deserialize, Serialize};

/// Volume assumed whenever the configured tank size is missing or unusable.
pub const DEFAULT_TANK_GALLONS: f64 = 50.0;

/// `tank_gallons` when it is a usable volume, otherwise [`DEFAULT_TANK_GALLONS`].
pub fn usable_gallons(tank_gallons: f64) -> f64 {
    if tank_gallons.is_finite() && tank_gallons > 0.0 {
        tank_gallons
    } else {
        DEFAULT_TANK_GALLONS
    }
}

/// The tank configuration a diagnosis or dosing calculation runs against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TankProfile {
    pub tank_gallons: f64,
    pub coral_type: Option<CoralType>,
}

impl TankProfile {
    pub fn new(tank_gallons: f64, coral_type: Option<CoralType>) -> Self {
        Self {
            tank_gallons,
            coral_type,
        }
    }

    /// Tank volume for calculations: non-finite or non-positive sizes fall back to
    /// [`DEFAULT_TANK_GALLONS`].
    pub fn effective_gallons(&self) -> f64 {
        usable_gallons(self.tank_gallons)
    }
}

impl Default for TankProfile {
    fn default() -> Self {
        Self {
            tank_gallons: DEFAULT_TANK_GALLONS,
            coral_type: Some(CoralType::Mixed),
        }
    }
}
