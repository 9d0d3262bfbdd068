//! Supplement methods and the dosing plans computed from them.

use crate::parameter::ParameterKind;
use serde::{Deserialize, Serialize};

/// One supplement product or technique for raising a single parameter.
///
/// The reference dose (one standard amount, nominally a teaspoon or one `ml_per_dose`
/// measure) raises the parameter by `units_per_dose` in a tank of `standard_amount_gallons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosingMethod {
    pub name: String,
    /// Parameter change produced by one standard amount in the standard volume.
    pub units_per_dose: f64,
    /// Tank volume the standard amount is defined for.
    pub standard_amount_gallons: f64,
    /// Largest safe change of the parameter in a single day.
    pub max_change_per_day: f64,
    pub grams_per_std_amount: Option<f64>,
    /// Set for liquid products measured in millilitres rather than teaspoons.
    pub ml_per_dose: Option<f64>,
    /// Slow drip through the top-off system instead of a manual dose.
    pub is_drip_method: bool,
    /// Human-readable description of the standard amount (e.g. "1 tsp").
    pub amount_description: String,
    pub note: String,
}

impl DosingMethod {
    /// Short product name without the chemical formula, e.g. "Soda Ash".
    pub fn short_name(&self) -> &str {
        self.name.split('(').next().unwrap_or_default().trim()
    }
}

/// A multi-day plan for raising one parameter within its safe daily change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosingPlan {
    pub kind: ParameterKind,
    pub current: f64,
    pub target: f64,
    pub deficit: f64,
    pub method: DosingMethod,
    /// Total dose in the method's standard units.
    pub total_dose: f64,
    /// Always at least one.
    pub days_needed: u32,
    /// Parameter change expected each day.
    pub per_day_change: f64,
    /// Dose per day in the method's standard units.
    pub doses_per_day: f64,
    /// Unit label of the parameter (e.g. "ppm", "dKH").
    pub unit: String,
}

/// One row of the day-by-day schedule of a [`DosingPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    /// 1-indexed.
    pub day: u32,
    pub dose: f64,
    /// Expected value after this day's dose, never past the target.
    pub projected_value: f64,
    /// The final day, after which the parameter should be retested.
    pub is_last: bool,
}

/// Display units a dose can be converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseUnit {
    Tsp,
    Tbsp,
    Ml,
    G,
}

impl DoseUnit {
    pub const ALL: [DoseUnit; 4] = [DoseUnit::Tsp, DoseUnit::Tbsp, DoseUnit::Ml, DoseUnit::G];

    pub fn label(&self) -> &'static str {
        match self {
            DoseUnit::Tsp => "tsp",
            DoseUnit::Tbsp => "tbsp",
            DoseUnit::Ml => "ml",
            DoseUnit::G => "g",
        }
    }

    pub fn full_label(&self) -> &'static str {
        match self {
            DoseUnit::Tsp => "Teaspoons",
            DoseUnit::Tbsp => "Tablespoons",
            DoseUnit::Ml => "Milliliters",
            DoseUnit::G => "Grams",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|unit| unit.label().eq_ignore_ascii_case(key))
    }
}

/// A dose expressed in a display unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedDose {
    pub value: f64,
    pub label: String,
}
