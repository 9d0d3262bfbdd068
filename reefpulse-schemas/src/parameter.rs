//! Water parameters, their ideal ranges, and the classifications attached to a reading
//! that falls outside of them.

use serde::{Deserialize, Serialize};

/// The water parameters tracked for a reef tank.
///
/// Declaration order is the canonical order used for iteration, CSV columns and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Nitrate,
    Ph,
    Alkalinity,
    Calcium,
    Phosphate,
    Salinity,
    Temperature,
    Magnesium,
    Ammonia,
    Nitrite,
}

impl ParameterKind {
    pub const COUNT: usize = 10;

    pub const ALL: [ParameterKind; Self::COUNT] = [
        ParameterKind::Nitrate,
        ParameterKind::Ph,
        ParameterKind::Alkalinity,
        ParameterKind::Calcium,
        ParameterKind::Phosphate,
        ParameterKind::Salinity,
        ParameterKind::Temperature,
        ParameterKind::Magnesium,
        ParameterKind::Ammonia,
        ParameterKind::Nitrite,
    ];

    /// The machine-readable key used in files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Nitrate => "nitrate",
            ParameterKind::Ph => "ph",
            ParameterKind::Alkalinity => "alkalinity",
            ParameterKind::Calcium => "calcium",
            ParameterKind::Phosphate => "phosphate",
            ParameterKind::Salinity => "salinity",
            ParameterKind::Temperature => "temperature",
            ParameterKind::Magnesium => "magnesium",
            ParameterKind::Ammonia => "ammonia",
            ParameterKind::Nitrite => "nitrite",
        }
    }

    /// Parses an external key (case-insensitive, surrounding whitespace ignored).
    /// Unrecognized keys yield `None` and are meant to be skipped by the caller.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(key))
    }

    /// Position of this kind in `ALL`, used for fixed-size per-parameter tables.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Ammonia and nitrite are toxic at any detectable level.
    pub fn is_zero_tolerance(&self) -> bool {
        matches!(self, ParameterKind::Ammonia | ParameterKind::Nitrite)
    }
}

impl std::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The acceptable band for a parameter. Invariant: `min <= max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
    pub label: String,
}

impl IdealRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns a copy of this range with its bounds replaced by `adjustment`.
    pub fn adjusted(&self, adjustment: &RangeAdjustment) -> Self {
        Self {
            min: adjustment.min,
            max: adjustment.max,
            ..self.clone()
        }
    }
}

/// Replacement bounds a coral preset applies on top of a base range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeAdjustment {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Low,
    High,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Low => "low",
            Direction::High => "high",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far and how dangerously a reading deviates from its range.
///
/// Ordering follows presentation order: `Critical < Warning < Attention`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Attention,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Attention => "attention",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
