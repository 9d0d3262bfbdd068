//! Test readings as entered by the user and as kept in the history log.

use crate::{coral::CoralType, parameter::ParameterKind, tank::TankProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Parses one raw field value. Blank, non-numeric and non-finite text yields `None`.
pub fn parse_reading_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The readings of a single test. A kind is present only if a numeric value was supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Readings(BTreeMap<ParameterKind, f64>);

/// Stored readings load the way entered ones do: unknown keys and values that are not
/// finite numbers (or numeric text) are dropped.
impl<'de> Deserialize<'de> for Readings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| {
                let kind = ParameterKind::from_key(&key)?;
                let value = match value {
                    serde_json::Value::Number(n) => n.as_f64(),
                    serde_json::Value::String(text) => parse_reading_value(&text),
                    _ => None,
                }?;
                Some((kind, value))
            })
            .collect())
    }
}

impl Readings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds readings from untyped `(key, value)` pairs, silently dropping unknown keys
    /// and blank or unparsable values.
    pub fn from_raw<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut readings = Self::new();
        for (key, value) in pairs {
            let (Some(kind), Some(value)) = (
                ParameterKind::from_key(key.as_ref()),
                parse_reading_value(value.as_ref()),
            ) else {
                continue;
            };
            readings.insert(kind, value);
        }
        readings
    }

    /// Records a value; non-finite values are ignored.
    pub fn insert(&mut self, kind: ParameterKind, value: f64) {
        if value.is_finite() {
            self.0.insert(kind, value);
        }
    }

    pub fn with(mut self, kind: ParameterKind, value: f64) -> Self {
        self.insert(kind, value);
        self
    }

    pub fn get(&self, kind: ParameterKind) -> Option<f64> {
        self.0.get(&kind).copied()
    }

    /// Readings in canonical parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterKind, f64)> + '_ {
        self.0.iter().map(|(kind, value)| (*kind, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ParameterKind, f64)> for Readings {
    fn from_iter<T: IntoIterator<Item = (ParameterKind, f64)>>(iter: T) -> Self {
        let mut readings = Readings::new();
        for (kind, value) in iter {
            readings.insert(kind, value);
        }
        readings
    }
}

/// A timestamped test together with the tank configuration active when it was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEntry {
    pub id: i64,
    pub date: DateTime<Utc>,
    #[serde(rename = "params")]
    pub readings: Readings,
    pub tank_gallons: f64,
    #[serde(default, deserialize_with = "crate::coral::deserialize_lenient")]
    pub coral_type: Option<CoralType>,
}

impl TestEntry {
    pub fn new(date: DateTime<Utc>, readings: Readings, profile: &TankProfile) -> Self {
        Self {
            id: date.timestamp_millis(),
            date,
            readings,
            tank_gallons: profile.tank_gallons,
            coral_type: profile.coral_type,
        }
    }

    pub fn profile(&self) -> TankProfile {
        TankProfile::new(self.tank_gallons, self.coral_type)
    }
}
