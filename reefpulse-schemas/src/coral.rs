use crate::parameter::{ParameterKind, RangeAdjustment};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// The dominant livestock of a tank, which shifts some of the ideal ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoralType {
    Sps,
    Lps,
    Mixed,
    Softie,
}

impl CoralType {
    pub const ALL: [CoralType; 4] = [
        CoralType::Sps,
        CoralType::Lps,
        CoralType::Mixed,
        CoralType::Softie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoralType::Sps => "sps",
            CoralType::Lps => "lps",
            CoralType::Mixed => "mixed",
            CoralType::Softie => "softie",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|coral| coral.as_str().eq_ignore_ascii_case(key))
    }
}

impl std::fmt::Display for CoralType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads an optional coral type, mapping unknown or malformed values to `None` so the
/// ranges fall back to their base values instead of the whole document failing to load.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<CoralType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(CoralType::from_key))
}

/// A named set of range overrides. Kinds absent from `adjustments` keep their base range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoralPreset {
    pub label: String,
    pub description: String,
    pub adjustments: BTreeMap<ParameterKind, RangeAdjustment>,
}
