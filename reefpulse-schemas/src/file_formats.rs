use crate::{coral::CoralType, reading::TestEntry};
use serde::{Deserialize, Serialize};

/// The persisted application state. Every field is optional so partially written or
/// older files still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TankState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank_gallons: Option<f64>,
    #[serde(
        default,
        deserialize_with = "crate::coral::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub coral_type: Option<CoralType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<TestEntry>>,
}

impl TankState {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
