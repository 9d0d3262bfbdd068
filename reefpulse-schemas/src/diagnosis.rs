use crate::parameter::{Direction, IdealRange, ParameterKind, Severity};
use serde::{Deserialize, Serialize};

/// An out-of-range reading found by a diagnosis. Always recomputed from its test entry,
/// never stored on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: ParameterKind,
    pub direction: Direction,
    pub value: f64,
    /// The range in effect after coral-type adjustments.
    pub range: IdealRange,
    pub severity: Severity,
    /// Short advice for correcting the reading, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_fix: Option<String>,
}

/// Condensed status of a single reading, as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    Ok,
    Warning,
    Critical,
}
