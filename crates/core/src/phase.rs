//! Project phases - the five sequential stages tasks are bucketed into.

use serde::{Deserialize, Serialize};
use crate::error::CoreError;

/// One of the five ordered project stages.
///
/// Variant order matches the lexicographic order of the serialized names
/// (`phase1` < `phase2` < ...), so `Ord` can be used for phase sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Phase 1
    #[serde(rename = "phase1")]
    Phase1,
    /// Phase 2
    #[serde(rename = "phase2")]
    Phase2,
    /// Phase 3
    #[serde(rename = "phase3")]
    Phase3,
    /// Phase 4
    #[serde(rename = "phase4")]
    Phase4,
    /// Phase 5
    #[serde(rename = "phase5")]
    Phase5,
}

impl Phase {
    /// All phases in order.
    pub const ALL: [Phase; 5] = [
        Phase::Phase1,
        Phase::Phase2,
        Phase::Phase3,
        Phase::Phase4,
        Phase::Phase5,
    ];

    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Phase1 => "phase1",
            Phase::Phase2 => "phase2",
            Phase::Phase3 => "phase3",
            Phase::Phase4 => "phase4",
            Phase::Phase5 => "phase5",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phase1" | "1" => Ok(Phase::Phase1),
            "phase2" | "2" => Ok(Phase::Phase2),
            "phase3" | "3" => Ok(Phase::Phase3),
            "phase4" | "4" => Ok(Phase::Phase4),
            "phase5" | "5" => Ok(Phase::Phase5),
            _ => Err(CoreError::InvalidPhase(s.to_string())),
        }
    }
}
