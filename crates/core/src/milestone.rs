//! Milestone model - dated checkpoints with caller-set progress.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::id::MilestoneId;

/// A dated checkpoint in the plan.
///
/// `progress` is set by whoever authors the milestone. It is not derived from
/// task completion or from `completion_criteria`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Unique identifier
    pub id: MilestoneId,

    /// Title
    pub title: String,

    /// Description
    pub description: String,

    /// Target date
    pub target_date: NaiveDate,

    /// What must hold for the milestone to count as reached
    #[serde(default)]
    pub completion_criteria: Vec<String>,

    /// Status
    pub status: MilestoneStatus,

    /// Percentage complete (0-100)
    #[serde(default)]
    pub progress: u8,
}

impl Milestone {
    /// Condensed view used in progress reports.
    pub fn summary(&self) -> MilestoneSummary {
        MilestoneSummary {
            title: self.title.clone(),
            progress: self.progress,
            status: self.status,
            target_date: self.target_date,
        }
    }
}

/// Milestone status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    /// Not started yet
    Planning,
    /// Work under way
    InProgress,
    /// Reached
    Completed,
    /// Past its target date
    Delayed,
}

impl MilestoneStatus {
    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::Planning => "planning",
            MilestoneStatus::InProgress => "in-progress",
            MilestoneStatus::Completed => "completed",
            MilestoneStatus::Delayed => "delayed",
        }
    }
}

/// Milestone fields shown in a progress report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneSummary {
    /// Milestone title
    pub title: String,
    /// Percentage complete (0-100)
    pub progress: u8,
    /// Status
    pub status: MilestoneStatus,
    /// Target date
    pub target_date: NaiveDate,
}
