//! Plan document - everything the tracker and the matrix are seeded with.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use crate::error::{CoreError, Result};
use crate::feature::FeatureImpact;
use crate::fixtures;
use crate::milestone::Milestone;
use crate::task::DevelopmentTask;

/// A complete, serializable development plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Development tasks
    #[serde(default)]
    pub tasks: Vec<DevelopmentTask>,

    /// Milestones
    #[serde(default)]
    pub milestones: Vec<Milestone>,

    /// Candidate features for prioritisation
    #[serde(default)]
    pub features: Vec<FeatureImpact>,
}

impl Plan {
    /// The built-in platform plan.
    pub fn seed() -> Self {
        Self {
            tasks: fixtures::phase1_tasks(),
            milestones: fixtures::milestones(),
            features: fixtures::phase1_features(),
        }
    }

    /// Check the invariants a loaded plan must hold: unique task ids,
    /// positive estimates, milestone progress within 0-100 and feature
    /// ratings within 1-10.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(&task.id) {
                return Err(CoreError::DuplicateTaskId(task.id.to_string()));
            }
            if task.estimated_hours.is_nan() || task.estimated_hours <= 0.0 {
                return Err(CoreError::InvalidEstimate {
                    task: task.id.to_string(),
                    hours: task.estimated_hours,
                });
            }
        }

        for milestone in &self.milestones {
            if milestone.progress > 100 {
                return Err(CoreError::ProgressOutOfRange {
                    milestone: milestone.id.to_string(),
                    value: milestone.progress,
                });
            }
        }

        self.features.iter().try_for_each(FeatureImpact::validate)
    }
}
