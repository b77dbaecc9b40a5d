//! devplan core data models.
//!
//! Development tasks, milestones and feature ratings for the education
//! platform's delivery plan, plus the built-in plan fixtures.

#![warn(missing_docs)]

// Identities
mod id;

// Plan structure
mod phase;
mod task;
mod milestone;
mod feature;
mod plan;

mod error;
pub mod fixtures;

// Re-exports
pub use id::{TaskId, MilestoneId};
pub use phase::Phase;
pub use task::{DevelopmentTask, Category, Priority, TaskStatus};
pub use milestone::{Milestone, MilestoneStatus, MilestoneSummary};
pub use feature::{FeatureImpact, MIN_RATING, MAX_RATING};
pub use plan::Plan;
pub use error::{CoreError, Result};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
