//! Error types for the plan data model.

use thiserror::Error;

/// Result alias for model construction and parsing.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building or parsing plan entities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A feature rating fell outside `[1, 10]`
    #[error("Rating '{field}' of feature '{feature}' is {value}, expected 1-10")]
    RatingOutOfRange {
        /// Feature name
        feature: String,
        /// Rating field name
        field: &'static str,
        /// Offending value
        value: u8,
    },

    /// A milestone's progress exceeds 100%
    #[error("Progress of milestone '{milestone}' is {value}, expected 0-100")]
    ProgressOutOfRange {
        /// Milestone id
        milestone: String,
        /// Offending value
        value: u8,
    },

    /// A task's estimate is not a positive number of hours
    #[error("Estimate of task '{task}' is {hours}h, expected a positive number")]
    InvalidEstimate {
        /// Task id
        task: String,
        /// Offending estimate
        hours: f32,
    },

    /// Two tasks share an id
    #[error("Duplicate task id: '{0}'")]
    DuplicateTaskId(String),

    /// Unknown phase name
    #[error("Invalid phase: '{0}'")]
    InvalidPhase(String),

    /// Unknown task status
    #[error("Invalid status: '{0}'")]
    InvalidStatus(String),

    /// Unknown priority
    #[error("Invalid priority: '{0}'")]
    InvalidPriority(String),

    /// Unknown category
    #[error("Invalid category: '{0}'")]
    InvalidCategory(String),
}
