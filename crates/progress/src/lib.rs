//! Progress tracking for the development plan.
//!
//! Task status, phase progress, critical path and progress reports.

#![warn(missing_docs)]

pub mod tracker;
pub mod dependency;
pub mod estimator;
mod error;

pub use tracker::{ProgressTracker, ProgressReport, ProgressOverview, ReportConfig, TaskTracker};
pub use dependency::{critical_path, dependency_order, dangling_dependencies, DanglingDependency};
pub use estimator::CompletionEstimator;
pub use error::TrackerError;
