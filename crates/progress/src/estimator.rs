//! Completion time estimation.

use chrono::{Days, NaiveDate};
use devplan_core::{DevelopmentTask, Phase};

use crate::tracker::{ProgressTracker, ReportConfig};

/// Completion time estimator.
#[derive(Debug, Clone, Copy)]
pub struct CompletionEstimator {
    hours_per_day: f32,
}

impl CompletionEstimator {
    /// Create an estimator assuming `hours_per_day` working hours.
    pub fn new(hours_per_day: f32) -> Self {
        Self { hours_per_day }
    }

    /// Create an estimator from report settings.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.hours_per_day)
    }

    /// Hours still to spend on tasks that are not completed.
    ///
    /// Time already logged in `actual_hours` is subtracted from the estimate,
    /// never going below zero for a single task.
    pub fn remaining_hours<'a>(&self, tasks: impl IntoIterator<Item = &'a DevelopmentTask>) -> f32 {
        tasks
            .into_iter()
            .filter(|t| !t.is_completed())
            .map(|t| (t.estimated_hours - t.actual_hours.unwrap_or(0.0)).max(0.0))
            .sum()
    }

    /// Working days needed for `hours`, rounded up.
    pub fn days_for(&self, hours: f32) -> Option<u64> {
        if self.hours_per_day <= 0.0 {
            return None;
        }
        Some((hours / self.hours_per_day).ceil().max(0.0) as u64)
    }

    /// Estimate the date a phase completes when work starts on `from`.
    ///
    /// Returns `from` when nothing remains and `None` when no working hours
    /// are configured.
    pub fn estimate_phase<T: ProgressTracker>(
        &self,
        tracker: &T,
        phase: Phase,
        from: NaiveDate,
    ) -> Option<NaiveDate> {
        let remaining = self.remaining_hours(tracker.tasks_in_phase(phase));
        let days = self.days_for(remaining)?;
        from.checked_add_days(Days::new(days))
    }
}

impl Default for CompletionEstimator {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}
