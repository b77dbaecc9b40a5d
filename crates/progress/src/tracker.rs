//! Progress tracking service.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use devplan_core::{
    fixtures, DevelopmentTask, Milestone, MilestoneSummary, Phase, Plan, TaskId, TaskStatus, Time,
};
use serde::{Deserialize, Serialize};

use crate::dependency::{self, DanglingDependency};
use crate::error::TrackerError;

/// Read-side progress queries consumed by the display layer.
pub trait ProgressTracker {
    /// Tasks in `phase`, in insertion order.
    fn tasks_in_phase(&self, phase: Phase) -> Vec<&DevelopmentTask>;

    /// Completed share of the phase's tasks, as a rounded percentage.
    fn phase_progress(&self, phase: Phase) -> u8;

    /// High-priority tasks in critical-path order.
    fn critical_path(&self) -> Vec<&DevelopmentTask>;

    /// Aggregate progress report.
    fn build_report(&self) -> ProgressReport;
}

/// Report settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// How many critical-path tasks a report lists
    pub critical_path_limit: usize,

    /// Working hours per day used for completion estimates
    pub hours_per_day: f32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            critical_path_limit: 5,
            hours_per_day: 8.0,
        }
    }
}

impl ReportConfig {
    /// Set the critical-path cut-off.
    pub fn with_critical_path_limit(mut self, limit: usize) -> Self {
        self.critical_path_limit = limit;
        self
    }

    /// Set working hours per day.
    pub fn with_hours_per_day(mut self, hours: f32) -> Self {
        self.hours_per_day = hours;
        self
    }
}

/// Aggregate progress at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    /// When the report was built
    pub generated_at: Time,

    /// Task counts
    pub overview: ProgressOverview,

    /// Progress percentage for every phase
    pub phases: BTreeMap<Phase, u8>,

    /// Milestone summaries
    pub milestones: Vec<MilestoneSummary>,

    /// Leading critical-path tasks
    pub critical_path: Vec<DevelopmentTask>,
}

/// Task counts across the whole plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOverview {
    /// All tasks
    pub total_tasks: usize,
    /// Tasks in `completed`
    pub completed_tasks: usize,
    /// Tasks in `in-progress`
    pub in_progress_tasks: usize,
    /// Tasks in `blocked`
    pub blocked_tasks: usize,
}

/// In-memory task and milestone tracker.
///
/// Task ids are unique: adding a task whose id is already tracked is skipped.
#[derive(Debug, Clone, Default)]
pub struct TaskTracker {
    tasks: Vec<DevelopmentTask>,
    milestones: Vec<Milestone>,
    config: ReportConfig,
}

impl TaskTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker holding the built-in phase 1 tasks and milestones.
    pub fn seeded() -> Self {
        let mut tracker = Self::new();
        tracker.seed_phase_tasks();
        tracker.seed_milestones();
        tracker
    }

    /// Create a tracker from a loaded plan.
    pub fn from_plan(plan: &Plan) -> Self {
        let mut tracker = Self::new();
        tracker.add_tasks(plan.tasks.iter().cloned());
        tracker.add_milestones(plan.milestones.iter().cloned());
        tracker
    }

    /// Replace the report settings.
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Report settings.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Append the built-in phase 1 tasks. Returns how many were added.
    pub fn seed_phase_tasks(&mut self) -> usize {
        let added = self.add_tasks(fixtures::phase1_tasks());
        tracing::debug!("Seeded {} phase 1 tasks", added);
        added
    }

    /// Append the built-in milestones. Returns how many were added.
    pub fn seed_milestones(&mut self) -> usize {
        let added = self.add_milestones(fixtures::milestones());
        tracing::debug!("Seeded {} milestones", added);
        added
    }

    /// Append tasks, skipping ids already tracked.
    pub fn add_tasks(&mut self, tasks: impl IntoIterator<Item = DevelopmentTask>) -> usize {
        let mut known: HashSet<TaskId> = self.tasks.iter().map(|t| t.id.clone()).collect();
        let before = self.tasks.len();

        for task in tasks {
            if known.insert(task.id.clone()) {
                self.tasks.push(task);
            } else {
                tracing::warn!("Skipping duplicate task {}", task.id);
            }
        }

        self.tasks.len() - before
    }

    /// Append milestones, skipping ids already tracked.
    pub fn add_milestones(&mut self, milestones: impl IntoIterator<Item = Milestone>) -> usize {
        let before = self.milestones.len();

        for milestone in milestones {
            if self.milestones.iter().any(|m| m.id == milestone.id) {
                tracing::warn!("Skipping duplicate milestone {}", milestone.id);
                continue;
            }
            self.milestones.push(milestone);
        }

        self.milestones.len() - before
    }

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> &[DevelopmentTask] {
        &self.tasks
    }

    /// All milestones, in insertion order.
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Look up a task.
    pub fn task(&self, id: &str) -> Option<&DevelopmentTask> {
        self.tasks.iter().find(|t| t.id.as_str() == id)
    }

    /// Tasks in a phase given by name; empty for an unknown phase.
    pub fn tasks_in_phase_str(&self, phase: &str) -> Vec<&DevelopmentTask> {
        match phase.parse::<Phase>() {
            Ok(phase) => self.tasks_in_phase(phase),
            Err(_) => Vec::new(),
        }
    }

    /// Progress of a phase given by name; 0 for an unknown phase.
    pub fn phase_progress_str(&self, phase: &str) -> u8 {
        phase
            .parse::<Phase>()
            .map(|phase| self.phase_progress(phase))
            .unwrap_or(0)
    }

    /// Set a task's status now. See [`TaskTracker::set_task_status_at`].
    pub fn set_task_status(&mut self, id: &str, status: TaskStatus) -> bool {
        self.set_task_status_at(id, status, Utc::now())
    }

    /// Set a task's status, stamping `at` as start/end date on the first
    /// entry into `in-progress`/`completed`.
    ///
    /// An unknown id is ignored and `false` is returned.
    pub fn set_task_status_at(&mut self, id: &str, status: TaskStatus, at: Time) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id.as_str() == id) else {
            tracing::debug!("Ignoring status update for unknown task {}", id);
            return false;
        };

        tracing::debug!("Task {}: {} -> {}", id, task.status, status);
        task.transition(status, at);
        true
    }

    /// Tasks ordered so each comes after its dependencies.
    pub fn dependency_order(&self) -> Result<Vec<&DevelopmentTask>, TrackerError> {
        dependency::dependency_order(&self.tasks)
    }

    /// Dependencies that name tasks not in the tracker.
    pub fn dangling_dependencies(&self) -> Vec<DanglingDependency> {
        dependency::dangling_dependencies(&self.tasks)
    }

    /// Task counts over the whole plan.
    pub fn overview(&self) -> ProgressOverview {
        let count = |status: TaskStatus| self.tasks.iter().filter(|t| t.status == status).count();

        ProgressOverview {
            total_tasks: self.tasks.len(),
            completed_tasks: count(TaskStatus::Completed),
            in_progress_tasks: count(TaskStatus::InProgress),
            blocked_tasks: count(TaskStatus::Blocked),
        }
    }

    /// Export tasks and milestones as a plan (features left empty).
    pub fn to_plan(&self) -> Plan {
        Plan {
            tasks: self.tasks.clone(),
            milestones: self.milestones.clone(),
            features: Vec::new(),
        }
    }
}

impl ProgressTracker for TaskTracker {
    fn tasks_in_phase(&self, phase: Phase) -> Vec<&DevelopmentTask> {
        self.tasks.iter().filter(|t| t.phase == phase).collect()
    }

    fn phase_progress(&self, phase: Phase) -> u8 {
        let tasks = self.tasks_in_phase(phase);
        if tasks.is_empty() {
            return 0;
        }

        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        ((completed as f64 / tasks.len() as f64) * 100.0).round() as u8
    }

    fn critical_path(&self) -> Vec<&DevelopmentTask> {
        dependency::critical_path(&self.tasks)
    }

    fn build_report(&self) -> ProgressReport {
        let phases = Phase::ALL
            .iter()
            .map(|&phase| (phase, self.phase_progress(phase)))
            .collect();

        ProgressReport {
            generated_at: Utc::now(),
            overview: self.overview(),
            phases,
            milestones: self.milestones.iter().map(Milestone::summary).collect(),
            critical_path: self
                .critical_path()
                .into_iter()
                .take(self.config.critical_path_limit)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use devplan_core::{Category, Priority};

    fn task(id: &str, phase: Phase, status: TaskStatus) -> DevelopmentTask {
        DevelopmentTask::new(id, id, phase, Category::Frontend, Priority::Medium, 2.0)
            .with_status(status)
    }

    #[test]
    fn test_seeded_tracker() {
        let tracker = TaskTracker::seeded();
        assert_eq!(tracker.tasks().len(), 10);
        assert_eq!(tracker.milestones().len(), 3);
        assert_eq!(tracker.tasks_in_phase(Phase::Phase1).len(), 10);
    }

    #[test]
    fn test_seeding_twice_does_not_duplicate() {
        let mut tracker = TaskTracker::seeded();
        assert_eq!(tracker.seed_phase_tasks(), 0);
        assert_eq!(tracker.seed_milestones(), 0);
        assert_eq!(tracker.tasks().len(), 10);
        assert_eq!(tracker.milestones().len(), 3);
    }

    #[test]
    fn test_tasks_in_phase_keeps_insertion_order() {
        let mut tracker = TaskTracker::new();
        tracker.add_tasks([
            task("b", Phase::Phase2, TaskStatus::Todo),
            task("a", Phase::Phase1, TaskStatus::Todo),
            task("c", Phase::Phase2, TaskStatus::Todo),
        ]);

        let ids: Vec<_> = tracker
            .tasks_in_phase(Phase::Phase2)
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_unknown_phase_is_empty() {
        let tracker = TaskTracker::seeded();
        assert!(tracker.tasks_in_phase_str("phase9").is_empty());
        assert_eq!(tracker.phase_progress_str("nope"), 0);
        assert_eq!(tracker.tasks_in_phase_str("phase1").len(), 10);
    }

    #[test]
    fn test_empty_phases_report_zero() {
        let tracker = TaskTracker::seeded();
        for phase in [Phase::Phase2, Phase::Phase3, Phase::Phase4, Phase::Phase5] {
            assert_eq!(tracker.phase_progress(phase), 0);
        }
    }

    #[test]
    fn test_phase_progress_rounds() {
        let mut tracker = TaskTracker::new();
        tracker.add_tasks([
            task("a", Phase::Phase3, TaskStatus::Completed),
            task("b", Phase::Phase3, TaskStatus::Testing),
            task("c", Phase::Phase3, TaskStatus::Todo),
            task("d", Phase::Phase4, TaskStatus::Completed),
            task("e", Phase::Phase4, TaskStatus::Completed),
            task("f", Phase::Phase4, TaskStatus::Todo),
        ]);

        // 1/3 -> 33, 2/3 -> 67
        assert_eq!(tracker.phase_progress(Phase::Phase3), 33);
        assert_eq!(tracker.phase_progress(Phase::Phase4), 67);
    }

    #[test]
    fn test_phase_progress_matches_formula_on_seed() {
        let mut tracker = TaskTracker::seeded();
        for id in ["p1-auth-validation", "p1-database-setup", "p1-error-handling"] {
            assert!(tracker.set_task_status(id, TaskStatus::Completed));
        }

        for phase in Phase::ALL {
            let tasks = tracker.tasks_in_phase(phase);
            let expected = if tasks.is_empty() {
                0
            } else {
                let done = tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
                (100.0 * done as f64 / tasks.len() as f64).round() as u8
            };
            assert_eq!(tracker.phase_progress(phase), expected);
        }
        assert_eq!(tracker.phase_progress(Phase::Phase1), 30);
    }

    #[test]
    fn test_start_date_set_once() {
        let mut tracker = TaskTracker::seeded();
        let t0 = Utc::now();

        tracker.set_task_status_at("p1-profile-edit", TaskStatus::InProgress, t0);
        tracker.set_task_status_at("p1-profile-edit", TaskStatus::InProgress, t0 + Duration::hours(1));
        tracker.set_task_status_at("p1-profile-edit", TaskStatus::Blocked, t0 + Duration::hours(2));

        let task = tracker.task("p1-profile-edit").unwrap();
        assert_eq!(task.start_date, Some(t0));
        assert_eq!(task.status, TaskStatus::Blocked);
        assert!(task.end_date.is_none());
    }

    #[test]
    fn test_end_date_set_once() {
        let mut tracker = TaskTracker::seeded();
        let t0 = Utc::now();

        tracker.set_task_status_at("p1-password-reset", TaskStatus::Completed, t0);
        tracker.set_task_status_at("p1-password-reset", TaskStatus::Completed, t0 + Duration::days(1));
        assert_eq!(tracker.task("p1-password-reset").unwrap().end_date, Some(t0));

        // Reopening keeps the end date.
        tracker.set_task_status_at("p1-password-reset", TaskStatus::Testing, t0 + Duration::days(2));
        let task = tracker.task("p1-password-reset").unwrap();
        assert_eq!(task.status, TaskStatus::Testing);
        assert_eq!(task.end_date, Some(t0));
    }

    #[test]
    fn test_unknown_task_update_is_noop() {
        let mut tracker = TaskTracker::seeded();
        let before = tracker.tasks().to_vec();

        assert!(!tracker.set_task_status("nonexistent-id", TaskStatus::Completed));
        assert_eq!(tracker.tasks(), before.as_slice());
    }

    #[test]
    fn test_report_overview_counts() {
        let mut tracker = TaskTracker::seeded();
        tracker.add_tasks([task("p2-x", Phase::Phase2, TaskStatus::Todo)]);
        tracker.set_task_status("p1-auth-validation", TaskStatus::Completed);
        tracker.set_task_status("p1-login-optimization", TaskStatus::InProgress);
        tracker.set_task_status("p1-profile-edit", TaskStatus::Blocked);

        let report = tracker.build_report();
        let per_phase: usize = Phase::ALL.iter().map(|&p| tracker.tasks_in_phase(p).len()).sum();

        assert_eq!(report.overview.total_tasks, per_phase);
        assert_eq!(report.overview.total_tasks, 11);
        assert_eq!(report.overview.completed_tasks, 1);
        assert_eq!(report.overview.in_progress_tasks, 1);
        assert_eq!(report.overview.blocked_tasks, 1);
        assert_eq!(report.phases.len(), 5);
        assert_eq!(report.phases[&Phase::Phase1], 10);
        assert_eq!(report.phases[&Phase::Phase2], 0);
    }

    #[test]
    fn test_report_milestones_and_critical_path() {
        let tracker = TaskTracker::seeded();
        let report = tracker.build_report();

        assert_eq!(report.milestones.len(), 3);
        assert_eq!(report.milestones[0].title, "基础平台稳定");
        assert_eq!(report.milestones[0].progress, 0);

        assert_eq!(report.critical_path.len(), 5);
        assert_eq!(report.critical_path[0].id.as_str(), "p1-auth-validation");
        assert!(report.critical_path.iter().all(|t| t.priority == Priority::High));
    }

    #[test]
    fn test_report_respects_critical_path_limit() {
        let tracker = TaskTracker::seeded()
            .with_config(ReportConfig::default().with_critical_path_limit(2));
        assert_eq!(tracker.build_report().critical_path.len(), 2);
    }

    #[test]
    fn test_report_json_shape() {
        let report = TaskTracker::seeded().build_report();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["overview"]["totalTasks"], 10);
        assert_eq!(json["phases"]["phase1"], 0);
        assert_eq!(json["milestones"][1]["targetDate"], "2024-05-01");
        assert!(json["criticalPath"].is_array());
    }

    #[test]
    fn test_from_plan_round_trip() {
        let mut tracker = TaskTracker::seeded();
        tracker.set_task_status("p1-crud-operations", TaskStatus::Completed);

        let restored = TaskTracker::from_plan(&tracker.to_plan());
        assert_eq!(restored.tasks(), tracker.tasks());
        assert_eq!(restored.milestones(), tracker.milestones());
    }
}
