//! Task model - a unit of development work in the platform plan.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use crate::error::CoreError;
use crate::id::TaskId;
use crate::phase::Phase;
use crate::Time;

/// A development task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentTask {
    /// Unique identifier
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Phase this task belongs to
    pub phase: Phase,

    /// Area of work
    pub category: Category,

    /// Priority
    pub priority: Priority,

    /// Current status
    pub status: TaskStatus,

    /// Person responsible, if assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Estimated effort in hours
    pub estimated_hours: f32,

    /// Effort actually spent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f32>,

    /// First time the task entered `in-progress`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Time>,

    /// First time the task entered `completed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Time>,

    /// Ids of tasks this one depends on (not validated)
    #[serde(default)]
    pub dependencies: Vec<TaskId>,

    /// Free-form labels
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl DevelopmentTask {
    /// Create a new `todo` task with no dependencies or tags.
    pub fn new(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        phase: Phase,
        category: Category,
        priority: Priority,
        estimated_hours: f32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            phase,
            category,
            priority,
            status: TaskStatus::Todo,
            assignee: None,
            estimated_hours,
            actual_hours: None,
            start_date: None,
            end_date: None,
            dependencies: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the dependency list.
    pub fn with_dependencies<I, T>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Set the tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Move to `status`, stamping the start/end date on the first entry into
    /// `in-progress`/`completed`. Dates are never cleared.
    pub fn transition(&mut self, status: TaskStatus, at: Time) {
        self.status = status;
        match status {
            TaskStatus::InProgress if self.start_date.is_none() => self.start_date = Some(at),
            TaskStatus::Completed if self.end_date.is_none() => self.end_date = Some(at),
            _ => {}
        }
    }

    /// Whether the task is completed.
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Area of work a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// User interface work
    Frontend,
    /// Server-side logic and APIs
    Backend,
    /// AI-assisted features
    Ai,
    /// Schema and data access
    Database,
    /// Test suites and QA
    Testing,
    /// Build and release
    Deployment,
}

impl Category {
    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend",
            Category::Ai => "ai",
            Category::Database => "database",
            Category::Testing => "testing",
            Category::Deployment => "deployment",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frontend" => Ok(Category::Frontend),
            "backend" => Ok(Category::Backend),
            "ai" => Ok(Category::Ai),
            "database" => Ok(Category::Database),
            "testing" => Ok(Category::Testing),
            "deployment" => Ok(Category::Deployment),
            _ => Err(CoreError::InvalidCategory(s.to_string())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// On the critical path
    High,
    /// Normal
    Medium,
    /// Can slip
    Low,
}

impl Priority {
    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(CoreError::InvalidPriority(s.to_string())),
        }
    }
}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started
    Todo,
    /// Being worked on
    InProgress,
    /// Under test
    Testing,
    /// Done
    Completed,
    /// Cannot proceed
    Blocked,
}

impl TaskStatus {
    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Testing => "testing",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "testing" => Ok(TaskStatus::Testing),
            "completed" => Ok(TaskStatus::Completed),
            "blocked" => Ok(TaskStatus::Blocked),
            _ => Err(CoreError::InvalidStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample() -> DevelopmentTask {
        DevelopmentTask::new("t1", "Task", Phase::Phase1, Category::Backend, Priority::High, 4.0)
    }

    #[test]
    fn test_transition_stamps_start_once() {
        let mut task = sample();
        let first = Utc::now();
        task.transition(TaskStatus::InProgress, first);
        task.transition(TaskStatus::Testing, first + Duration::hours(1));
        task.transition(TaskStatus::InProgress, first + Duration::hours(2));

        assert_eq!(task.start_date, Some(first));
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_transition_keeps_end_date_after_reopen() {
        let mut task = sample();
        let done = Utc::now();
        task.transition(TaskStatus::Completed, done);
        task.transition(TaskStatus::Todo, done + Duration::hours(1));

        assert_eq!(task.end_date, Some(done));
        assert!(!task.is_completed());
    }

    #[test]
    fn test_status_names() {
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"in-progress\"");
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert!("done".parse::<TaskStatus>().is_err());
        assert_eq!(serde_json::to_string(&Category::Ai).unwrap(), "\"ai\"");
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn test_task_json_field_names() {
        let task = sample().with_dependencies(["t0"]).with_tags(["security"]);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["estimatedHours"], 4.0);
        assert_eq!(json["dependencies"][0], "t0");
        assert!(json.get("startDate").is_none());
    }
}
