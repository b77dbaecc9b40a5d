//! Tracker errors.

use devplan_core::TaskId;
use thiserror::Error;

/// Errors from dependency analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// Task dependencies form a cycle
    #[error("Circular dependency detected: {}", join_ids(.cycle))]
    DependencyCycle {
        /// Ids on the cycle, each depending on the next
        cycle: Vec<TaskId>,
    },
}

fn join_ids(ids: &[TaskId]) -> String {
    let mut parts: Vec<&str> = ids.iter().map(TaskId::as_str).collect();
    if let Some(first) = parts.first().copied() {
        parts.push(first);
    }
    parts.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_closes_loop() {
        let err = TrackerError::DependencyCycle {
            cycle: vec![TaskId::new("a"), TaskId::new("b")],
        };
        assert_eq!(err.to_string(), "Circular dependency detected: a -> b -> a");
    }
}
