//! Task ordering: the critical-path heuristic and dependency order.

use std::collections::{BTreeSet, HashMap};

use devplan_core::{DevelopmentTask, Priority, TaskId};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// A dependency naming a task that is not in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingDependency {
    /// Task declaring the dependency
    pub task: TaskId,
    /// Id that could not be found
    pub missing: TaskId,
}

/// High-priority tasks, earlier phases first, then fewer dependencies first.
///
/// This is an ordering heuristic, not a graph traversal: dependency edges are
/// only counted. Ties keep insertion order.
pub fn critical_path(tasks: &[DevelopmentTask]) -> Vec<&DevelopmentTask> {
    let mut path: Vec<_> = tasks
        .iter()
        .filter(|t| t.priority == Priority::High)
        .collect();

    path.sort_by(|a, b| {
        a.phase
            .cmp(&b.phase)
            .then_with(|| a.dependencies.len().cmp(&b.dependencies.len()))
    });

    path
}

/// Topological order over `dependencies` (every task after the tasks it
/// depends on). Among ready tasks insertion order wins. Dependencies on
/// unknown ids are ignored for ordering.
pub fn dependency_order(tasks: &[DevelopmentTask]) -> Result<Vec<&DevelopmentTask>, TrackerError> {
    let index = index_by_id(tasks);

    let mut indegree = vec![0usize; tasks.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];

    for (i, task) in tasks.iter().enumerate() {
        for dep in &task.dependencies {
            match index.get(dep) {
                Some(&d) => {
                    indegree[i] += 1;
                    dependents[d].push(i);
                }
                None => tracing::warn!("Task {} depends on unknown task {}", task.id, dep),
            }
        }
    }

    let mut ready: BTreeSet<usize> = (0..tasks.len()).filter(|&i| indegree[i] == 0).collect();
    let mut order = Vec::with_capacity(tasks.len());

    while let Some(i) = ready.pop_first() {
        order.push(&tasks[i]);
        for &j in &dependents[i] {
            indegree[j] -= 1;
            if indegree[j] == 0 {
                ready.insert(j);
            }
        }
    }

    if order.len() < tasks.len() {
        let remaining: BTreeSet<usize> = (0..tasks.len()).filter(|&i| indegree[i] > 0).collect();
        return Err(TrackerError::DependencyCycle {
            cycle: find_cycle(tasks, &index, &remaining),
        });
    }

    Ok(order)
}

/// Every (task, missing dependency) pair.
pub fn dangling_dependencies(tasks: &[DevelopmentTask]) -> Vec<DanglingDependency> {
    let index = index_by_id(tasks);

    tasks
        .iter()
        .flat_map(|task| {
            task.dependencies
                .iter()
                .filter(|dep| !index.contains_key(dep))
                .map(|dep| DanglingDependency {
                    task: task.id.clone(),
                    missing: dep.clone(),
                })
        })
        .collect()
}

fn index_by_id(tasks: &[DevelopmentTask]) -> HashMap<&TaskId, usize> {
    tasks.iter().enumerate().map(|(i, t)| (&t.id, i)).collect()
}

/// Walk dependency edges inside `remaining` until a task repeats.
///
/// Every task left over by the topological pass still has an unresolved
/// dependency inside `remaining`, so the walk always closes a loop.
fn find_cycle(
    tasks: &[DevelopmentTask],
    index: &HashMap<&TaskId, usize>,
    remaining: &BTreeSet<usize>,
) -> Vec<TaskId> {
    let Some(&start) = remaining.first() else {
        return Vec::new();
    };

    let mut path: Vec<usize> = Vec::new();
    let mut position: HashMap<usize, usize> = HashMap::new();
    let mut node = start;

    loop {
        if let Some(&pos) = position.get(&node) {
            return path[pos..].iter().map(|&i| tasks[i].id.clone()).collect();
        }
        position.insert(node, path.len());
        path.push(node);

        let next = tasks[node]
            .dependencies
            .iter()
            .filter_map(|dep| index.get(dep).copied())
            .find(|d| remaining.contains(d));

        match next {
            Some(n) => node = n,
            None => return path.iter().map(|&i| tasks[i].id.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devplan_core::{fixtures, Category, Phase};

    fn task(id: &str, phase: Phase, priority: Priority, deps: &[&str]) -> DevelopmentTask {
        DevelopmentTask::new(id, id, phase, Category::Backend, priority, 1.0)
            .with_dependencies(deps.iter().copied())
    }

    fn ids(tasks: &[&DevelopmentTask]) -> Vec<String> {
        tasks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn test_critical_path_only_high_priority() {
        let tasks = fixtures::phase1_tasks();
        let path = critical_path(&tasks);

        assert!(path.iter().all(|t| t.priority == Priority::High));
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn test_critical_path_orders_phase_then_dependency_count() {
        let tasks = vec![
            task("late", Phase::Phase2, Priority::High, &[]),
            task("blocked", Phase::Phase1, Priority::High, &["x", "y"]),
            task("low", Phase::Phase1, Priority::Low, &[]),
            task("free", Phase::Phase1, Priority::High, &[]),
            task("one", Phase::Phase1, Priority::High, &["x"]),
        ];

        let path = critical_path(&tasks);
        assert_eq!(ids(&path), vec!["free", "one", "blocked", "late"]);

        for pair in path.windows(2) {
            assert!(pair[0].phase <= pair[1].phase);
            if pair[0].phase == pair[1].phase {
                assert!(pair[0].dependencies.len() <= pair[1].dependencies.len());
            }
        }
    }

    #[test]
    fn test_critical_path_ties_keep_insertion_order() {
        let tasks = fixtures::phase1_tasks();
        let path = critical_path(&tasks);

        assert_eq!(
            ids(&path),
            vec![
                "p1-auth-validation",
                "p1-error-handling",
                "p1-database-setup",
                "p1-login-optimization",
                "p1-crud-operations",
                "p1-data-validation",
            ]
        );
    }

    #[test]
    fn test_dependency_order_respects_edges() {
        let tasks = fixtures::phase1_tasks();
        let order = dependency_order(&tasks).unwrap();
        assert_eq!(order.len(), tasks.len());

        let position: HashMap<&TaskId, usize> =
            order.iter().enumerate().map(|(i, t)| (&t.id, i)).collect();
        for task in &tasks {
            for dep in &task.dependencies {
                assert!(position[dep] < position[&task.id], "{} before {}", dep, task.id);
            }
        }
    }

    #[test]
    fn test_dependency_order_prefers_insertion_order() {
        let tasks = vec![
            task("b", Phase::Phase1, Priority::Low, &["a"]),
            task("a", Phase::Phase1, Priority::Low, &[]),
            task("c", Phase::Phase1, Priority::Low, &[]),
        ];

        let order = dependency_order(&tasks).unwrap();
        assert_eq!(ids(&order), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dependency_order_ignores_unknown_ids() {
        let tasks = vec![task("a", Phase::Phase1, Priority::Low, &["ghost"])];
        let order = dependency_order(&tasks).unwrap();
        assert_eq!(ids(&order), vec!["a"]);
    }

    #[test]
    fn test_dependency_cycle_detected() {
        let tasks = vec![
            task("root", Phase::Phase1, Priority::Low, &[]),
            task("a", Phase::Phase1, Priority::Low, &["root", "b"]),
            task("b", Phase::Phase1, Priority::Low, &["c"]),
            task("c", Phase::Phase1, Priority::Low, &["a"]),
            task("after", Phase::Phase1, Priority::Low, &["c"]),
        ];

        let err = dependency_order(&tasks).unwrap_err();
        let TrackerError::DependencyCycle { cycle } = err;
        let mut names: Vec<_> = cycle.iter().map(|id| id.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let tasks = vec![task("loop", Phase::Phase1, Priority::Low, &["loop"])];
        let err = dependency_order(&tasks).unwrap_err();
        assert_eq!(
            err,
            TrackerError::DependencyCycle { cycle: vec![TaskId::new("loop")] }
        );
    }

    #[test]
    fn test_dangling_dependencies() {
        let tasks = vec![
            task("a", Phase::Phase1, Priority::Low, &[]),
            task("b", Phase::Phase1, Priority::Low, &["a", "gone"]),
        ];

        assert_eq!(
            dangling_dependencies(&tasks),
            vec![DanglingDependency { task: TaskId::new("b"), missing: TaskId::new("gone") }]
        );
        assert!(dangling_dependencies(&fixtures::phase1_tasks()).is_empty());
    }
}
