//! Built-in selection rules.
//!
//! # Categories
//!
//! - **Duration-based**: `ShortestTaskTime`, `LongestTaskTime`
//! - **Successor-weighted**: `MostSuccessors`, `LeastSuccessors`,
//!   `LongestSuccessorTime`, `ShortestSuccessorTime`
//!
//! The successor-weighted rules are experimental: they rank tasks by
//! aggregates over the transitive successor set, which tends to pull
//! bottleneck tasks forward but has not been benchmarked against the
//! duration rules.
//!
//! # Score Convention
//! All rules return lower scores for tasks that should be placed first.

use std::collections::BTreeSet;

use super::{RuleScore, SelectionRule};
use crate::error::{Error, Result};
use crate::models::{Line, Task, TaskId};

// ======================== duration-based rules ========================

/// Prefers the candidate with the smallest duration.
#[derive(Debug, Clone, Copy)]
pub struct ShortestTaskTime;

impl SelectionRule for ShortestTaskTime {
    fn name(&self) -> &'static str {
        "shortest_task_time"
    }

    fn evaluate(&self, task: &Task, _line: &Line) -> Result<RuleScore> {
        Ok(task.duration())
    }

    fn description(&self) -> &'static str {
        "Shortest Task Time"
    }
}

/// Prefers the candidate with the largest duration.
///
/// The default policy: placing long tasks first tends to pack stations
/// tighter, the same intuition as LPT in parallel-machine scheduling.
#[derive(Debug, Clone, Copy)]
pub struct LongestTaskTime;

impl SelectionRule for LongestTaskTime {
    fn name(&self) -> &'static str {
        "longest_task_time"
    }

    fn evaluate(&self, task: &Task, _line: &Line) -> Result<RuleScore> {
        Ok(-task.duration())
    }

    fn description(&self) -> &'static str {
        "Longest Task Time"
    }
}

// ======================== successor aggregates ========================

/// Collects the transitive successors of `id` into `visited`.
///
/// A successor is any task listing `id` (directly or through other
/// successors) as a predecessor. Each successor is visited once; a
/// back edge to a task on the current traversal path means the
/// predecessor graph is cyclic and the walk fails instead of
/// recursing forever.
fn collect_successors(
    line: &Line,
    id: TaskId,
    visited: &mut BTreeSet<TaskId>,
    path: &mut BTreeSet<TaskId>,
) -> Result<()> {
    path.insert(id);
    for task in line.tasks() {
        if !task.has_predecessor(id) {
            continue;
        }
        if path.contains(&task.id) {
            return Err(Error::CyclicPrecedence(task.id));
        }
        if visited.insert(task.id) {
            collect_successors(line, task.id, visited, path)?;
        }
    }
    path.remove(&id);
    Ok(())
}

fn transitive_successors(line: &Line, id: TaskId) -> Result<BTreeSet<TaskId>> {
    let mut visited = BTreeSet::new();
    let mut path = BTreeSet::new();
    collect_successors(line, id, &mut visited, &mut path)?;
    Ok(visited)
}

/// Number of transitive successors of `task`, counting the task
/// itself. Each successor counts once, regardless of how many
/// precedence paths reach it.
pub fn successor_count(line: &Line, task: &Task) -> Result<usize> {
    Ok(1 + transitive_successors(line, task.id)?.len())
}

/// Cumulative duration of `task` plus all its transitive successors.
pub fn successor_time(line: &Line, task: &Task) -> Result<f64> {
    let successors = transitive_successors(line, task.id)?;
    let tail: f64 = successors
        .iter()
        .filter_map(|&id| line.task(id))
        .map(Task::duration)
        .sum();
    Ok(task.duration() + tail)
}

// ======================== successor-weighted rules ========================

/// Prefers the candidate with the most transitive successors.
#[derive(Debug, Clone, Copy)]
pub struct MostSuccessors;

impl SelectionRule for MostSuccessors {
    fn name(&self) -> &'static str {
        "most_successors"
    }

    fn evaluate(&self, task: &Task, line: &Line) -> Result<RuleScore> {
        Ok(-(successor_count(line, task)? as f64))
    }

    fn description(&self) -> &'static str {
        "Most Successors"
    }

    fn traverses_precedence(&self) -> bool {
        true
    }
}

/// Prefers the candidate with the fewest transitive successors.
#[derive(Debug, Clone, Copy)]
pub struct LeastSuccessors;

impl SelectionRule for LeastSuccessors {
    fn name(&self) -> &'static str {
        "least_successors"
    }

    fn evaluate(&self, task: &Task, line: &Line) -> Result<RuleScore> {
        Ok(successor_count(line, task)? as f64)
    }

    fn description(&self) -> &'static str {
        "Least Successors"
    }

    fn traverses_precedence(&self) -> bool {
        true
    }
}

/// Prefers the candidate whose successor chain carries the most work.
#[derive(Debug, Clone, Copy)]
pub struct LongestSuccessorTime;

impl SelectionRule for LongestSuccessorTime {
    fn name(&self) -> &'static str {
        "longest_successor_time"
    }

    fn evaluate(&self, task: &Task, line: &Line) -> Result<RuleScore> {
        Ok(-successor_time(line, task)?)
    }

    fn description(&self) -> &'static str {
        "Longest Successor Time"
    }

    fn traverses_precedence(&self) -> bool {
        true
    }
}

/// Prefers the candidate whose successor chain carries the least work.
#[derive(Debug, Clone, Copy)]
pub struct ShortestSuccessorTime;

impl SelectionRule for ShortestSuccessorTime {
    fn name(&self) -> &'static str {
        "shortest_successor_time"
    }

    fn evaluate(&self, task: &Task, line: &Line) -> Result<RuleScore> {
        Ok(successor_time(line, task)?)
    }

    fn description(&self) -> &'static str {
        "Shortest Successor Time"
    }

    fn traverses_precedence(&self) -> bool {
        true
    }
}
