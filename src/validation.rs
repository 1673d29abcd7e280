//! Pre-balance validation.
//!
//! Checks a line before a balancing algorithm runs:
//! - the paced-line precondition (no task longer than the cycle time),
//!   softly enforced by raising the effective cycle time;
//! - global feasibility (total work vs. stations x cycle time), a
//!   fatal error;
//! - precedence-graph acyclicity (DFS), required before the
//!   successor-weighted selection rules traverse the graph.
//!
//! The round-based balancer's termination argument depends on these
//! checks, so callers run [`validate`] first and balance with the
//! returned effective cycle time.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
//! (cycle detection via DFS)

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{Line, TaskId};

/// Applies the paced-line adjustment.
///
/// A task longer than the cycle time would be rejected by the capacity
/// constraint forever. Rather than failing, the cycle time is raised
/// to the worst offending duration and a warning is logged; the line
/// runs slower than requested but stays solvable.
pub fn effective_cycle_time(line: &Line, cycle_time: f64) -> f64 {
    let mut effective = cycle_time;
    for task in line.tasks() {
        if task.duration() > effective {
            warn!(
                task = task.id,
                task_time = task.duration(),
                cycle_time = effective,
                "cycle time bumped to task time"
            );
            effective = task.duration();
        }
    }
    effective
}

/// Checks that the line's total work fits its global capacity.
///
/// Fails with [`Error::Infeasible`] when
/// `total_task_time > station_count * cycle_time`; balancing must not
/// proceed in that case.
pub fn check_feasibility(line: &Line, cycle_time: f64) -> Result<()> {
    let work = line.total_task_time();
    let stations = line.station_count();
    let capacity = stations as f64 * cycle_time;

    if work > capacity {
        return Err(Error::Infeasible {
            work,
            capacity,
            stations,
            cycle_time,
        });
    }
    Ok(())
}

/// Checks that the precedence graph is acyclic.
///
/// DFS with an explicit recursion stack set: a back edge to a task on
/// the current path means a cycle, reported as
/// [`Error::CyclicPrecedence`] naming a task on it.
pub fn check_precedence_acyclic(line: &Line) -> Result<()> {
    // Adjacency: predecessor id -> direct successor ids.
    let mut successors: BTreeMap<TaskId, Vec<TaskId>> = BTreeMap::new();
    for task in line.tasks() {
        for pred in task.predecessors() {
            successors.entry(pred).or_default().push(task.id);
        }
    }

    let mut visited = BTreeSet::new();
    let mut on_path = BTreeSet::new();
    for task in line.tasks() {
        if !visited.contains(&task.id) {
            dfs(task.id, &successors, &mut visited, &mut on_path)?;
        }
    }
    Ok(())
}

fn dfs(
    node: TaskId,
    successors: &BTreeMap<TaskId, Vec<TaskId>>,
    visited: &mut BTreeSet<TaskId>,
    on_path: &mut BTreeSet<TaskId>,
) -> Result<()> {
    visited.insert(node);
    on_path.insert(node);

    if let Some(next) = successors.get(&node) {
        for &succ in next {
            if on_path.contains(&succ) {
                return Err(Error::CyclicPrecedence(succ));
            }
            if !visited.contains(&succ) {
                dfs(succ, successors, visited, on_path)?;
            }
        }
    }

    on_path.remove(&node);
    Ok(())
}

/// Runs the standard pre-balance checks.
///
/// Applies the paced-line adjustment, then verifies feasibility at the
/// adjusted cycle time. Returns the effective cycle time to install in
/// the capacity constraint.
pub fn validate(line: &Line, cycle_time: f64) -> Result<f64> {
    let effective = effective_cycle_time(line, cycle_time);
    check_feasibility(line, effective)?;
    Ok(effective)
}
