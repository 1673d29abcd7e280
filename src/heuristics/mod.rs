//! Selection rules for balancing.
//!
//! When several free tasks are eligible for the same station, a
//! selection rule decides which one is assigned next. Rules score each
//! candidate against the line and the lowest score wins.
//!
//! # Usage
//!
//! ```
//! use line_balance::heuristics::{self, LongestTaskTime};
//! use line_balance::models::{Line, Task};
//!
//! let mut line = Line::new("demo");
//! line.add_tasks([Task::new(1, 3.0), Task::new(2, 7.0)]).unwrap();
//!
//! let candidates: Vec<&Task> = line.tasks().collect();
//! let best = heuristics::select_best(&LongestTaskTime, &candidates, &line)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(best.id, 2);
//! ```
//!
//! # Score Convention
//! Lower scores select first. Selection scans candidates in input order
//! with a strict comparison, so the first-encountered candidate wins
//! ties; [`Line::valid_assignments`] always yields ascending task ids,
//! which makes tie-breaking well-defined at every call site.

mod rules;

pub use rules::{
    successor_count, successor_time, LeastSuccessors, LongestSuccessorTime, LongestTaskTime,
    MostSuccessors, ShortestSuccessorTime, ShortestTaskTime,
};

use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::models::{Line, Task};

/// Score returned by a selection rule. Lower = selected first.
pub type RuleScore = f64;

/// A rule for choosing the next task to assign.
///
/// # Score Convention
/// **Lower score = selected first.** Rules return smaller values for
/// tasks that should be placed earlier.
///
/// Evaluation is fallible: successor-weighted rules traverse the
/// precedence graph and fail with [`Error::CyclicPrecedence`] on a
/// cyclic input instead of recursing unboundedly.
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name, as accepted by [`by_name`].
    fn name(&self) -> &'static str;

    /// Scores a task given the line's current state.
    fn evaluate(&self, task: &Task, line: &Line) -> Result<RuleScore>;

    /// Human-readable description.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Whether evaluation traverses the precedence graph. Callers use
    /// this to run the acyclicity check up front instead of failing
    /// mid-balance.
    fn traverses_precedence(&self) -> bool {
        false
    }
}

/// Picks the best candidate under the rule.
///
/// Linear scan with strict `<`: the first-encountered candidate wins
/// ties. Returns `None` for an empty candidate sequence.
pub fn select_best<'a>(
    rule: &dyn SelectionRule,
    candidates: &[&'a Task],
    line: &Line,
) -> Result<Option<&'a Task>> {
    let mut best: Option<(&'a Task, RuleScore)> = None;
    for &task in candidates {
        let score = rule.evaluate(task, line)?;
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((task, score)),
        }
    }
    Ok(best.map(|(task, _)| task))
}

/// Resolves a rule by its registered name.
///
/// Accepts the canonical snake_case names plus the `spt`/`lpt`
/// shorthands, case-insensitively. Unknown names fail with
/// [`Error::UnknownHeuristic`], never a silent fallback.
pub fn by_name(name: &str) -> Result<Box<dyn SelectionRule>> {
    match name.to_ascii_lowercase().as_str() {
        "shortest_task_time" | "spt" => Ok(Box::new(ShortestTaskTime)),
        "longest_task_time" | "lpt" => Ok(Box::new(LongestTaskTime)),
        "most_successors" => Ok(Box::new(MostSuccessors)),
        "least_successors" => Ok(Box::new(LeastSuccessors)),
        "longest_successor_time" => Ok(Box::new(LongestSuccessorTime)),
        "shortest_successor_time" => Ok(Box::new(ShortestSuccessorTime)),
        _ => Err(Error::UnknownHeuristic(name.to_string())),
    }
}
