//! Task model.
//!
//! A task is an indivisible, time-costed unit of work performed at a
//! station on the assembly line. Tasks carry their precedence inputs
//! (predecessor ids) and a back-reference to the station currently
//! holding them.
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 2

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Task identifier, unique within a line.
pub type TaskId = u32;

/// Station identifier, unique within a line. Ascending ids define the
/// station order along the line.
pub type StationId = u32;

/// An indivisible unit of work with a fixed duration.
///
/// The line registry owns every task; the `assignment` field is a
/// non-owning back-reference kept consistent with the station's task
/// list by [`Station::assign_task`](super::Station::assign_task).
///
/// Predecessor ids are stored as a set and always iterated in
/// ascending order, so traversals are reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    duration: f64,
    predecessors: BTreeSet<TaskId>,
    assignment: Option<StationId>,
}

impl Task {
    /// Creates a task with the given id and duration.
    pub fn new(id: TaskId, duration: f64) -> Self {
        Self {
            id,
            duration,
            predecessors: BTreeSet::new(),
            assignment: None,
        }
    }

    /// The task's completion time, fixed at construction.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether `id` is a direct predecessor of this task.
    pub fn has_predecessor(&self, id: TaskId) -> bool {
        self.predecessors.contains(&id)
    }

    /// Direct predecessor ids in ascending order.
    pub fn predecessors(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.predecessors.iter().copied()
    }

    /// Number of direct predecessors.
    pub fn predecessor_count(&self) -> usize {
        self.predecessors.len()
    }

    /// Adds a direct predecessor. Idempotent: re-adding a present id is
    /// a no-op, not an error.
    pub fn add_predecessor(&mut self, id: TaskId) {
        self.predecessors.insert(id);
    }

    /// Whether the task currently has a station assignment.
    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    /// The station currently holding this task, if any.
    pub fn assignment(&self) -> Option<StationId> {
        self.assignment
    }

    /// Records the station back-reference.
    ///
    /// Fails with [`Error::AlreadyAssigned`] if the task already has a
    /// station. This only updates the task side of the relation;
    /// callers must go through `Station::assign_task` so the station's
    /// task list stays consistent.
    pub fn assign(&mut self, station: StationId) -> Result<()> {
        if let Some(current) = self.assignment {
            return Err(Error::AlreadyAssigned {
                task: self.id,
                station: current,
            });
        }
        self.assignment = Some(station);
        Ok(())
    }

    /// Clears the station back-reference.
    ///
    /// Fails with [`Error::NotAssigned`] if the task has no assignment.
    pub fn withdraw(&mut self) -> Result<()> {
        if self.assignment.is_none() {
            return Err(Error::NotAssigned(self.id));
        }
        self.assignment = None;
        Ok(())
    }
}
