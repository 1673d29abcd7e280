//! Station model.
//!
//! A station is a place on the assembly line where tasks are performed.
//! It records the tasks it has accepted, in acceptance order, and an
//! explicit active flag controlled by the balancing algorithm.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{StationId, Task, TaskId};
use crate::error::{Error, Result};

/// A task accepted onto a station.
///
/// The duration is denormalized next to the id so the station can
/// compute its own time; task durations are fixed at construction, so
/// the copy cannot go stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationTask {
    /// Id of the accepted task.
    pub task_id: TaskId,
    /// The task's duration at acceptance time.
    pub duration: f64,
}

/// An ordered bucket of tasks on the line.
///
/// `active` is an explicit flag, distinct from "has tasks": the
/// round-based balancer opens stations before filling them, and the
/// sequential balancer marks a station active only after it accepted
/// work. It is never derived from occupancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Unique station identifier; ascending ids define line order.
    pub id: StationId,
    tasks: Vec<StationTask>,
    active: bool,
}

impl Station {
    /// Creates an empty, inactive station.
    pub fn new(id: StationId) -> Self {
        Self {
            id,
            tasks: Vec::new(),
            active: false,
        }
    }

    /// Whether the station is in use.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Marks the station as in use.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Marks the station as not in use.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Whether a task with this id is recorded on the station.
    pub fn holds(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.task_id == id)
    }

    /// Accepted tasks in the order they were accepted.
    pub fn tasks(&self) -> &[StationTask] {
        &self.tasks
    }

    /// Accepted task ids in acceptance order.
    pub fn task_ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.iter().map(|t| t.task_id)
    }

    /// Number of accepted tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Accepts a task onto this station.
    ///
    /// Fails with [`Error::DuplicateStationTask`] if the station already
    /// holds the id. Appends the task and records the back-reference via
    /// [`Task::assign`]; if the task side fails (already assigned
    /// elsewhere), the append is rolled back so no partially-applied
    /// assignment is observable.
    pub fn assign_task(&mut self, task: &mut Task) -> Result<()> {
        if self.holds(task.id) {
            return Err(Error::DuplicateStationTask {
                station: self.id,
                task: task.id,
            });
        }

        self.tasks.push(StationTask {
            task_id: task.id,
            duration: task.duration(),
        });
        if let Err(err) = task.assign(self.id) {
            self.tasks.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Removes a task from this station.
    ///
    /// Fails with [`Error::TaskNotFound`] if the station does not hold
    /// the task's id; otherwise removes it from the list and clears the
    /// back-reference via [`Task::withdraw`].
    pub fn withdraw_task(&mut self, task: &mut Task) -> Result<()> {
        let position = self
            .tasks
            .iter()
            .position(|t| t.task_id == task.id)
            .ok_or(Error::TaskNotFound {
                station: self.id,
                task: task.id,
            })?;

        task.withdraw()?;
        self.tasks.remove(position);
        Ok(())
    }

    /// Empties the station's task list, returning the removed entries.
    ///
    /// Back-references are NOT touched; this is the station side of a
    /// bulk reset; [`Line::unassign_all`](super::Line::unassign_all)
    /// withdraws the tasks themselves.
    pub(crate) fn clear(&mut self) -> Vec<StationTask> {
        std::mem::take(&mut self.tasks)
    }

    /// The station time: total duration of accepted tasks, recomputed
    /// on every call.
    pub fn time(&self) -> f64 {
        self.tasks.iter().map(|t| t.duration).sum()
    }

    /// Absolute difference between the given cycle time and the station
    /// time. Feeds the smoothness index.
    pub fn idle_time(&self, cycle_time: f64) -> f64 {
        (cycle_time - self.time()).abs()
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.tasks.iter().map(|t| t.task_id.to_string()).collect();
        write!(
            f,
            "Station {}:\tTaskTime {:.2}\tTasks {}",
            self.id,
            self.time(),
            ids.join(" ")
        )
    }
}
