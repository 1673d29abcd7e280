//! Line model: the aggregate owning tasks, stations, and constraints.
//!
//! The line holds the task and station registries (keyed by id,
//! insertion-checked) and the active constraint list, and answers the
//! candidate queries the balancing algorithms are built on: "which
//! tasks may legally go on which station now?"
//!
//! Registries are `BTreeMap`s, so every traversal is in ascending-id
//! order by construction, so balancing output is reproducible for fixed
//! inputs and a fixed selection rule.

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use super::{Constraint, Station, StationId, Task, TaskId};
use crate::error::{Error, Result};

/// An assembly line with stations, tasks, and assignment constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Identifying label, opaque to the algorithms.
    pub name: String,
    tasks: BTreeMap<TaskId, Task>,
    stations: BTreeMap<StationId, Station>,
    constraints: Vec<Constraint>,
}

impl Line {
    /// Creates an empty line.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: BTreeMap::new(),
            stations: BTreeMap::new(),
            constraints: Vec::new(),
        }
    }

    // ======================== registries ========================

    /// Registers a task. Fails with [`Error::DuplicateTask`] if the id
    /// is already present.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        if self.tasks.contains_key(&task.id) {
            return Err(Error::DuplicateTask(task.id));
        }
        self.tasks.insert(task.id, task);
        Ok(())
    }

    /// Registers a batch of tasks, stopping at the first duplicate.
    pub fn add_tasks(&mut self, tasks: impl IntoIterator<Item = Task>) -> Result<()> {
        for task in tasks {
            self.add_task(task)?;
        }
        Ok(())
    }

    /// Registers a station. Fails with [`Error::DuplicateStation`] if
    /// the id is already present.
    pub fn add_station(&mut self, station: Station) -> Result<()> {
        if self.stations.contains_key(&station.id) {
            return Err(Error::DuplicateStation(station.id));
        }
        self.stations.insert(station.id, station);
        Ok(())
    }

    /// Registers a batch of stations, stopping at the first duplicate.
    pub fn add_stations(&mut self, stations: impl IntoIterator<Item = Station>) -> Result<()> {
        for station in stations {
            self.add_station(station)?;
        }
        Ok(())
    }

    /// Looks up a task by id.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Looks up a station by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Mutable station access, used by balancing algorithms to flip
    /// active flags.
    pub fn station_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.stations.get_mut(&id)
    }

    /// All tasks in ascending-id order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// All stations in ascending-id order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Number of registered tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of registered stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    // ======================== derived views ========================

    /// Active stations in ascending-id order.
    pub fn active_stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values().filter(|s| s.is_active())
    }

    /// Number of active stations.
    pub fn active_station_count(&self) -> usize {
        self.active_stations().count()
    }

    /// Inactive station ids in ascending order.
    pub fn inactive_station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stations
            .values()
            .filter(|s| !s.is_active())
            .map(|s| s.id)
    }

    /// Tasks without an assignment, ascending by id.
    pub fn free_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values().filter(|t| !t.is_assigned())
    }

    /// Tasks with an assignment, ascending by id.
    pub fn assigned_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values().filter(|t| t.is_assigned())
    }

    /// Total task time over every registered task.
    pub fn total_task_time(&self) -> f64 {
        self.tasks.values().map(Task::duration).sum()
    }

    /// Total station time over every registered station.
    pub fn total_station_time(&self) -> f64 {
        self.stations.values().map(Station::time).sum()
    }

    // ======================== constraints ========================

    /// Appends a constraint to the conjunction.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Appends several constraints.
    pub fn add_constraints(&mut self, constraints: impl IntoIterator<Item = Constraint>) {
        self.constraints.extend(constraints);
    }

    /// Replaces the first installed constraint of the same kind.
    ///
    /// Matching is by [`ConstraintKind`](super::ConstraintKind) tag,
    /// not instance identity.
    /// Fails with [`Error::ConstraintNotFound`] when no constraint of
    /// that kind is installed.
    pub fn replace_constraint(&mut self, constraint: Constraint) -> Result<()> {
        let kind = constraint.kind();
        match self.constraints.iter_mut().find(|c| c.kind() == kind) {
            Some(slot) => {
                *slot = constraint;
                Ok(())
            }
            None => Err(Error::ConstraintNotFound(kind)),
        }
    }

    /// Removes every constraint. Used between balancing experiments.
    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
    }

    /// The installed constraints, in installation order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    // ======================== candidate queries ========================

    /// Whether assigning the task to the station would satisfy every
    /// installed constraint. Unknown ids are never valid.
    pub fn valid_assignment(&self, task_id: TaskId, station_id: StationId) -> bool {
        let (Some(task), Some(station)) = (self.task(task_id), self.station(station_id)) else {
            return false;
        };
        self.constraints
            .iter()
            .all(|c| c.is_satisfied(task, station, self))
    }

    /// Every task that may legally go on the station right now, in
    /// ascending-id order. Selection rules rely on this ordering for
    /// well-defined tie-breaking.
    pub fn valid_assignments(&self, station_id: StationId) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|task| self.valid_assignment(task.id, station_id))
            .collect()
    }

    // ======================== assignment bookkeeping ========================

    /// Assigns a task to a station, updating both sides of the
    /// relation. Delegates to [`Station::assign_task`], which rolls
    /// back on task-side failure so no partial state is observable.
    pub fn assign(&mut self, task_id: TaskId, station_id: StationId) -> Result<()> {
        let task = self
            .tasks
            .get_mut(&task_id)
            .ok_or(Error::UnknownTask(task_id))?;
        let station = self
            .stations
            .get_mut(&station_id)
            .ok_or(Error::UnknownStation(station_id))?;
        station.assign_task(task)
    }

    /// Withdraws a task from its current station.
    pub fn withdraw(&mut self, task_id: TaskId) -> Result<()> {
        let station_id = self
            .tasks
            .get(&task_id)
            .ok_or(Error::UnknownTask(task_id))?
            .assignment()
            .ok_or(Error::NotAssigned(task_id))?;
        let station = self
            .stations
            .get_mut(&station_id)
            .ok_or(Error::UnknownStation(station_id))?;
        let task = self
            .tasks
            .get_mut(&task_id)
            .ok_or(Error::UnknownTask(task_id))?;
        station.withdraw_task(task)
    }

    /// Withdraws every task from every station, leaving active flags
    /// untouched. Used as the reset step between balancing attempts.
    pub fn unassign_all(&mut self) -> Result<()> {
        for station in self.stations.values_mut() {
            for entry in station.clear() {
                self.tasks
                    .get_mut(&entry.task_id)
                    .ok_or(Error::UnknownTask(entry.task_id))?
                    .withdraw()?;
            }
        }
        Ok(())
    }
}
