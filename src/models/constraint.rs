//! Assignment constraints.
//!
//! Defines the predicates a task-to-station assignment must satisfy.
//! A line's constraint list is evaluated as a strict conjunction and
//! short-circuits on the first failing predicate.
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 2.2

use serde::{Deserialize, Serialize};

use super::{Line, Station, Task};

/// An assignment predicate.
///
/// Constraints are pure: evaluation has no side effects, so the
/// short-circuiting conjunction in [`Line::valid_assignment`] is an
/// optimization, not a behavior change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Constraint {
    /// The target station must be active. Only installed by algorithms
    /// that gate assignment to pre-opened stations.
    OnlyActiveStations,

    /// The task must not already be assigned to a station.
    SingleTaskAssignment,

    /// The task must fit into the station's remaining capacity.
    /// All stations normally share one capacity equal to the effective
    /// cycle time.
    RestrictedStationTime { capacity: f64 },

    /// Every predecessor of the task must already be assigned, to any
    /// station.
    PredecessorsStartToStart,
}

/// Discriminant tag for [`Constraint`] variants.
///
/// [`Line::replace_constraint`] matches on the tag rather than on
/// instance identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    OnlyActiveStations,
    SingleTaskAssignment,
    RestrictedStationTime,
    PredecessorsStartToStart,
}

impl Constraint {
    /// Creates the capacity constraint for the given cycle time.
    pub fn restricted_station_time(capacity: f64) -> Self {
        Self::RestrictedStationTime { capacity }
    }

    /// The variant's tag.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::OnlyActiveStations => ConstraintKind::OnlyActiveStations,
            Self::SingleTaskAssignment => ConstraintKind::SingleTaskAssignment,
            Self::RestrictedStationTime { .. } => ConstraintKind::RestrictedStationTime,
            Self::PredecessorsStartToStart => ConstraintKind::PredecessorsStartToStart,
        }
    }

    /// Whether assigning `task` to `station` would satisfy this
    /// constraint, given the line's current state.
    pub fn is_satisfied(&self, task: &Task, station: &Station, line: &Line) -> bool {
        match self {
            Self::OnlyActiveStations => station.is_active(),
            Self::SingleTaskAssignment => !task.is_assigned(),
            Self::RestrictedStationTime { capacity } => {
                task.duration() + station.time() <= *capacity
            }
            Self::PredecessorsStartToStart => task
                .predecessors()
                .all(|id| line.task(id).is_some_and(Task::is_assigned)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_with(tasks: Vec<Task>, stations: Vec<Station>) -> Line {
        let mut line = Line::new("constraints");
        line.add_tasks(tasks).unwrap();
        line.add_stations(stations).unwrap();
        line
    }

    #[test]
    fn test_only_active_stations() {
        let line = line_with(vec![Task::new(1, 5.0)], vec![Station::new(1)]);
        let task = Task::new(1, 5.0);
        let mut station = Station::new(1);

        let constraint = Constraint::OnlyActiveStations;
        assert!(!constraint.is_satisfied(&task, &station, &line));

        station.activate();
        assert!(constraint.is_satisfied(&task, &station, &line));
    }

    #[test]
    fn test_single_task_assignment() {
        let line = line_with(vec![], vec![]);
        let mut task = Task::new(1, 5.0);
        let station = Station::new(1);

        let constraint = Constraint::SingleTaskAssignment;
        assert!(constraint.is_satisfied(&task, &station, &line));

        task.assign(2).unwrap();
        assert!(!constraint.is_satisfied(&task, &station, &line));
    }

    #[test]
    fn test_restricted_station_time() {
        let line = line_with(vec![], vec![]);
        let task = Task::new(1, 5.0);
        let mut station = Station::new(1);
        let mut filler = Task::new(2, 6.0);
        station.assign_task(&mut filler).unwrap();

        // 5 + 6 <= 10 fails, 5 + 6 <= 11 holds exactly.
        assert!(!Constraint::restricted_station_time(10.0).is_satisfied(&task, &station, &line));
        assert!(Constraint::restricted_station_time(11.0).is_satisfied(&task, &station, &line));
    }

    #[test]
    fn test_predecessors_start_to_start() {
        let mut dependent = Task::new(2, 4.0);
        dependent.add_predecessor(1);
        let line = line_with(
            vec![Task::new(1, 6.0), dependent.clone()],
            vec![Station::new(1), Station::new(2)],
        );
        let station = Station::new(1);

        let constraint = Constraint::PredecessorsStartToStart;
        assert!(!constraint.is_satisfied(&dependent, &station, &line));

        // Assign the predecessor anywhere; the dependent becomes eligible.
        let mut line = line;
        line.assign(1, 1).unwrap();
        let dependent = line.task(2).unwrap().clone();
        assert!(constraint.is_satisfied(&dependent, &station, &line));
    }

    #[test]
    fn test_predecessor_missing_from_registry_blocks() {
        // A predecessor id the line does not know is treated as
        // unassigned, so the task stays blocked.
        let mut task = Task::new(2, 4.0);
        task.add_predecessor(99);
        let line = line_with(vec![task.clone()], vec![Station::new(1)]);
        let station = Station::new(1);

        assert!(!Constraint::PredecessorsStartToStart.is_satisfied(&task, &station, &line));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(
            Constraint::OnlyActiveStations.kind(),
            ConstraintKind::OnlyActiveStations
        );
        assert_eq!(
            Constraint::SingleTaskAssignment.kind(),
            ConstraintKind::SingleTaskAssignment
        );
        assert_eq!(
            Constraint::restricted_station_time(1.0).kind(),
            ConstraintKind::RestrictedStationTime
        );
        assert_eq!(
            Constraint::PredecessorsStartToStart.kind(),
            ConstraintKind::PredecessorsStartToStart
        );
    }
}
