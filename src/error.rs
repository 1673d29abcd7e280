//! Crate error type and `Result` alias.
//!
//! A single `thiserror`-derived [`Error`] enum covers every fallible
//! path in the crate: registration, assignment, constraint lookup,
//! parsing, feasibility, heuristic lookup, precedence cycles, and the
//! round-based balancer's stall guard.

use crate::models::{ConstraintKind, StationId, TaskId};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for all line-balancing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying I/O failure (file access, reader errors).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line-definition input at a 1-based source line.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based source line number.
        line: usize,
        /// Human-readable description of the failure.
        message: String,
    },

    /// A task id was registered more than once.
    #[error("duplicate task id {0}")]
    DuplicateTask(TaskId),

    /// A station id was registered more than once.
    #[error("duplicate station id {0}")]
    DuplicateStation(StationId),

    /// Operation referenced a task id absent from the registry.
    #[error("unknown task id {0}")]
    UnknownTask(TaskId),

    /// Operation referenced a station id absent from the registry.
    #[error("unknown station id {0}")]
    UnknownStation(StationId),

    /// A withdraw targeted a task that holds no assignment.
    #[error("task {0} is not assigned")]
    NotAssigned(TaskId),

    /// A task already had a station assignment.
    #[error("task {task} is already assigned to station {station}")]
    AlreadyAssigned {
        /// The task being assigned.
        task: TaskId,
        /// The station it is already assigned to.
        station: StationId,
    },

    /// A station already holds the given task id.
    #[error("station {station} already holds task {task}")]
    DuplicateStationTask {
        /// The station.
        station: StationId,
        /// The task id already present.
        task: TaskId,
    },

    /// A station does not hold the task id being withdrawn.
    #[error("station {station} does not hold task {task}")]
    TaskNotFound {
        /// The station.
        station: StationId,
        /// The task id that was expected.
        task: TaskId,
    },

    /// No constraint of the requested kind was installed.
    #[error("no constraint of kind {0:?} installed")]
    ConstraintNotFound(ConstraintKind),

    /// Total work exceeds the available station capacity.
    #[error(
        "infeasible: {work} work units exceed capacity {capacity} \
         ({stations} stations * cycle time {cycle_time})"
    )]
    Infeasible {
        /// Total task duration.
        work: f64,
        /// Available capacity (`stations * cycle_time`).
        capacity: f64,
        /// Number of stations.
        stations: usize,
        /// Cycle time per station.
        cycle_time: f64,
    },

    /// The precedence graph contains a cycle reaching the named task.
    #[error("cyclic precedence involving task {0}")]
    CyclicPrecedence(TaskId),

    /// A selection rule was requested by an unknown name.
    #[error("unknown heuristic \"{0}\"")]
    UnknownHeuristic(String),

    /// The round-based balancer made no progress with free tasks left.
    #[error("balancing stalled with {free_tasks} free task(s) remaining")]
    Stalled {
        /// Number of tasks still unassigned when progress halted.
        free_tasks: usize,
    },
}
