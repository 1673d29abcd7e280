//! Assembly-line-balancing solver.
//!
//! Assigns indivisible, time-costed tasks to an ordered sequence of
//! work stations under precedence and capacity rules, using a
//! pluggable greedy selection heuristic. Not an exact solver: it
//! produces a feasible assignment, not a provably minimal station
//! count.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Station`, `Constraint`,
//!   `Line`
//! - **`heuristics`**: `SelectionRule` trait, built-in rules, and the
//!   name registry
//! - **`balance`**: The two balancing algorithms and `LineKpi`
//! - **`validation`**: Pre-balance checks (feasibility, paced-line
//!   adjustment, precedence cycles)
//! - **`input`** / **`report`**: Line-definition parser and text
//!   reporter used by the `balance` binary
//!
//! # Example
//!
//! ```
//! use line_balance::balance::SequentialBalancer;
//! use line_balance::heuristics::LongestTaskTime;
//! use line_balance::models::{Constraint, Line, Station, Task};
//! use line_balance::validation;
//!
//! let mut line = Line::new("example");
//! line.add_tasks([Task::new(1, 5.0), Task::new(2, 5.0), Task::new(3, 5.0)])?;
//! line.add_stations([Station::new(1), Station::new(2), Station::new(3)])?;
//!
//! let cycle_time = validation::validate(&line, 10.0)?;
//! line.add_constraints([
//!     Constraint::SingleTaskAssignment,
//!     Constraint::restricted_station_time(cycle_time),
//!     Constraint::PredecessorsStartToStart,
//! ]);
//!
//! SequentialBalancer::new(Box::new(LongestTaskTime)).balance(&mut line)?;
//! assert_eq!(line.active_station_count(), 2);
//! # Ok::<(), line_balance::Error>(())
//! ```
//!
//! # References
//!
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod balance;
pub mod error;
pub mod heuristics;
pub mod input;
pub mod logging;
pub mod models;
pub mod report;
pub mod validation;

pub use error::{Error, Result};
