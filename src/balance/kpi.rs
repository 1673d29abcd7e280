//! Line quality metrics.
//!
//! Computes the standard assembly-line-balancing measurements from a
//! balanced line and the effective cycle time.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Theoretical minimum | `ceil(total_task_time / cycle_time)` |
//! | Line efficiency | `total_task_time / (cycle_time * active) * 100` |
//! | Smoothness index | `sqrt(sum((cycle_time - station_time)^2))` over active stations |
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 1.3

use serde::Serialize;

use crate::models::Line;

/// Post-balance line measurements.
#[derive(Debug, Clone, Serialize)]
pub struct LineKpi {
    /// Total task time over every registered task.
    pub total_task_time: f64,
    /// Number of active stations after balancing.
    pub active_stations: usize,
    /// Lower bound on the station count for this cycle time.
    pub theoretical_min: usize,
    /// Capacity actually used by assigned work, in percent.
    pub efficiency_pct: f64,
    /// RMS-style imbalance of station times against the cycle time.
    pub smoothness_index: f64,
}

impl LineKpi {
    /// Computes the measurements for a line at the given cycle time.
    pub fn calculate(line: &Line, cycle_time: f64) -> Self {
        let total_task_time = line.total_task_time();
        let active_stations = line.active_station_count();

        let theoretical_min = if cycle_time > 0.0 {
            (total_task_time / cycle_time).ceil() as usize
        } else {
            0
        };

        let capacity = cycle_time * active_stations as f64;
        let efficiency_pct = if capacity > 0.0 {
            total_task_time / capacity * 100.0
        } else {
            0.0
        };

        let smoothness_index = line
            .active_stations()
            .map(|s| (cycle_time - s.time()).powi(2))
            .sum::<f64>()
            .sqrt();

        Self {
            total_task_time,
            active_stations,
            theoretical_min,
            efficiency_pct,
            smoothness_index,
        }
    }
}
