//! Round-based dynamic balancing (shortest active station first).

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::heuristics::{select_best, SelectionRule};
use crate::models::{Line, StationId};

/// Balances a line by always feeding the least-loaded active station.
///
/// # Algorithm
///
/// Works in rounds. Within a round: pick, among active stations not
/// yet exhausted this round, the one with the smallest accumulated
/// time (ties go to the earliest station in the ascending-id
/// enumeration); if it has no valid candidates, exclude it for the
/// rest of the round; otherwise assign the rule's pick, which re-ranks
/// the station for the next iteration. The round ends when every
/// active station is exhausted.
///
/// After each round: if no free tasks remain the balance succeeded;
/// otherwise one more station is activated (ascending id) and a new
/// round starts. When every station is active and a round closes with
/// zero assignments, the algorithm fails with [`Error::Stalled`]
/// instead of spinning; that state means the caller skipped the
/// pre-balance validation (global work vs. capacity, paced-line
/// check).
///
/// Intended to run with [`Constraint::OnlyActiveStations`] installed,
/// so candidate queries only see the stations this algorithm has
/// opened.
///
/// [`Constraint::OnlyActiveStations`]: crate::models::Constraint::OnlyActiveStations
#[derive(Debug)]
pub struct ShortestStationBalancer {
    rule: Box<dyn SelectionRule>,
}

impl ShortestStationBalancer {
    /// Creates a balancer using the given selection rule.
    pub fn new(rule: Box<dyn SelectionRule>) -> Self {
        Self { rule }
    }

    /// Runs rounds until every task is assigned or no progress is
    /// possible.
    pub fn balance(&self, line: &mut Line) -> Result<()> {
        loop {
            let assigned = self.run_round(line)?;

            if line.free_tasks().next().is_none() {
                return Ok(());
            }

            let next_inactive = line.inactive_station_ids().next();
            match next_inactive {
                Some(station_id) => {
                    line.station_mut(station_id)
                        .ok_or(Error::UnknownStation(station_id))?
                        .activate();
                    debug!(station = station_id, "opened station for next round");
                }
                None if assigned == 0 => {
                    return Err(Error::Stalled {
                        free_tasks: line.free_tasks().count(),
                    });
                }
                None => {} // All stations open but the round progressed; go again.
            }
        }
    }

    /// Runs one round; returns the number of assignments it made.
    fn run_round(&self, line: &mut Line) -> Result<usize> {
        let mut exhausted: BTreeSet<StationId> = BTreeSet::new();
        let mut assigned = 0usize;

        loop {
            let target = line
                .active_stations()
                .filter(|s| !exhausted.contains(&s.id))
                .fold(None::<(StationId, f64)>, |best, station| match best {
                    Some((_, time)) if station.time() >= time => best,
                    _ => Some((station.id, station.time())),
                });
            let Some((station_id, _)) = target else { break };

            let next = {
                let candidates = line.valid_assignments(station_id);
                select_best(self.rule.as_ref(), &candidates, line)?.map(|t| t.id)
            };
            match next {
                Some(task_id) => {
                    line.assign(task_id, station_id)?;
                    assigned += 1;
                }
                None => {
                    // Out of candidates for this round only; the station
                    // stays active.
                    exhausted.insert(station_id);
                }
            }
        }

        Ok(assigned)
    }
}
