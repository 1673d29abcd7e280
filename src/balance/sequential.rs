//! Sequential (first-fit by station id) balancing.

use tracing::debug;

use crate::error::{Error, Result};
use crate::heuristics::{select_best, SelectionRule};
use crate::models::{Line, StationId};

/// Balances a line station by station, in ascending id order.
///
/// # Algorithm
///
/// For each station: repeatedly collect the free tasks that satisfy
/// every constraint for this station, let the rule pick one, assign
/// it, and recompute; move on when no candidates remain. A station
/// that accepted at least one task is marked active before the next
/// station is considered: station 1 is filled to capacity (or
/// candidate exhaustion) before station 2 is touched.
///
/// # Example
///
/// ```
/// use line_balance::balance::SequentialBalancer;
/// use line_balance::heuristics::LongestTaskTime;
/// use line_balance::models::{Constraint, Line, Station, Task};
///
/// let mut line = Line::new("demo");
/// line.add_tasks([Task::new(1, 5.0), Task::new(2, 5.0)]).unwrap();
/// line.add_stations([Station::new(1), Station::new(2)]).unwrap();
/// line.add_constraints([
///     Constraint::SingleTaskAssignment,
///     Constraint::restricted_station_time(10.0),
/// ]);
///
/// SequentialBalancer::new(Box::new(LongestTaskTime))
///     .balance(&mut line)
///     .unwrap();
/// assert_eq!(line.station(1).unwrap().time(), 10.0);
/// ```
#[derive(Debug)]
pub struct SequentialBalancer {
    rule: Box<dyn SelectionRule>,
}

impl SequentialBalancer {
    /// Creates a balancer using the given selection rule.
    pub fn new(rule: Box<dyn SelectionRule>) -> Self {
        Self { rule }
    }

    /// Runs the balancing pass to completion.
    ///
    /// Terminates when every station has been visited; tasks that no
    /// station could legally accept remain free. Propagates assignment
    /// errors; validity filtering should preclude them, but
    /// `Station::assign_task` enforces its invariants independently.
    pub fn balance(&self, line: &mut Line) -> Result<()> {
        let station_ids: Vec<StationId> = line.stations().map(|s| s.id).collect();

        for station_id in station_ids {
            let mut accepted = 0usize;
            loop {
                let next = {
                    let candidates = line.valid_assignments(station_id);
                    select_best(self.rule.as_ref(), &candidates, line)?.map(|t| t.id)
                };
                let Some(task_id) = next else { break };

                line.assign(task_id, station_id)?;
                accepted += 1;
            }

            if accepted > 0 {
                line.station_mut(station_id)
                    .ok_or(Error::UnknownStation(station_id))?
                    .activate();
                debug!(
                    station = station_id,
                    tasks = accepted,
                    rule = self.rule.name(),
                    "station filled"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{LongestTaskTime, ShortestTaskTime};
    use crate::models::{Constraint, Station, Task, TaskId};

    fn line(tasks: Vec<Task>, stations: u32, cycle_time: f64) -> Line {
        let mut line = Line::new("sequential");
        line.add_tasks(tasks).unwrap();
        line.add_stations((1..=stations).map(Station::new)).unwrap();
        line.add_constraints([
            Constraint::SingleTaskAssignment,
            Constraint::restricted_station_time(cycle_time),
            Constraint::PredecessorsStartToStart,
        ]);
        line
    }

    fn station_tasks(line: &Line, id: u32) -> Vec<TaskId> {
        line.station(id).unwrap().task_ids().collect()
    }

    #[test]
    fn test_three_equal_tasks() {
        // Durations 5/5/5, cycle 10: station 1 takes two, station 2
        // takes the third, station 3 stays inactive.
        let mut line = line(
            vec![Task::new(1, 5.0), Task::new(2, 5.0), Task::new(3, 5.0)],
            3,
            10.0,
        );
        SequentialBalancer::new(Box::new(LongestTaskTime))
            .balance(&mut line)
            .unwrap();

        assert_eq!(station_tasks(&line, 1), vec![1, 2]);
        assert_eq!(line.station(1).unwrap().time(), 10.0);
        assert_eq!(station_tasks(&line, 2), vec![3]);
        assert_eq!(line.station(2).unwrap().time(), 5.0);

        assert!(line.station(1).unwrap().is_active());
        assert!(line.station(2).unwrap().is_active());
        assert!(!line.station(3).unwrap().is_active());
    }

    #[test]
    fn test_precedence_holds_task_back() {
        // Task 2 depends on task 1: both land on station 1 (6 + 4 = 10),
        // and task 1 is accepted first.
        let mut dependent = Task::new(2, 4.0);
        dependent.add_predecessor(1);
        let mut line = line(vec![Task::new(1, 6.0), dependent], 2, 10.0);

        SequentialBalancer::new(Box::new(LongestTaskTime))
            .balance(&mut line)
            .unwrap();

        assert_eq!(station_tasks(&line, 1), vec![1, 2]);
        assert!(line.free_tasks().next().is_none());
    }

    #[test]
    fn test_longest_first_ordering() {
        let mut line = line(
            vec![Task::new(1, 2.0), Task::new(2, 8.0), Task::new(3, 1.0)],
            2,
            10.0,
        );
        SequentialBalancer::new(Box::new(LongestTaskTime))
            .balance(&mut line)
            .unwrap();

        // 8 first, then 2 fills to 10, then 1 spills to station 2.
        assert_eq!(station_tasks(&line, 1), vec![2, 1]);
        assert_eq!(station_tasks(&line, 2), vec![3]);
    }

    #[test]
    fn test_shortest_first_ordering() {
        let mut line = line(
            vec![Task::new(1, 2.0), Task::new(2, 8.0), Task::new(3, 1.0)],
            2,
            10.0,
        );
        SequentialBalancer::new(Box::new(ShortestTaskTime))
            .balance(&mut line)
            .unwrap();

        // 1, then 2, then 8 no longer fits station 1 (11 > 10).
        assert_eq!(station_tasks(&line, 1), vec![3, 1]);
        assert_eq!(station_tasks(&line, 2), vec![2]);
    }

    #[test]
    fn test_oversized_task_stays_free() {
        // Without the pacing adjustment a 15.0 task can never pass the
        // capacity constraint.
        let mut line = line(vec![Task::new(1, 15.0)], 2, 10.0);
        SequentialBalancer::new(Box::new(LongestTaskTime))
            .balance(&mut line)
            .unwrap();

        let free: Vec<TaskId> = line.free_tasks().map(|t| t.id).collect();
        assert_eq!(free, vec![1]);
        assert_eq!(line.active_station_count(), 0);
    }

    #[test]
    fn test_pacing_adjustment_makes_task_assignable() {
        // Scenario: a 15.0 task under requested cycle time 10. After
        // the paced-line adjustment the capacity constraint carries
        // 15.0 and the task lands.
        let mut line = Line::new("paced");
        line.add_tasks([Task::new(1, 15.0), Task::new(2, 5.0)]).unwrap();
        line.add_stations([Station::new(1), Station::new(2)]).unwrap();

        let cycle_time = crate::validation::validate(&line, 10.0).unwrap();
        assert_eq!(cycle_time, 15.0);
        line.add_constraints([
            Constraint::SingleTaskAssignment,
            Constraint::restricted_station_time(cycle_time),
        ]);

        SequentialBalancer::new(Box::new(LongestTaskTime))
            .balance(&mut line)
            .unwrap();
        assert_eq!(line.task(1).unwrap().assignment(), Some(1));
        assert!(line.free_tasks().next().is_none());
    }

    #[test]
    fn test_invariants_after_balance() {
        // Larger instance: every active station respects the capacity
        // and every assigned task's predecessors are assigned.
        let mut t3 = Task::new(3, 4.0);
        t3.add_predecessor(1);
        let mut t5 = Task::new(5, 6.0);
        t5.add_predecessor(2);
        t5.add_predecessor(3);
        let mut t6 = Task::new(6, 2.0);
        t6.add_predecessor(5);
        let mut line = line(
            vec![
                Task::new(1, 3.0),
                Task::new(2, 7.0),
                t3,
                Task::new(4, 9.0),
                t5,
                t6,
            ],
            4,
            10.0,
        );
        SequentialBalancer::new(Box::new(LongestTaskTime))
            .balance(&mut line)
            .unwrap();

        assert!(line.free_tasks().next().is_none());
        for station in line.active_stations() {
            assert!(station.time() <= 10.0);
        }
        for task in line.assigned_tasks() {
            for pred in task.predecessors() {
                assert!(line.task(pred).unwrap().is_assigned());
            }
        }
    }

    #[test]
    fn test_deterministic_mapping() {
        let tasks = || {
            vec![
                Task::new(1, 3.0),
                Task::new(2, 7.0),
                Task::new(3, 4.0),
                Task::new(4, 6.0),
                Task::new(5, 5.0),
            ]
        };
        let balancer = SequentialBalancer::new(Box::new(LongestTaskTime));

        let mut first = line(tasks(), 3, 10.0);
        balancer.balance(&mut first).unwrap();
        let mut second = line(tasks(), 3, 10.0);
        balancer.balance(&mut second).unwrap();

        let mapping = |l: &Line| -> Vec<(TaskId, Option<u32>)> {
            l.tasks().map(|t| (t.id, t.assignment())).collect()
        };
        assert_eq!(mapping(&first), mapping(&second));
    }

    #[test]
    fn test_station_time_sum_matches_assigned_work() {
        let mut line = line(
            vec![Task::new(1, 3.0), Task::new(2, 7.0), Task::new(3, 4.0)],
            2,
            10.0,
        );
        SequentialBalancer::new(Box::new(LongestTaskTime))
            .balance(&mut line)
            .unwrap();

        let assigned: f64 = line.assigned_tasks().map(|t| t.duration()).sum();
        assert_eq!(line.total_station_time(), assigned);
    }

    #[test]
    fn test_rebalance_after_reset() {
        let mut line = line(
            vec![Task::new(1, 5.0), Task::new(2, 5.0), Task::new(3, 5.0)],
            3,
            10.0,
        );
        let balancer = SequentialBalancer::new(Box::new(LongestTaskTime));
        balancer.balance(&mut line).unwrap();

        line.unassign_all().unwrap();
        balancer.balance(&mut line).unwrap();

        assert_eq!(station_tasks(&line, 1), vec![1, 2]);
        assert_eq!(station_tasks(&line, 2), vec![3]);
    }
}
