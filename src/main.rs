//! `balance`: CLI front end for the line-balancing solver.
//!
//! Reads a line-definition file, validates it against the requested
//! cycle time, balances with the chosen heuristic and strategy, and
//! prints the report to stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use line_balance::balance::{SequentialBalancer, ShortestStationBalancer};
use line_balance::models::{Constraint, Line};
use line_balance::{heuristics, input, logging, report, validation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Fill stations one at a time, in ascending id order.
    Sequential,
    /// Feed the least-loaded active station, opening stations as needed.
    ShortestStation,
}

#[derive(Debug, Parser)]
#[command(name = "balance", version, about = "Balance an assembly line definition")]
struct Args {
    /// Line definition file.
    file: PathBuf,

    /// Target cycle time of the line.
    #[arg(long, default_value_t = 60.0)]
    cycle_time: f64,

    /// Selection heuristic (e.g. longest_task_time, shortest_task_time,
    /// most_successors).
    #[arg(long, default_value = "longest_task_time")]
    heuristic: String,

    /// Balancing strategy.
    #[arg(long, value_enum, default_value = "sequential")]
    strategy: Strategy,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();

    let rule = heuristics::by_name(&args.heuristic)?;

    let (tasks, stations) = input::parse_file(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let mut line = Line::new(args.file.display().to_string());
    line.add_tasks(tasks)?;
    line.add_stations(stations)?;

    let cycle_time = validation::validate(&line, args.cycle_time)?;
    if rule.traverses_precedence() {
        validation::check_precedence_acyclic(&line)?;
    }

    line.add_constraints([
        Constraint::SingleTaskAssignment,
        Constraint::restricted_station_time(cycle_time),
        Constraint::PredecessorsStartToStart,
    ]);

    info!(
        line = %line.name,
        tasks = line.task_count(),
        stations = line.station_count(),
        cycle_time,
        heuristic = rule.name(),
        "balancing"
    );

    match args.strategy {
        Strategy::Sequential => SequentialBalancer::new(rule).balance(&mut line)?,
        Strategy::ShortestStation => {
            line.add_constraint(Constraint::OnlyActiveStations);
            ShortestStationBalancer::new(rule).balance(&mut line)?;
        }
    }

    print!("{}", report::render(&line, cycle_time));
    Ok(())
}
