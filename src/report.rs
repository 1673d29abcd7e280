//! Text report for a balanced line.
//!
//! Renders the post-balance measurements, the tasks that could not be
//! placed, the active stations with their loads, and the task vector
//! (station id per assigned task, in task-id order). Rendering is
//! I/O-free; the binary decides where the text goes.

use std::fmt::Write;

use crate::balance::LineKpi;
use crate::models::Line;

/// Renders the full post-balance report.
pub fn render(line: &Line, cycle_time: f64) -> String {
    let mut out = String::new();
    write_measurements(&mut out, line, cycle_time);
    write_free_tasks(&mut out, line);
    write_stations(&mut out, line);
    write_task_vector(&mut out, line);
    out
}

fn write_measurements(out: &mut String, line: &Line, cycle_time: f64) {
    let kpi = LineKpi::calculate(line, cycle_time);
    let _ = writeln!(out, "{}", line.name);
    let _ = writeln!(out, "cycle_time={cycle_time:.2}");
    let _ = writeln!(out, "theoretical_min={}", kpi.theoretical_min);
    let _ = writeln!(out, "measured_min={}", kpi.active_stations);
    let _ = writeln!(out, "line_efficiency={:.1}%", kpi.efficiency_pct);
    let _ = writeln!(out, "smoothness_index={:.1}", kpi.smoothness_index);
}

fn write_free_tasks(out: &mut String, line: &Line) {
    let ids: Vec<String> = line.free_tasks().map(|t| t.id.to_string()).collect();
    let _ = writeln!(out, "free_tasks={}", ids.join(" "));
}

fn write_stations(out: &mut String, line: &Line) {
    for station in line.active_stations() {
        let _ = writeln!(out, "{station}");
    }
}

fn write_task_vector(out: &mut String, line: &Line) {
    let stations: Vec<String> = line
        .assigned_tasks()
        .filter_map(|t| t.assignment())
        .map(|id| id.to_string())
        .collect();
    let _ = writeln!(out, "task_vector={}", stations.join(" "));
}
