//! Greedy balancing algorithms and line quality metrics.
//!
//! Two balancers share the same building blocks, the line's candidate
//! queries and a [`SelectionRule`](crate::heuristics::SelectionRule):
//!
//! - [`SequentialBalancer`] fills stations one at a time in ascending
//!   id order (strict first-fit packing).
//! - [`ShortestStationBalancer`] works in rounds, always feeding the
//!   least-loaded active station and opening stations progressively.
//!
//! Both are deterministic for fixed inputs and a fixed rule. Neither
//! backtracks: they produce a feasible assignment given enough
//! stations and a feasible cycle time, not a provably minimal one.
//!
//! [`LineKpi`] computes the standard line-balancing measurements
//! (efficiency, smoothness index, theoretical minimum stations).

mod kpi;
mod sequential;
mod shortest_station;

pub use kpi::LineKpi;
pub use sequential::SequentialBalancer;
pub use shortest_station::ShortestStationBalancer;
