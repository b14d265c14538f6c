//! Per-process finalization and aggregate run metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround time | finish − arrival |
//! | Waiting time | turnaround − burst |
//! | Response time | first run − arrival |
//! | Makespan | latest finish time |
//! | CPU utilization | busy time / makespan |
//! | Throughput | processes completed / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use super::SimulationResult;
use crate::models::{ProcessReport, Tick};
use crate::policy::ProcState;

/// Builds the finalized report for a completed process.
///
/// Returns `None` while the process has not both started and finished;
/// the clock treats that as an internal error at the end of a run.
pub(crate) fn finalize(state: &ProcState) -> Option<ProcessReport> {
    let first_run_time = state.first_run?;
    let finish_time = state.finish?;
    let turnaround_time = finish_time - state.arrival_time;
    Some(ProcessReport {
        id: state.id,
        arrival_time: state.arrival_time,
        burst_time: state.burst_time,
        priority: state.priority,
        queue_id: state.queue_id,
        first_run_time,
        finish_time,
        turnaround_time,
        waiting_time: turnaround_time - state.burst_time,
        response_time: first_run_time - state.arrival_time,
    })
}

/// Aggregate quality indicators for a completed run.
///
/// Pure derivation over a [`SimulationResult`]; comparing two of these for
/// different algorithms on the same input is the crate's main use case.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Mean turnaround time across all processes.
    pub avg_turnaround: f64,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Latest finish time.
    pub makespan: Tick,
    /// Total non-idle time.
    pub busy_time: Tick,
    /// busy_time / makespan, in `0.0..=1.0`.
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
}

impl RunStats {
    /// Computes the aggregates from a completed result.
    pub fn from_result(result: &SimulationResult) -> Self {
        let n = result.processes.len();
        let sum = |f: fn(&ProcessReport) -> Tick| -> f64 {
            result.processes.iter().map(|r| f(r) as f64).sum()
        };

        let makespan = result
            .processes
            .iter()
            .map(|r| r.finish_time)
            .max()
            .unwrap_or(0);
        let busy_time = result.timeline.busy_time();

        let (avg_turnaround, avg_waiting, avg_response) = if n == 0 {
            (0.0, 0.0, 0.0)
        } else {
            (
                sum(|r| r.turnaround_time) / n as f64,
                sum(|r| r.waiting_time) / n as f64,
                sum(|r| r.response_time) / n as f64,
            )
        };

        let (cpu_utilization, throughput) = if makespan == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_time as f64 / makespan as f64,
                n as f64 / makespan as f64,
            )
        };

        Self {
            avg_turnaround,
            avg_waiting,
            avg_response,
            makespan,
            busy_time,
            cpu_utilization,
            throughput,
        }
    }
}
