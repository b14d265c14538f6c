//! The shared virtual-clock loop.
//!
//! # Algorithm
//!
//! 1. Admit every process whose arrival time has been reached (exactly
//!    once per process).
//! 2. Ask the policy for a dispatch. If there is none, jump the clock to
//!    the next arrival among unfinished processes and record one idle
//!    segment for the skipped interval.
//! 3. Execute the dispatch: resolve the slice against the remaining time,
//!    advance the clock, record the segment, note the first run, finalize
//!    the process when its remaining time reaches zero.
//! 4. Admit processes that arrived during the slice, then hand control
//!    back to the policy (`slice_done`) for requeue/demotion bookkeeping.
//!
//! Every iteration either advances the clock or completes a process;
//! anything else is reported as [`SimulationError::Stalled`] rather than
//! looping forever.

use log::{debug, trace};

use super::{stats, SimulationError, SimulationResult};
use crate::models::{Algorithm, Process, Tick, Timeline, TimelineSegment};
use crate::policy::{self, Policy, ProcState, Slice};

/// Drives a scheduling policy over a process set.
///
/// # Example
///
/// ```
/// use schedsim::{Algorithm, Process, Simulator};
///
/// let simulator = Simulator::new(Algorithm::Fcfs);
/// let result = simulator
///     .run(&[Process::new(1, 0, 5), Process::new(2, 1, 3)])
///     .unwrap();
///
/// assert_eq!(result.processes[0].finish_time, 5);
/// assert_eq!(result.processes[1].finish_time, 8);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    algorithm: Algorithm,
}

impl Simulator {
    /// Creates a simulator for the given algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    /// The configured algorithm.
    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    /// Runs the simulation to completion.
    ///
    /// The input slice is deep-copied; the caller's processes are never
    /// mutated. Two runs on identical input produce identical results.
    pub fn run(&self, processes: &[Process]) -> Result<SimulationResult, SimulationError> {
        if processes.is_empty() {
            return Err(SimulationError::NoProcesses);
        }
        let mut policy = policy::from_algorithm(&self.algorithm)?;
        debug!(
            "{}: starting run with {} processes",
            policy.name(),
            processes.len()
        );

        let mut procs: Vec<ProcState> = processes.iter().map(ProcState::from_process).collect();
        let mut timeline = Timeline::new();
        let mut now: Tick = 0;
        let mut finished = 0usize;

        while finished < procs.len() {
            admit_arrivals(&mut procs, now, policy.as_mut());

            let Some(dispatch) = policy.select(now, &procs) else {
                if procs.iter().any(|p| p.is_ready()) {
                    // Ready work but no selection: policy contract broken.
                    return Err(SimulationError::Stalled { time: now });
                }
                let next_arrival = procs
                    .iter()
                    .filter(|p| !p.admitted && p.remaining_time > 0)
                    .map(|p| p.arrival_time)
                    .min();
                let Some(at) = next_arrival else {
                    // Nothing ready and nothing arriving, yet the loop
                    // condition says work remains.
                    return Err(SimulationError::Stalled { time: now });
                };
                trace!("t={now}: idle until next arrival at t={at}");
                timeline.push(
                    TimelineSegment::idle(now, at)
                        .with_reason("CPU is idle (no ready processes)."),
                );
                now = at;
                continue;
            };

            let index = dispatch.index;
            let run_for = match dispatch.slice {
                Slice::Full => procs[index].remaining_time,
                Slice::Unit => 1,
                Slice::Quantum(quantum) => quantum.min(procs[index].remaining_time),
            };
            if run_for == 0 || !procs[index].is_ready() {
                return Err(SimulationError::Stalled { time: now });
            }

            if procs[index].first_run.is_none() {
                procs[index].first_run = Some(now);
            }
            let start = now;
            now += run_for;
            procs[index].remaining_time -= run_for;
            trace!(
                "t={start}: P{} runs for {run_for} tick(s), {} remaining",
                procs[index].id,
                procs[index].remaining_time
            );

            let mut segment =
                TimelineSegment::running(procs[index].id, start, now).with_reason(dispatch.reason);
            if let Some(queue) = dispatch.queue {
                segment = segment.with_queue(queue);
            }
            timeline.push(segment);

            let done = procs[index].remaining_time == 0;
            if done {
                procs[index].finish = Some(now);
                finished += 1;
                timeline.set_last_reason(format!("P{} completed.", procs[index].id));
                debug!("t={now}: P{} completed", procs[index].id);
            }

            // Admission before the policy's own bookkeeping: a process
            // arriving exactly at the end of a slice is queued ahead of a
            // Round-Robin requeue.
            admit_arrivals(&mut procs, now, policy.as_mut());
            policy.slice_done(index, done, &procs);
        }

        let mut reports = Vec::with_capacity(procs.len());
        for p in &procs {
            match stats::finalize(p) {
                Some(report) => reports.push(report),
                None => return Err(SimulationError::Incomplete { id: p.id }),
            }
        }
        reports.sort_by_key(|r| r.id);

        Ok(SimulationResult {
            processes: reports,
            timeline,
        })
    }
}

/// Marks newly arrived processes as admitted and announces them to the
/// policy, in input order.
fn admit_arrivals(procs: &mut [ProcState], now: Tick, policy: &mut dyn Policy) {
    for index in 0..procs.len() {
        if !procs[index].admitted && procs[index].arrival_time <= now {
            procs[index].admitted = true;
            trace!("t={now}: P{} admitted", procs[index].id);
            policy.admit(index, procs);
        }
    }
}
