//! Simulation engine.
//!
//! One shared virtual-clock loop drives every policy: it admits arrivals,
//! asks the active [`Policy`](crate::policy::Policy) what executes next,
//! advances time, and maintains the timeline and per-process metrics. The
//! per-policy tick loops of a naive implementation collapse into a single
//! driver, so idle handling, merging and bookkeeping cannot drift between
//! algorithms.
//!
//! A run is a pure function of its inputs: no randomness, no wall-clock
//! reads, no state surviving between runs.

mod clock;
mod stats;

pub use clock::Simulator;
pub use stats::RunStats;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ConfigError, ProcessReport, Tick, Timeline};

/// Output of a completed run: finalized processes (sorted by id) plus the
/// execution timeline. Owned data, independent of any engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// One finalized report per input process, ordered by id ascending.
    pub processes: Vec<ProcessReport>,
    /// The execution trace covering `[0, last finish)`.
    pub timeline: Timeline,
}

/// A failed run. The engine either returns a complete, self-consistent
/// result or one of these; it never returns a partial timeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The policy configuration is unsupported or incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The input process set is empty.
    #[error("no processes to schedule")]
    NoProcesses,
    /// The clock could not make forward progress. Prevented by
    /// construction; reported instead of looping forever if a policy
    /// violates its contract.
    #[error("scheduler stalled at t={time}: ready processes but no dispatch")]
    Stalled {
        /// Virtual-clock time at which the stall was detected.
        time: Tick,
    },
    /// A process was never completed by the main loop. Defensive; a
    /// correct loop terminates only when every process finished.
    #[error("process P{id} never completed")]
    Incomplete {
        /// Id of the unfinished process.
        id: u32,
    },
}
