//! Scheduling policies.
//!
//! A policy answers one question for the simulation clock: *given the
//! current time and the ready state, what executes next and for how long?*
//! The clock owns admission, time advancement, timeline construction and
//! metric bookkeeping; policies own selection order, preemption granularity
//! and their internal queue structures.
//!
//! # Dispatch granularity
//!
//! | Policies | Slice |
//! |----------|-------|
//! | FCFS, SJF, Priority (non-preemptive) | run to completion |
//! | SRTF, Priority (preemptive), MLFQ | one tick, re-evaluated each unit |
//! | Round Robin | up to one quantum |
//! | Multi-Queue | the active queue's own discipline |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

mod classic;
mod mlfq;
mod multi_queue;
mod preemptive;
mod round_robin;

pub use classic::{Fcfs, PriorityNp, Sjf};
pub use mlfq::MultiLevelFeedback;
pub use multi_queue::MultiQueue;
pub use preemptive::{PriorityP, Srtf};
pub use round_robin::RoundRobin;

use crate::models::{Algorithm, ConfigError, Process, Tick};

/// Live view of one process during a run.
///
/// Owned and mutated by the clock; policies read it to rank candidates.
/// `admitted` is set exactly once, when the process first becomes ready.
#[derive(Debug, Clone)]
pub struct ProcState {
    /// Process identifier.
    pub id: u32,
    /// Arrival time.
    pub arrival_time: Tick,
    /// Total CPU demand.
    pub burst_time: Tick,
    /// Priority; lower = more urgent.
    pub priority: u32,
    /// Fixed queue assignment, if any.
    pub queue_id: Option<u32>,
    /// CPU time still owed. Only ever decreases.
    pub remaining_time: Tick,
    /// Whether the process has entered the ready set.
    pub admitted: bool,
    /// Instant of the first dispatch, once it happened.
    pub first_run: Option<Tick>,
    /// Completion instant, once reached.
    pub finish: Option<Tick>,
}

impl ProcState {
    pub(crate) fn from_process(process: &Process) -> Self {
        Self {
            id: process.id,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            queue_id: process.queue_id,
            remaining_time: process.burst_time,
            admitted: false,
            first_run: None,
            finish: None,
        }
    }

    /// Whether the process is in the ready set: admitted and unfinished.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.admitted && self.remaining_time > 0
    }
}

/// How long a selected process holds the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    /// Run until `remaining_time` reaches zero (non-preemptive).
    Full,
    /// Run exactly one tick, then re-evaluate.
    Unit,
    /// Run up to the given quantum (clamped to the remaining time).
    Quantum(Tick),
}

/// One scheduling decision: which process runs, for how long, and why.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// Index of the selected process in the clock's state vector.
    pub index: usize,
    /// Requested run length.
    pub slice: Slice,
    /// 1-based rank of the dispatching queue, for queue-aware policies.
    pub queue: Option<u32>,
    /// Human-readable explanation recorded on the timeline segment.
    pub reason: String,
}

/// A pluggable process-selection strategy driven by the simulation clock.
///
/// The clock guarantees the calling order per iteration: `admit` for every
/// newly arrived process, then `select`; after executing a dispatch it
/// admits processes that arrived during the slice and only then calls
/// `slice_done`, so a simultaneous arrival is queued ahead of a Round-Robin
/// requeue.
pub trait Policy {
    /// Policy name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// A process has arrived and joins the ready set.
    ///
    /// Queue-based policies record it in their structures; scan-based
    /// policies need no bookkeeping.
    fn admit(&mut self, _index: usize, _procs: &[ProcState]) {}

    /// Chooses the next dispatch, or `None` when nothing is runnable.
    fn select(&mut self, now: Tick, procs: &[ProcState]) -> Option<Dispatch>;

    /// A dispatch finished executing; `finished` is whether the process
    /// completed. Requeue/demotion bookkeeping happens here.
    fn slice_done(&mut self, _index: usize, _finished: bool, _procs: &[ProcState]) {}
}

/// Builds the policy for an [`Algorithm`], validating its parameters.
pub fn from_algorithm(algorithm: &Algorithm) -> Result<Box<dyn Policy>, ConfigError> {
    algorithm.validate()?;
    Ok(match algorithm {
        Algorithm::Fcfs => Box::new(Fcfs),
        Algorithm::Sjf => Box::new(Sjf),
        Algorithm::Srtf => Box::new(Srtf::new()),
        Algorithm::RoundRobin { quantum } => Box::new(RoundRobin::new(*quantum)),
        Algorithm::Priority { preemptive: false } => Box::new(PriorityNp),
        Algorithm::Priority { preemptive: true } => Box::new(PriorityP::new()),
        Algorithm::MultiQueue { queues } => Box::new(MultiQueue::new(queues.clone())?),
        Algorithm::MultiLevelFeedback { queues } => {
            Box::new(MultiLevelFeedback::new(queues.clone())?)
        }
    })
}

/// First ready process minimizing `key`, scanning in input order.
///
/// `min_by_key` keeps the first minimum, which makes original input order
/// the implicit final tie-break of every selection chain.
pub(crate) fn select_min<K: Ord>(
    procs: &[ProcState],
    key: impl Fn(&ProcState) -> K,
) -> Option<usize> {
    procs
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_ready())
        .min_by_key(|(_, p)| key(p))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QueueConfig;

    fn state(id: u32, arrival: Tick, burst: Tick) -> ProcState {
        let mut s = ProcState::from_process(&Process::new(id, arrival, burst));
        s.admitted = true;
        s
    }

    #[test]
    fn test_select_min_input_order_tie_break() {
        let procs = vec![state(1, 0, 5), state(2, 0, 5), state(3, 0, 5)];
        // Identical keys: first in input order wins.
        assert_eq!(select_min(&procs, |p| p.burst_time), Some(0));
    }

    #[test]
    fn test_select_min_skips_unready() {
        let mut procs = vec![state(1, 0, 5), state(2, 0, 3)];
        procs[1].admitted = false;
        assert_eq!(select_min(&procs, |p| p.burst_time), Some(0));

        procs[1].admitted = true;
        procs[0].remaining_time = 0;
        assert_eq!(select_min(&procs, |p| p.burst_time), Some(1));
    }

    #[test]
    fn test_from_algorithm_validates() {
        assert!(from_algorithm(&Algorithm::RoundRobin { quantum: 0 }).is_err());
        assert!(from_algorithm(&Algorithm::MultiQueue { queues: Vec::new() }).is_err());
        let ok = from_algorithm(&Algorithm::MultiLevelFeedback {
            queues: vec![QueueConfig::new(crate::models::QueueAlgorithm::RoundRobin).with_quantum(2)],
        });
        assert!(ok.is_ok());
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(from_algorithm(&Algorithm::Fcfs).unwrap().name(), "FCFS");
        assert_eq!(
            from_algorithm(&Algorithm::Priority { preemptive: true })
                .unwrap()
                .name(),
            "PRIORITY-P"
        );
    }
}
