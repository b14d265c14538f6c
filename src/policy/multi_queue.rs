//! Multi-Queue policy: ranked queues with fixed process assignment.
//!
//! Every process is pinned to one queue via its `queue_id` (clamped into
//! the configured range); the assignment never changes. Each scheduling
//! decision scans the queues from rank 0 and dispatches from the first one
//! with a ready member, using that queue's own discipline.
//!
//! Cross-queue preemption happens only at dispatch boundaries: once a run
//! length is computed for the active queue it is not re-interrupted, even
//! if a higher-ranked queue receives an arrival mid-dispatch. Tick-granular
//! disciplines (SRTF) therefore react to higher-ranked arrivals within one
//! tick, run-to-completion disciplines only after the current burst.

use std::collections::VecDeque;

use super::{Dispatch, Policy, ProcState, Slice};
use crate::models::{ConfigError, QueueAlgorithm, QueueConfig, Tick};

/// Resolved per-queue discipline with its parameters unpacked.
#[derive(Debug, Clone, Copy)]
enum QueueMode {
    Fcfs,
    Sjf,
    Srtf,
    RoundRobin(Tick),
    Priority,
}

impl QueueMode {
    fn from_config(rank: usize, config: &QueueConfig) -> Result<Self, ConfigError> {
        Ok(match (config.algorithm, config.quantum) {
            (QueueAlgorithm::Fcfs, _) => QueueMode::Fcfs,
            (QueueAlgorithm::Sjf, _) => QueueMode::Sjf,
            (QueueAlgorithm::Srtf, _) => QueueMode::Srtf,
            (QueueAlgorithm::Priority, _) => QueueMode::Priority,
            (QueueAlgorithm::RoundRobin, Some(q)) if q > 0 => QueueMode::RoundRobin(q),
            (QueueAlgorithm::RoundRobin, Some(_)) => {
                return Err(ConfigError::InvalidQueueQuantum { queue: rank + 1 })
            }
            (QueueAlgorithm::RoundRobin, None) => {
                return Err(ConfigError::MissingQueueQuantum { queue: rank + 1 })
            }
        })
    }

    fn name(&self) -> &'static str {
        match self {
            QueueMode::Fcfs => "FCFS",
            QueueMode::Sjf => "SJF",
            QueueMode::Srtf => "SRTF",
            QueueMode::RoundRobin(_) => "RR",
            QueueMode::Priority => "PRIORITY",
        }
    }
}

/// Multiple ranked queues, each with its own discipline.
#[derive(Debug, Clone)]
pub struct MultiQueue {
    modes: Vec<QueueMode>,
    /// Member process indexes per queue, in admission order. A member is
    /// removed on completion; Round-Robin queues rotate their head here.
    members: Vec<VecDeque<usize>>,
}

impl MultiQueue {
    /// Builds the policy, rejecting incomplete queue configurations.
    pub fn new(queues: Vec<QueueConfig>) -> Result<Self, ConfigError> {
        if queues.is_empty() {
            return Err(ConfigError::EmptyQueueSet);
        }
        let modes = queues
            .iter()
            .enumerate()
            .map(|(rank, config)| QueueMode::from_config(rank, config))
            .collect::<Result<Vec<_>, _>>()?;
        let members = vec![VecDeque::new(); modes.len()];
        Ok(Self { modes, members })
    }

    /// Queue rank for a process: its 1-based `queue_id` clamped into the
    /// configured range, defaulting to the highest-ranked queue.
    fn rank_for(&self, p: &ProcState) -> usize {
        let id = p.queue_id.unwrap_or(1).max(1) as usize;
        (id - 1).min(self.modes.len() - 1)
    }

    fn pick(&self, rank: usize, procs: &[ProcState]) -> Option<usize> {
        let ready = || {
            self.members[rank]
                .iter()
                .copied()
                .filter(|&i| procs[i].is_ready())
        };
        match self.modes[rank] {
            QueueMode::Fcfs => ready().min_by_key(|&i| procs[i].arrival_time),
            QueueMode::Sjf => ready().min_by_key(|&i| (procs[i].burst_time, procs[i].arrival_time)),
            QueueMode::Srtf => {
                ready().min_by_key(|&i| (procs[i].remaining_time, procs[i].arrival_time))
            }
            QueueMode::Priority => {
                ready().min_by_key(|&i| (procs[i].priority, procs[i].arrival_time))
            }
            QueueMode::RoundRobin(_) => ready().next(),
        }
    }
}

impl Policy for MultiQueue {
    fn name(&self) -> &'static str {
        "MQ"
    }

    fn admit(&mut self, index: usize, procs: &[ProcState]) {
        let rank = self.rank_for(&procs[index]);
        self.members[rank].push_back(index);
    }

    fn select(&mut self, _now: Tick, procs: &[ProcState]) -> Option<Dispatch> {
        for rank in 0..self.modes.len() {
            let Some(index) = self.pick(rank, procs) else {
                continue;
            };
            let mode = self.modes[rank];
            let slice = match mode {
                QueueMode::RoundRobin(quantum) => Slice::Quantum(quantum),
                QueueMode::Srtf => Slice::Unit,
                _ => Slice::Full,
            };
            return Some(Dispatch {
                index,
                slice,
                queue: Some(rank as u32 + 1),
                reason: format!(
                    "Selected P{} from Queue {} ({}) because it is the highest-ranked queue with ready processes.",
                    procs[index].id,
                    rank + 1,
                    mode.name()
                ),
            });
        }
        None
    }

    fn slice_done(&mut self, index: usize, finished: bool, procs: &[ProcState]) {
        let rank = self.rank_for(&procs[index]);
        if finished {
            self.members[rank].retain(|&i| i != index);
        } else if matches!(self.modes[rank], QueueMode::RoundRobin(_))
            && self.members[rank].front() == Some(&index)
        {
            // Requeue to this queue's own tail; arrivals admitted during
            // the slice are already queued ahead of it.
            self.members[rank].pop_front();
            self.members[rank].push_back(index);
        }
    }
}
