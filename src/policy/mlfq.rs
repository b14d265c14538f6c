//! Multi-Level Feedback Queue policy.
//!
//! Every process enters queue 0 on arrival, regardless of any fixed queue
//! assignment. Dispatches are always one tick long, taken from the head of
//! the highest-ranked non-empty queue, so new arrivals and demotions are
//! re-evaluated every time unit. A per-process counter tracks CPU time in
//! the current queue; on reaching that queue's quantum the process moves
//! down one level with the counter reset. The last queue has no lower
//! level to move to: quantum exhaustion there requeues the process onto
//! the same queue's tail, which degenerates to round-robin.
//!
//! Demotion is one-way; a process is never promoted back.
//!
//! # Reference
//! Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 8

use std::collections::VecDeque;

use super::{Dispatch, Policy, ProcState, Slice};
use crate::models::{ConfigError, QueueConfig, Tick};

/// Placement of one process in the queue hierarchy.
#[derive(Debug, Clone, Copy, Default)]
struct Placement {
    level: usize,
    ran_in_level: Tick,
}

/// Multi-level feedback queues with quantum-exhaustion demotion.
#[derive(Debug, Clone)]
pub struct MultiLevelFeedback {
    /// Demotion threshold per level.
    quanta: Vec<Tick>,
    /// Member process indexes per level, in arrival/demotion order.
    queues: Vec<VecDeque<usize>>,
    /// Placement per process index; grown on admission.
    placements: Vec<Placement>,
}

impl MultiLevelFeedback {
    /// Builds the policy; every level needs a positive quantum.
    pub fn new(queues: Vec<QueueConfig>) -> Result<Self, ConfigError> {
        if queues.is_empty() {
            return Err(ConfigError::EmptyQueueSet);
        }
        let quanta = queues
            .iter()
            .enumerate()
            .map(|(rank, config)| match config.quantum {
                Some(q) if q > 0 => Ok(q),
                Some(_) => Err(ConfigError::InvalidQueueQuantum { queue: rank + 1 }),
                None => Err(ConfigError::MissingQueueQuantum { queue: rank + 1 }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let levels = quanta.len();
        Ok(Self {
            quanta,
            queues: vec![VecDeque::new(); levels],
            placements: Vec::new(),
        })
    }

    /// Current level of a process (for tests and diagnostics).
    pub fn level_of(&self, index: usize) -> Option<usize> {
        self.placements.get(index).map(|p| p.level)
    }
}

impl Policy for MultiLevelFeedback {
    fn name(&self) -> &'static str {
        "MLFQ"
    }

    fn admit(&mut self, index: usize, _procs: &[ProcState]) {
        if self.placements.len() <= index {
            self.placements.resize(index + 1, Placement::default());
        }
        self.placements[index] = Placement::default();
        self.queues[0].push_back(index);
    }

    fn select(&mut self, _now: Tick, procs: &[ProcState]) -> Option<Dispatch> {
        for (level, queue) in self.queues.iter().enumerate() {
            let Some(&index) = queue.front() else {
                continue;
            };
            let p = &procs[index];
            return Some(Dispatch {
                index,
                slice: Slice::Unit,
                queue: Some(level as u32 + 1),
                reason: format!(
                    "Selected P{} from Queue {} because it is the highest-ranked non-empty queue.",
                    p.id,
                    level + 1
                ),
            });
        }
        None
    }

    fn slice_done(&mut self, index: usize, finished: bool, _procs: &[ProcState]) {
        let placement = &mut self.placements[index];
        placement.ran_in_level += 1;
        let level = placement.level;
        debug_assert_eq!(self.queues[level].front(), Some(&index));

        if finished {
            self.queues[level].pop_front();
        } else if placement.ran_in_level >= self.quanta[level] {
            // Quantum exhausted: move down one level, or rotate within the
            // last queue.
            let next = (level + 1).min(self.quanta.len() - 1);
            self.queues[level].pop_front();
            placement.ran_in_level = 0;
            placement.level = next;
            self.queues[next].push_back(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, QueueAlgorithm};

    fn mlfq(quanta: &[Tick]) -> MultiLevelFeedback {
        let queues = quanta
            .iter()
            .map(|&q| QueueConfig::new(QueueAlgorithm::RoundRobin).with_quantum(q))
            .collect();
        MultiLevelFeedback::new(queues).unwrap()
    }

    fn admitted(policy: &mut MultiLevelFeedback, processes: &[Process]) -> Vec<ProcState> {
        let procs: Vec<ProcState> = processes
            .iter()
            .map(|p| {
                let mut s = ProcState::from_process(p);
                s.admitted = true;
                s
            })
            .collect();
        for i in 0..procs.len() {
            policy.admit(i, &procs);
        }
        procs
    }

    #[test]
    fn test_rejects_missing_quantum() {
        let queues = vec![QueueConfig::new(QueueAlgorithm::Fcfs)];
        assert_eq!(
            MultiLevelFeedback::new(queues).unwrap_err(),
            ConfigError::MissingQueueQuantum { queue: 1 }
        );
    }

    #[test]
    fn test_everyone_starts_in_queue_zero() {
        let mut policy = mlfq(&[2, 4]);
        // A fixed queue assignment is ignored under MLFQ.
        let procs = admitted(&mut policy, &[Process::new(1, 0, 5).with_queue_id(2)]);
        assert_eq!(policy.level_of(0), Some(0));

        let d = policy.select(0, &procs).unwrap();
        assert_eq!(d.queue, Some(1));
        assert_eq!(d.slice, Slice::Unit);
    }

    #[test]
    fn test_demotion_after_quantum() {
        let mut policy = mlfq(&[2, 4]);
        let procs = admitted(&mut policy, &[Process::new(1, 0, 5)]);

        policy.slice_done(0, false, &procs);
        assert_eq!(policy.level_of(0), Some(0));
        policy.slice_done(0, false, &procs);
        assert_eq!(policy.level_of(0), Some(1));
        assert!(policy.queues[0].is_empty());
        assert_eq!(policy.queues[1].front(), Some(&0));
    }

    #[test]
    fn test_last_queue_rotates_instead_of_demoting() {
        let mut policy = mlfq(&[2]);
        let procs = admitted(
            &mut policy,
            &[Process::new(1, 0, 9), Process::new(2, 0, 9)],
        );

        policy.slice_done(0, false, &procs);
        policy.slice_done(0, false, &procs);
        // P1 used its quantum in the only queue: rotated to the tail.
        assert_eq!(policy.level_of(0), Some(0));
        assert_eq!(policy.queues[0].iter().copied().collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn test_head_of_line_until_quantum() {
        let mut policy = mlfq(&[3]);
        let procs = admitted(
            &mut policy,
            &[Process::new(1, 0, 9), Process::new(2, 0, 9)],
        );

        // Two ticks within the quantum: the head keeps the CPU.
        assert_eq!(policy.select(0, &procs).unwrap().index, 0);
        policy.slice_done(0, false, &procs);
        assert_eq!(policy.select(1, &procs).unwrap().index, 0);
    }

    #[test]
    fn test_completion_leaves_queue() {
        let mut policy = mlfq(&[2, 4]);
        let mut procs = admitted(&mut policy, &[Process::new(1, 0, 1)]);
        procs[0].remaining_time = 0;
        policy.slice_done(0, true, &procs);
        assert!(policy.queues.iter().all(|q| q.is_empty()));
        assert!(policy.select(1, &procs).is_none());
    }
}
