//! Round Robin policy.
//!
//! Ready processes form a FIFO queue; the head runs for up to one quantum
//! and, if unfinished, is moved to the tail. The clock admits processes
//! that arrived during the slice *before* the requeue, so a simultaneous
//! arrival is ordered ahead of the preempted process. A process finishing
//! exactly on the quantum boundary is not requeued.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.4

use std::collections::VecDeque;

use super::{Dispatch, Policy, ProcState, Slice};
use crate::models::Tick;

/// Round Robin with a fixed time quantum.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    quantum: Tick,
    queue: VecDeque<usize>,
}

impl RoundRobin {
    /// Creates the policy with the given quantum (> 0, validated upstream).
    pub fn new(quantum: Tick) -> Self {
        Self {
            quantum,
            queue: VecDeque::new(),
        }
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn admit(&mut self, index: usize, _procs: &[ProcState]) {
        self.queue.push_back(index);
    }

    fn select(&mut self, _now: Tick, procs: &[ProcState]) -> Option<Dispatch> {
        let index = *self.queue.front()?;
        let p = &procs[index];
        Some(Dispatch {
            index,
            slice: Slice::Quantum(self.quantum),
            queue: None,
            reason: format!(
                "Dispatched P{} from the head of the ready queue (quantum: {}).",
                p.id, self.quantum
            ),
        })
    }

    fn slice_done(&mut self, index: usize, finished: bool, _procs: &[ProcState]) {
        let head = self.queue.pop_front();
        debug_assert_eq!(head, Some(index));
        if !finished {
            self.queue.push_back(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn states(processes: &[Process]) -> Vec<ProcState> {
        processes
            .iter()
            .map(|p| {
                let mut s = ProcState::from_process(p);
                s.admitted = true;
                s
            })
            .collect()
    }

    #[test]
    fn test_fifo_order() {
        let procs = states(&[Process::new(1, 0, 5), Process::new(2, 0, 5)]);
        let mut rr = RoundRobin::new(2);
        rr.admit(0, &procs);
        rr.admit(1, &procs);

        let d = rr.select(0, &procs).unwrap();
        assert_eq!(d.index, 0);
        assert_eq!(d.slice, Slice::Quantum(2));
    }

    #[test]
    fn test_unfinished_process_requeued_after_new_arrival() {
        let procs = states(&[Process::new(1, 0, 5), Process::new(2, 2, 3)]);
        let mut rr = RoundRobin::new(2);
        rr.admit(0, &procs);
        assert_eq!(rr.select(0, &procs).unwrap().index, 0);

        // P2 arrives during P1's slice: admitted first, then P1 requeued.
        rr.admit(1, &procs);
        rr.slice_done(0, false, &procs);

        assert_eq!(rr.select(2, &procs).unwrap().index, 1);
    }

    #[test]
    fn test_finished_process_not_requeued() {
        let procs = states(&[Process::new(1, 0, 2), Process::new(2, 0, 2)]);
        let mut rr = RoundRobin::new(2);
        rr.admit(0, &procs);
        rr.admit(1, &procs);

        assert_eq!(rr.select(0, &procs).unwrap().index, 0);
        rr.slice_done(0, true, &procs);
        assert_eq!(rr.select(2, &procs).unwrap().index, 1);
        rr.slice_done(1, true, &procs);
        assert!(rr.select(4, &procs).is_none());
    }
}
