//! Tick-preemptive policies: SRTF and preemptive Priority.
//!
//! Both re-evaluate the ready set on every time unit, so a later arrival
//! can take the CPU mid-burst. The dispatch length is always one tick; the
//! timeline merge rule collapses consecutive same-process ticks into a
//! single segment.
//!
//! # Tie-breaking
//!
//! Smallest key, then earliest arrival, then the currently running process
//! (so an exact tie never causes a pointless switch), then input order.
//! For preemptive Priority this means an incoming process only takes over
//! when its priority is strictly better than the running one's.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.2, 5.3.4

use super::{select_min, Dispatch, Policy, ProcState, Slice};
use crate::models::Tick;

/// Shortest Remaining Time First (preemptive SJF).
#[derive(Debug, Clone, Copy, Default)]
pub struct Srtf {
    running: Option<usize>,
}

impl Srtf {
    /// Creates the policy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn select(&mut self, _now: Tick, procs: &[ProcState]) -> Option<Dispatch> {
        let running = self.running;
        let index = select_min(procs, |p| {
            (
                p.remaining_time,
                p.arrival_time,
                // False sorts first: prefer the process already on the CPU.
                running.map_or(true, |r| procs[r].id != p.id),
            )
        })?;
        self.running = Some(index);
        let p = &procs[index];
        Some(Dispatch {
            index,
            slice: Slice::Unit,
            queue: None,
            reason: format!(
                "Selected P{} because it has the shortest remaining time (remaining: {}).",
                p.id, p.remaining_time
            ),
        })
    }

    fn slice_done(&mut self, _index: usize, finished: bool, _procs: &[ProcState]) {
        if finished {
            self.running = None;
        }
    }
}

/// Preemptive priority scheduling; lower value = more urgent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityP {
    running: Option<usize>,
}

impl PriorityP {
    /// Creates the policy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for PriorityP {
    fn name(&self) -> &'static str {
        "PRIORITY-P"
    }

    fn select(&mut self, _now: Tick, procs: &[ProcState]) -> Option<Dispatch> {
        let running = self.running;
        let index = select_min(procs, |p| {
            (
                p.priority,
                p.arrival_time,
                running.map_or(true, |r| procs[r].id != p.id),
            )
        })?;
        self.running = Some(index);
        let p = &procs[index];
        Some(Dispatch {
            index,
            slice: Slice::Unit,
            queue: None,
            reason: format!(
                "Selected P{} because it has the highest priority (priority: {}).",
                p.id, p.priority
            ),
        })
    }

    fn slice_done(&mut self, _index: usize, finished: bool, _procs: &[ProcState]) {
        if finished {
            self.running = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn states(processes: &[Process], now: Tick) -> Vec<ProcState> {
        processes
            .iter()
            .map(|p| {
                let mut s = ProcState::from_process(p);
                s.admitted = p.arrival_time <= now;
                s
            })
            .collect()
    }

    #[test]
    fn test_srtf_prefers_smallest_remaining() {
        let mut policy = Srtf::new();
        let mut procs = states(&[Process::new(1, 0, 8), Process::new(2, 1, 4)], 1);
        procs[0].remaining_time = 7;
        assert_eq!(policy.select(1, &procs).unwrap().index, 1);
    }

    #[test]
    fn test_srtf_exact_tie_keeps_running_process() {
        let mut policy = Srtf::new();
        // P1 is on the CPU with 4 remaining; P2 arrives later, also with 4
        // remaining and a later arrival: no switch.
        let mut procs = states(&[Process::new(1, 0, 8), Process::new(2, 2, 4)], 2);
        procs[0].remaining_time = 4;
        policy.running = Some(0);
        assert_eq!(policy.select(2, &procs).unwrap().index, 0);
    }

    #[test]
    fn test_srtf_unit_slice() {
        let mut policy = Srtf::new();
        let procs = states(&[Process::new(1, 0, 8)], 0);
        assert_eq!(policy.select(0, &procs).unwrap().slice, Slice::Unit);
    }

    #[test]
    fn test_priority_p_strictly_better_preempts() {
        let mut policy = PriorityP::new();
        let mut procs = states(
            &[
                Process::new(1, 0, 8).with_priority(3),
                Process::new(2, 2, 4).with_priority(1),
            ],
            2,
        );
        procs[0].remaining_time = 6;
        policy.running = Some(0);
        assert_eq!(policy.select(2, &procs).unwrap().index, 1);
    }

    #[test]
    fn test_priority_p_equal_priority_does_not_preempt() {
        let mut policy = PriorityP::new();
        let mut procs = states(
            &[
                Process::new(1, 0, 8).with_priority(2),
                Process::new(2, 2, 4).with_priority(2),
            ],
            2,
        );
        procs[0].remaining_time = 6;
        policy.running = Some(0);
        // Tie on priority: the running process continues.
        assert_eq!(policy.select(2, &procs).unwrap().index, 0);
    }

    #[test]
    fn test_running_forgotten_after_completion() {
        let mut policy = Srtf::new();
        let procs = states(&[Process::new(1, 0, 1), Process::new(2, 0, 5)], 0);
        assert_eq!(policy.select(0, &procs).unwrap().index, 0);
        policy.slice_done(0, true, &procs);
        assert_eq!(policy.running, None);
    }
}
