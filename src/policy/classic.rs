//! Run-to-completion policies: FCFS, SJF and non-preemptive Priority.
//!
//! Each selects one ready process by its key and lets it run until its
//! remaining time reaches zero; a started process is never preempted.
//!
//! # Selection keys
//!
//! - FCFS: earliest arrival
//! - SJF: smallest burst, then earliest arrival
//! - Priority: smallest priority value, then earliest arrival
//!
//! All remaining ties fall back to original input order.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.1-5.3.3

use super::{select_min, Dispatch, Policy, ProcState, Slice};
use crate::models::Tick;

/// First Come First Served.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Policy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn select(&mut self, _now: Tick, procs: &[ProcState]) -> Option<Dispatch> {
        let index = select_min(procs, |p| p.arrival_time)?;
        let p = &procs[index];
        Some(Dispatch {
            index,
            slice: Slice::Full,
            queue: None,
            reason: format!(
                "Selected P{} because it arrived earliest (arrival: {}).",
                p.id, p.arrival_time
            ),
        })
    }
}

/// Shortest Job First (non-preemptive).
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl Policy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn select(&mut self, _now: Tick, procs: &[ProcState]) -> Option<Dispatch> {
        let index = select_min(procs, |p| (p.burst_time, p.arrival_time))?;
        let p = &procs[index];
        Some(Dispatch {
            index,
            slice: Slice::Full,
            queue: None,
            reason: format!(
                "Selected P{} because it has the shortest burst (burst: {}).",
                p.id, p.burst_time
            ),
        })
    }
}

/// Non-preemptive priority scheduling; lower value = more urgent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityNp;

impl Policy for PriorityNp {
    fn name(&self) -> &'static str {
        "PRIORITY-NP"
    }

    fn select(&mut self, _now: Tick, procs: &[ProcState]) -> Option<Dispatch> {
        let index = select_min(procs, |p| (p.priority, p.arrival_time))?;
        let p = &procs[index];
        Some(Dispatch {
            index,
            slice: Slice::Full,
            queue: None,
            reason: format!(
                "Selected P{} because it has the highest priority (priority: {}).",
                p.id, p.priority
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn ready(processes: &[Process]) -> Vec<ProcState> {
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
    fn test_fcfs_picks_earliest_arrival() {
        let procs = ready(&[
            Process::new(1, 4, 2),
            Process::new(2, 1, 9),
            Process::new(3, 3, 1),
        ]);
        let d = Fcfs.select(5, &procs).unwrap();
        assert_eq!(d.index, 1);
        assert_eq!(d.slice, Slice::Full);
    }

    #[test]
    fn test_fcfs_tie_uses_input_order() {
        let procs = ready(&[Process::new(7, 2, 3), Process::new(3, 2, 3)]);
        assert_eq!(Fcfs.select(2, &procs).unwrap().index, 0);
    }

    #[test]
    fn test_sjf_picks_smallest_burst() {
        let procs = ready(&[
            Process::new(1, 0, 6),
            Process::new(2, 0, 2),
            Process::new(3, 0, 4),
        ]);
        assert_eq!(Sjf.select(0, &procs).unwrap().index, 1);
    }

    #[test]
    fn test_sjf_burst_tie_uses_arrival() {
        let procs = ready(&[Process::new(1, 3, 4), Process::new(2, 1, 4)]);
        assert_eq!(Sjf.select(3, &procs).unwrap().index, 1);
    }

    #[test]
    fn test_priority_np_lower_value_wins() {
        let procs = ready(&[
            Process::new(1, 0, 5).with_priority(3),
            Process::new(2, 0, 5).with_priority(1),
            Process::new(3, 0, 5).with_priority(2),
        ]);
        let d = PriorityNp.select(0, &procs).unwrap();
        assert_eq!(d.index, 1);
        assert!(d.reason.contains("priority: 1"));
    }

    #[test]
    fn test_priority_tie_uses_arrival() {
        let procs = ready(&[
            Process::new(1, 5, 5).with_priority(2),
            Process::new(2, 4, 5).with_priority(2),
        ]);
        assert_eq!(PriorityNp.select(5, &procs).unwrap().index, 1);
    }

    #[test]
    fn test_empty_ready_set_selects_nothing() {
        let mut procs = ready(&[Process::new(1, 0, 5)]);
        procs[0].remaining_time = 0;
        assert!(Fcfs.select(5, &procs).is_none());
        assert!(Sjf.select(5, &procs).is_none());
        assert!(PriorityNp.select(5, &procs).is_none());
    }
}
