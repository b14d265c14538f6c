//! Process model.
//!
//! A process is the unit of work scheduled by the simulator: it arrives at
//! a virtual-clock instant, demands a fixed amount of CPU time, and carries
//! optional priority / queue-assignment metadata used by a subset of the
//! policies.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.1

use serde::{Deserialize, Serialize};

/// Discrete virtual-clock instant (or duration).
///
/// The simulator has no notion of wall-clock time; all scheduling happens
/// on an integer tick axis starting at t=0.
pub type Tick = u32;

/// A process to be scheduled.
///
/// This is the immutable input descriptor. The engine deep-copies it into
/// its own working state at the start of a run, so the caller's processes
/// are never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique identifier (positive; `P{id}` in renderers).
    pub id: u32,
    /// Instant the process becomes eligible to run.
    pub arrival_time: Tick,
    /// Total CPU time demanded (> 0).
    pub burst_time: Tick,
    /// Scheduling priority; lower value = more urgent. Only meaningful for
    /// the priority policies, defaults to 0 elsewhere.
    pub priority: u32,
    /// Fixed queue assignment for multi-queue scheduling, 1-based.
    /// Ignored by every other policy; MLFQ routes all processes to queue 0
    /// regardless of this field.
    pub queue_id: Option<u32>,
}

impl Process {
    /// Creates a process with the given id, arrival time and burst time.
    pub fn new(id: u32, arrival_time: Tick, burst_time: Tick) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: 0,
            queue_id: None,
        }
    }

    /// Sets the priority (lower = more urgent).
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the fixed queue assignment (1-based) for multi-queue runs.
    pub fn with_queue_id(mut self, queue_id: u32) -> Self {
        self.queue_id = Some(queue_id);
        self
    }
}

/// A finalized per-process record produced by a completed run.
///
/// All derived fields are concrete: a report only exists once the process
/// has finished. The identities below hold for every report:
///
/// * `turnaround_time = finish_time - arrival_time`
/// * `waiting_time = turnaround_time - burst_time`
/// * `response_time = first_run_time - arrival_time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Process identifier.
    pub id: u32,
    /// Arrival time from the input descriptor.
    pub arrival_time: Tick,
    /// Burst time from the input descriptor.
    pub burst_time: Tick,
    /// Priority from the input descriptor.
    pub priority: u32,
    /// Queue assignment from the input descriptor.
    pub queue_id: Option<u32>,
    /// Instant of the first dispatch.
    pub first_run_time: Tick,
    /// Instant the last CPU slice ended.
    pub finish_time: Tick,
    /// Time from arrival to completion.
    pub turnaround_time: Tick,
    /// Time spent ready but not running.
    pub waiting_time: Tick,
    /// Time from arrival to first dispatch.
    pub response_time: Tick,
}
