//! Deterministic CPU-scheduling simulator for teaching and comparing
//! classic scheduling policies.
//!
//! A [`Simulator`] replays a set of [`Process`] descriptors under one
//! [`Algorithm`] — FCFS, SJF, SRTF, Round Robin, non-/preemptive Priority,
//! Multi-Queue or Multi-Level Feedback Queue — on a discrete virtual clock
//! and produces a gap-free execution [`Timeline`](models::Timeline) plus
//! per-process turnaround, waiting and response times. Runs are pure
//! functions of their input: no randomness, no wall-clock reads, identical
//! output for identical input.
//!
//! # Modules
//!
//! - **`models`**: domain types — [`Process`], [`ProcessReport`],
//!   [`Timeline`](models::Timeline), [`Algorithm`], [`QueueConfig`]
//! - **`policy`**: the [`Policy`](policy::Policy) selection trait and its
//!   seven implementations
//! - **`engine`**: the shared simulation clock, [`SimulationResult`] and
//!   aggregate [`RunStats`]
//! - **`validation`**: structural input checks for caller-side frontends
//! - **`playback`**: per-tick replay sessions over a completed timeline
//!
//! # Example
//!
//! ```
//! use schedsim::{Algorithm, Process, RunStats, Simulator};
//!
//! let processes = vec![
//!     Process::new(1, 0, 5),
//!     Process::new(2, 1, 3),
//!     Process::new(3, 2, 8),
//! ];
//!
//! let result = Simulator::new(Algorithm::Fcfs).run(&processes).unwrap();
//! assert_eq!(result.processes[2].finish_time, 16);
//!
//! let stats = RunStats::from_result(&result);
//! assert_eq!(stats.makespan, 16);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

pub mod engine;
pub mod models;
pub mod playback;
pub mod policy;
pub mod validation;

pub use engine::{RunStats, SimulationError, SimulationResult, Simulator};
pub use models::{Algorithm, Process, ProcessReport, QueueAlgorithm, QueueConfig, Tick};
pub use playback::{PlaybackSession, PlaybackStep, Speed};
