//! Scheduling domain models.
//!
//! Core data types shared by the policies and the simulation engine:
//! process descriptors, execution timelines, and policy configuration.
//!
//! # Domain Mapping
//!
//! | schedsim | Textbook term |
//! |----------|---------------|
//! | [`Process`] | Process / job with arrival, burst, priority |
//! | [`TimelineSegment`] | Gantt chart block |
//! | [`CpuSlot`] | CPU occupancy (idle or a process) |
//! | [`Algorithm`] | Scheduling policy + parameters |
//! | [`QueueConfig`] | One level of an MQ/MLFQ hierarchy |

mod config;
mod process;
mod timeline;

pub use config::{Algorithm, ConfigError, QueueAlgorithm, QueueConfig};
pub use process::{Process, ProcessReport, Tick};
pub use timeline::{CpuSlot, Timeline, TimelineSegment};
