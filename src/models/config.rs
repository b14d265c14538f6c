//! Policy selection and queue configuration.
//!
//! The scheduling policy and its parameters form a closed set of variants:
//! an algorithm that needs a quantum carries it in its variant, and queue
//! configurations are validated when a run is set up, never matched against
//! free-form strings at dispatch time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::process::Tick;

/// Per-queue scheduling discipline for multi-queue policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueAlgorithm {
    /// First Come First Served: earliest arrival, run to completion.
    Fcfs,
    /// Shortest Job First: smallest burst, run to completion.
    Sjf,
    /// Shortest Remaining Time First: re-evaluated every tick.
    Srtf,
    /// Round Robin: FIFO order with a quantum slice.
    RoundRobin,
    /// Non-preemptive priority: smallest priority value, run to completion.
    Priority,
}

impl QueueAlgorithm {
    /// Short display name ("FCFS", "RR", ...).
    pub fn name(&self) -> &'static str {
        match self {
            QueueAlgorithm::Fcfs => "FCFS",
            QueueAlgorithm::Sjf => "SJF",
            QueueAlgorithm::Srtf => "SRTF",
            QueueAlgorithm::RoundRobin => "RR",
            QueueAlgorithm::Priority => "PRIORITY",
        }
    }
}

/// Configuration of one queue in an MQ or MLFQ setup.
///
/// Queue rank is positional: index 0 in the queue list is the highest
/// priority. Under MLFQ the `algorithm` field is ignored (dispatch is
/// head-of-line by definition) and `quantum` is the demotion threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Discipline used to pick a process within this queue.
    pub algorithm: QueueAlgorithm,
    /// Time slice (Round Robin) or demotion threshold (MLFQ).
    pub quantum: Option<Tick>,
}

impl QueueConfig {
    /// Creates a queue configuration without a quantum.
    pub fn new(algorithm: QueueAlgorithm) -> Self {
        Self {
            algorithm,
            quantum: None,
        }
    }

    /// Sets the quantum.
    pub fn with_quantum(mut self, quantum: Tick) -> Self {
        self.quantum = Some(quantum);
        self
    }
}

/// A scheduling policy selection with its required parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// First Come First Served.
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Shortest Remaining Time First (preemptive SJF).
    Srtf,
    /// Round Robin with the given time quantum.
    RoundRobin {
        /// Maximum contiguous slice per dispatch (> 0).
        quantum: Tick,
    },
    /// Priority scheduling; lower priority value wins.
    Priority {
        /// Whether a strictly better arrival preempts the running process.
        preemptive: bool,
    },
    /// Multiple queues with fixed process assignment.
    MultiQueue {
        /// Queue configurations, index 0 = highest priority.
        queues: Vec<QueueConfig>,
    },
    /// Multi-level feedback queues with quantum-exhaustion demotion.
    MultiLevelFeedback {
        /// Queue configurations, index 0 = highest priority. Every queue
        /// needs a positive quantum (its demotion threshold).
        queues: Vec<QueueConfig>,
    },
}

impl Algorithm {
    /// Full display name, as shown in result headers.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First Come First Served (FCFS)",
            Algorithm::Sjf => "Shortest Job First (Non-preemptive)",
            Algorithm::Srtf => "Shortest Remaining Time First (Preemptive)",
            Algorithm::RoundRobin { .. } => "Round Robin",
            Algorithm::Priority { preemptive: false } => "Priority (Non-preemptive)",
            Algorithm::Priority { preemptive: true } => "Priority (Preemptive)",
            Algorithm::MultiQueue { .. } => "Multiple Queue Scheduling",
            Algorithm::MultiLevelFeedback { .. } => "Multilevel Feedback Queue Scheduling",
        }
    }

    /// Checks that every required parameter is present and positive.
    ///
    /// Called by the engine before any simulation state is built, so a
    /// misconfigured run fails fast instead of silently defaulting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Algorithm::Fcfs | Algorithm::Sjf | Algorithm::Srtf | Algorithm::Priority { .. } => {
                Ok(())
            }
            Algorithm::RoundRobin { quantum } => {
                if *quantum == 0 {
                    Err(ConfigError::ZeroQuantum)
                } else {
                    Ok(())
                }
            }
            Algorithm::MultiQueue { queues } => {
                if queues.is_empty() {
                    return Err(ConfigError::EmptyQueueSet);
                }
                for (rank, queue) in queues.iter().enumerate() {
                    if queue.algorithm == QueueAlgorithm::RoundRobin {
                        check_queue_quantum(rank, queue.quantum)?;
                    } else if queue.quantum == Some(0) {
                        return Err(ConfigError::InvalidQueueQuantum { queue: rank + 1 });
                    }
                }
                Ok(())
            }
            Algorithm::MultiLevelFeedback { queues } => {
                if queues.is_empty() {
                    return Err(ConfigError::EmptyQueueSet);
                }
                // Every MLFQ level needs a demotion threshold.
                for (rank, queue) in queues.iter().enumerate() {
                    check_queue_quantum(rank, queue.quantum)?;
                }
                Ok(())
            }
        }
    }
}

fn check_queue_quantum(rank: usize, quantum: Option<Tick>) -> Result<(), ConfigError> {
    match quantum {
        None => Err(ConfigError::MissingQueueQuantum { queue: rank + 1 }),
        Some(0) => Err(ConfigError::InvalidQueueQuantum { queue: rank + 1 }),
        Some(_) => Ok(()),
    }
}

/// An unsupported or incomplete policy configuration.
///
/// Queue numbers in messages are 1-based, matching the numbering shown to
/// users by configuration frontends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Round Robin was selected with a zero quantum.
    #[error("round robin requires a positive time quantum")]
    ZeroQuantum,
    /// A multi-queue policy was configured with no queues.
    #[error("at least one queue must be configured")]
    EmptyQueueSet,
    /// A queue that needs a quantum was configured without one.
    #[error("queue {queue}: a positive quantum is required")]
    MissingQueueQuantum {
        /// 1-based rank of the offending queue.
        queue: usize,
    },
    /// A queue was configured with a zero quantum.
    #[error("queue {queue}: quantum must be positive")]
    InvalidQueueQuantum {
        /// 1-based rank of the offending queue.
        queue: usize,
    },
}
