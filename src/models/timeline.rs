//! Timeline (execution trace) model.
//!
//! A timeline is the ordered record of who held the CPU when: one segment
//! per maximal interval during which the same process (or idleness) and the
//! same dispatching queue were active.
//!
//! # Invariants
//!
//! Maintained by [`Timeline::push`] for segments appended in clock order:
//! - segments are sorted by `start` and non-overlapping;
//! - each segment has `end > start`;
//! - adjacent segments with the same `(slot, queue_id)` are merged;
//! - a completed run covers `[0, last finish)` with no gaps (gaps are
//!   explicit [`CpuSlot::Idle`] segments).

use serde::{Deserialize, Serialize};

use super::process::Tick;

/// What the CPU was doing during a segment.
///
/// A tagged value rather than a sentinel id, so an idle interval can never
/// be confused with a real process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpuSlot {
    /// No admitted process had remaining work.
    Idle,
    /// The process with this id was executing.
    Running(u32),
}

impl CpuSlot {
    /// Whether this slot is idle.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, CpuSlot::Idle)
    }

    /// The running process id, if any.
    #[inline]
    pub fn process_id(&self) -> Option<u32> {
        match self {
            CpuSlot::Idle => None,
            CpuSlot::Running(id) => Some(*id),
        }
    }
}

/// A maximal interval attributed to one CPU slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Who held the CPU.
    pub slot: CpuSlot,
    /// Interval start (inclusive).
    pub start: Tick,
    /// Interval end (exclusive), always greater than `start`.
    pub end: Tick,
    /// 1-based rank of the dispatching queue, for queue-aware policies.
    /// `None` on idle segments and under single-queue policies.
    pub queue_id: Option<u32>,
    /// Human-readable explanation of the dispatch decision, consumed by
    /// playback frontends.
    pub reason: Option<String>,
}

impl TimelineSegment {
    /// Creates a running segment for the given process.
    pub fn running(process_id: u32, start: Tick, end: Tick) -> Self {
        Self {
            slot: CpuSlot::Running(process_id),
            start,
            end,
            queue_id: None,
            reason: None,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start: Tick, end: Tick) -> Self {
        Self {
            slot: CpuSlot::Idle,
            start,
            end,
            queue_id: None,
            reason: None,
        }
    }

    /// Sets the dispatching queue rank (1-based).
    pub fn with_queue(mut self, queue_id: u32) -> Self {
        self.queue_id = Some(queue_id);
        self
    }

    /// Sets the explanation text.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Segment duration in ticks.
    #[inline]
    pub fn duration(&self) -> Tick {
        self.end - self.start
    }
}

/// An append-only execution trace with automatic merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<TimelineSegment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment, merging it into the previous one when it
    /// continues the same `(slot, queue_id)` pair without a gap.
    ///
    /// On a merge the incoming reason replaces the stored one, so the text
    /// always describes the latest state of the run (e.g. "completed"
    /// rather than "selected").
    pub fn push(&mut self, segment: TimelineSegment) {
        debug_assert!(segment.end > segment.start);

        if let Some(last) = self.segments.last_mut() {
            debug_assert!(segment.start >= last.end);
            if last.end == segment.start
                && last.slot == segment.slot
                && last.queue_id == segment.queue_id
            {
                last.end = segment.end;
                if segment.reason.is_some() {
                    last.reason = segment.reason;
                }
                return;
            }
        }
        self.segments.push(segment);
    }

    /// Replaces the explanation on the most recent segment.
    ///
    /// Used by the engine to annotate a merged run once its outcome is
    /// known (completion, preemption).
    pub fn set_last_reason(&mut self, reason: impl Into<String>) {
        if let Some(last) = self.segments.last_mut() {
            last.reason = Some(reason.into());
        }
    }

    /// The recorded segments, in clock order.
    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline is empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End of the last segment, or 0 for an empty timeline.
    pub fn span(&self) -> Tick {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Total non-idle time.
    pub fn busy_time(&self) -> Tick {
        self.segments
            .iter()
            .filter(|s| !s.slot.is_idle())
            .map(|s| s.duration())
            .sum()
    }

    /// Total CPU time attributed to one process.
    pub fn busy_time_for(&self, process_id: u32) -> Tick {
        self.segments
            .iter()
            .filter(|s| s.slot.process_id() == Some(process_id))
            .map(|s| s.duration())
            .sum()
    }

    /// Whether the segments cover `[0, span)` without gaps or overlaps.
    pub fn is_contiguous(&self) -> bool {
        let mut cursor = 0;
        for s in &self.segments {
            if s.start != cursor || s.end <= s.start {
                return false;
            }
            cursor = s.end;
        }
        true
    }

    /// Whether any segment carries a queue annotation.
    ///
    /// Renderers use this to switch between single-row and per-queue
    /// Gantt layouts.
    pub fn has_queues(&self) -> bool {
        self.segments.iter().any(|s| s.queue_id.is_some())
    }
}
