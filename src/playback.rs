//! Step-by-step playback over a completed timeline.
//!
//! Replay frontends animate a run one time unit at a time. This module
//! expands a timeline into per-tick [`PlaybackStep`]s and wraps them in a
//! [`PlaybackSession`] value holding the cursor, speed and pause flag.
//!
//! A session is an independent value constructed from an immutable result:
//! it cannot mutate or re-trigger the engine, and several sessions over
//! the same result can run concurrently without synchronization. The
//! caller drives the cadence (e.g. a UI timer using [`Speed::delay_ms`]);
//! nothing here reads a clock.

use serde::{Deserialize, Serialize};

use crate::engine::SimulationResult;
use crate::models::{CpuSlot, Tick, Timeline};

/// One time unit of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStep {
    /// The tick this step covers (`[time, time + 1)`).
    pub time: Tick,
    /// Who held the CPU during this tick.
    pub slot: CpuSlot,
    /// 1-based rank of the dispatching queue, if any.
    pub queue_id: Option<u32>,
    /// Explanation text from the originating segment.
    pub reason: Option<String>,
}

/// Replay speed levels, slowest to fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speed {
    /// 0.25x
    Quarter,
    /// 0.5x
    Half,
    /// 1x
    Normal,
    /// 1.5x
    OneAndHalf,
    /// 2x
    Double,
}

impl Speed {
    /// Suggested delay between steps for a UI timer, in milliseconds.
    pub fn delay_ms(&self) -> u64 {
        match self {
            Speed::Quarter => 4000,
            Speed::Half => 2000,
            Speed::Normal => 1000,
            Speed::OneAndHalf => 667,
            Speed::Double => 500,
        }
    }
}

/// A replay cursor over an expanded timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSession {
    steps: Vec<PlaybackStep>,
    cursor: usize,
    speed: Speed,
    paused: bool,
}

impl PlaybackSession {
    /// Builds a session from a completed result.
    pub fn new(result: &SimulationResult) -> Self {
        Self::from_timeline(&result.timeline)
    }

    /// Builds a session from a timeline.
    ///
    /// Each segment is expanded into one step per tick. The timeline's
    /// gap-free invariant means the steps cover `[0, span)` contiguously.
    pub fn from_timeline(timeline: &Timeline) -> Self {
        let mut steps = Vec::with_capacity(timeline.span() as usize);
        for segment in timeline.segments() {
            for time in segment.start..segment.end {
                steps.push(PlaybackStep {
                    time,
                    slot: segment.slot,
                    queue_id: segment.queue_id,
                    reason: segment.reason.clone(),
                });
            }
        }
        Self {
            steps,
            cursor: 0,
            speed: Speed::Normal,
            paused: false,
        }
    }

    /// Sets the replay speed.
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// The expanded steps.
    pub fn steps(&self) -> &[PlaybackStep] {
        &self.steps
    }

    /// Current speed.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Changes the speed mid-replay.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Whether the session is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggles the pause flag and returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Whether every step has been consumed.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// The step the cursor is on, without advancing.
    pub fn current(&self) -> Option<&PlaybackStep> {
        self.steps.get(self.cursor)
    }

    /// Yields the next step and advances the cursor.
    ///
    /// Returns `None` while paused or once the replay is exhausted.
    pub fn advance(&mut self) -> Option<&PlaybackStep> {
        if self.paused {
            return None;
        }
        let step = self.steps.get(self.cursor)?;
        self.cursor += 1;
        Some(step)
    }

    /// Moves the cursor to the step covering the given time (clamped to
    /// the end of the replay).
    pub fn seek(&mut self, time: Tick) {
        self.cursor = (time as usize).min(self.steps.len());
    }

    /// Rewinds to the start and clears the pause flag.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Simulator;
    use crate::models::{Algorithm, Process};

    fn sample_result() -> SimulationResult {
        Simulator::new(Algorithm::Fcfs)
            .run(&[Process::new(1, 0, 2), Process::new(2, 5, 1)])
            .unwrap()
    }

    #[test]
    fn test_expansion_covers_every_tick() {
        let session = PlaybackSession::new(&sample_result());
        // [0,2) running, [2,5) idle, [5,6) running.
        assert_eq!(session.steps().len(), 6);
        for (expected, step) in session.steps().iter().enumerate() {
            assert_eq!(step.time as usize, expected);
        }
        assert_eq!(session.steps()[0].slot, CpuSlot::Running(1));
        assert!(session.steps()[3].slot.is_idle());
        assert_eq!(session.steps()[5].slot, CpuSlot::Running(2));
    }

    #[test]
    fn test_steps_inherit_segment_annotations() {
        let session = PlaybackSession::new(&sample_result());
        // Every expanded step of an idle segment carries its reason.
        assert_eq!(
            session.steps()[2].reason.as_deref(),
            Some("CPU is idle (no ready processes).")
        );
    }

    #[test]
    fn test_advance_walks_to_completion() {
        let mut session = PlaybackSession::new(&sample_result());
        let mut count = 0;
        while session.advance().is_some() {
            count += 1;
        }
        assert_eq!(count, 6);
        assert!(session.is_finished());
        assert!(session.advance().is_none());
    }

    #[test]
    fn test_pause_blocks_advance() {
        let mut session = PlaybackSession::new(&sample_result());
        assert!(session.toggle_pause());
        assert!(session.advance().is_none());
        assert_eq!(session.current().map(|s| s.time), Some(0));

        assert!(!session.toggle_pause());
        assert!(session.advance().is_some());
    }

    #[test]
    fn test_seek_and_reset() {
        let mut session = PlaybackSession::new(&sample_result());
        session.seek(5);
        assert_eq!(session.current().map(|s| s.time), Some(5));

        session.seek(99);
        assert!(session.is_finished());

        session.reset();
        assert_eq!(session.current().map(|s| s.time), Some(0));
    }

    #[test]
    fn test_sessions_are_independent() {
        let result = sample_result();
        let mut a = PlaybackSession::new(&result).with_speed(Speed::Double);
        let b = PlaybackSession::new(&result);

        a.advance();
        a.advance();
        assert_eq!(a.current().map(|s| s.time), Some(2));
        assert_eq!(b.current().map(|s| s.time), Some(0));
        assert_eq!(b.speed(), Speed::Normal);
    }

    #[test]
    fn test_speed_delays_are_monotonic() {
        let speeds = [
            Speed::Quarter,
            Speed::Half,
            Speed::Normal,
            Speed::OneAndHalf,
            Speed::Double,
        ];
        for pair in speeds.windows(2) {
            assert!(pair[0].delay_ms() > pair[1].delay_ms());
        }
    }
}
