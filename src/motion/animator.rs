//! Eased count-up animation.
//!
//! A [`CounterAnimation`] is idle until [`start`](CounterAnimation::start) is
//! called, then advances one step per frame callback until its value reaches
//! the target. It runs at most once: the has-run flag is a [`StickyLatch`],
//! so a second `start` is a no-op that neither resets the value nor restarts
//! timing.
//!
//! ```text
//! frame 1          start_ms = timestamp, elapsed = 0
//! elapsed < delay  value stays 0, next frame requested
//! otherwise        p = min((elapsed - delay) / duration, 1)
//!                  value = floor(ease_in_out_quad(p) * target)
//! p == 1           value = target exactly, no more frames
//! ```
//!
//! Cancellation consumes the animation ([`CounterAnimation::cancel`]), so a
//! torn-down counter cannot receive further frames.

use super::easing::{delayed_progress, ease_in_out_quad};
use super::frames::{FrameHandle, FrameScheduler};
use super::latch::StickyLatch;
use tracing::{debug, trace};

/// Target and timing of one counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterTiming {
    pub target: u64,
    pub duration_ms: u64,
    pub delay_ms: u64,
}

/// Result of delivering a frame to an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUpdate {
    /// The frame was not the one this animation is waiting for.
    Stale,
    /// Still inside the start delay; value unchanged.
    Waiting,
    /// New displayed value; another frame has been requested.
    Progress(u64),
    /// Final value (always the target); no more frames.
    Finished(u64),
}

impl FrameUpdate {
    /// The displayed value carried by this update, if any.
    pub fn value(&self) -> Option<u64> {
        match self {
            FrameUpdate::Progress(v) | FrameUpdate::Finished(v) => Some(*v),
            FrameUpdate::Stale | FrameUpdate::Waiting => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CounterAnimation {
    timing: CounterTiming,
    value: u64,
    has_run: StickyLatch,
    start_ms: Option<f64>,
    frame: Option<FrameHandle>,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(timing: CounterTiming) -> Self {
        Self {
            timing,
            value: 0,
            has_run: StickyLatch::new(),
            start_ms: None,
            frame: None,
            finished: false,
        }
    }

    pub fn timing(&self) -> CounterTiming {
        self.timing
    }

    /// Currently displayed value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn has_run(&self) -> bool {
        self.has_run.is_set()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True while a frame callback is outstanding.
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Handle of the outstanding frame callback, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    /// Begin the animation. Returns `false` if it has already been started.
    ///
    /// A zero target completes immediately without scheduling any frame.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        if !self.has_run.trip() {
            trace!(target = self.timing.target, "counter already started, ignoring");
            return false;
        }
        if self.timing.target == 0 {
            self.finished = true;
            debug!("counter with zero target finished immediately");
            return true;
        }
        self.frame = Some(scheduler.request_frame());
        debug!(
            target = self.timing.target,
            duration_ms = self.timing.duration_ms,
            delay_ms = self.timing.delay_ms,
            "counter started"
        );
        true
    }

    /// Deliver a frame callback.
    ///
    /// Only the handle this animation is waiting for is accepted; anything
    /// else yields [`FrameUpdate::Stale`] and changes nothing.
    pub fn on_frame<S: FrameScheduler + ?Sized>(
        &mut self,
        handle: FrameHandle,
        timestamp_ms: f64,
        scheduler: &mut S,
    ) -> FrameUpdate {
        if self.frame != Some(handle) {
            return FrameUpdate::Stale;
        }
        self.frame = None;

        let start_ms = *self.start_ms.get_or_insert(timestamp_ms);
        let elapsed = timestamp_ms - start_ms;
        let progress = delayed_progress(
            elapsed,
            self.timing.delay_ms as f64,
            self.timing.duration_ms as f64,
        );

        match progress {
            None => {
                self.frame = Some(scheduler.request_frame());
                FrameUpdate::Waiting
            }
            Some(p) if p >= 1.0 => {
                // Forced: floor(eased * target) can undershoot by one.
                self.value = self.timing.target;
                self.finished = true;
                debug!(target = self.timing.target, elapsed, "counter finished");
                FrameUpdate::Finished(self.value)
            }
            Some(p) => {
                let eased = ease_in_out_quad(p);
                let next = (eased * self.timing.target as f64).floor() as u64;
                self.value = next.clamp(self.value, self.timing.target);
                self.frame = Some(scheduler.request_frame());
                FrameUpdate::Progress(self.value)
            }
        }
    }

    /// Tear the animation down, releasing any outstanding frame callback.
    /// Returns the last displayed value.
    pub fn cancel<S: FrameScheduler + ?Sized>(self, scheduler: &mut S) -> u64 {
        if let Some(handle) = self.frame {
            scheduler.cancel_frame(handle);
            debug!(value = self.value, "counter cancelled mid-run");
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::frames::FrameClock;
    use crate::test_helpers::{assert_non_decreasing, run_counter};

    fn timing(target: u64, duration_ms: u64, delay_ms: u64) -> CounterTiming {
        CounterTiming {
            target,
            duration_ms,
            delay_ms,
        }
    }

    #[test]
    fn idle_until_started() {
        let mut clock = FrameClock::new(16.0);
        let anim = CounterAnimation::new(timing(10, 100, 0));
        assert_eq!(anim.value(), 0);
        assert!(!anim.is_running());
        assert!(clock.tick().is_empty());
    }

    #[test]
    fn scenario_clients_counter() {
        // 50 ms spacing lands exactly on the interesting timestamps; the
        // first frame (t = 50) becomes the start time.
        let mut clock = FrameClock::new(50.0);
        let mut anim = CounterAnimation::new(timing(500, 1500, 200));
        assert!(anim.start(&mut clock));

        let mut seen = Vec::new();
        while !anim.is_finished() {
            for due in clock.tick() {
                let update = anim.on_frame(due.handle, due.timestamp_ms, &mut clock);
                seen.push((due.timestamp_ms - 50.0, update));
            }
        }

        let at = |elapsed: f64| {
            seen.iter()
                .find(|(e, _)| *e == elapsed)
                .map(|(_, u)| *u)
                .unwrap()
        };
        assert_eq!(at(100.0), FrameUpdate::Waiting);
        assert_eq!(at(200.0), FrameUpdate::Progress(0));
        assert_eq!(at(950.0), FrameUpdate::Progress(250));
        assert_eq!(at(1700.0), FrameUpdate::Finished(500));
        assert_eq!(anim.value(), 500);
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn values_are_monotonic_and_end_on_target() {
        for (target, duration, delay) in [(500, 1500, 200), (98, 1800, 400), (10, 1200, 600), (1, 1, 0), (7, 33, 5)] {
            let values = run_counter(timing(target, duration, delay), 16.0);
            assert_eq!(values.first(), Some(&0));
            assert_eq!(values.last(), Some(&target));
            assert_non_decreasing(&values);
            assert!(values.iter().all(|v| *v <= target));
        }
    }

    #[test]
    fn zero_target_is_just_zero() {
        let values = run_counter(timing(0, 1000, 200), 16.0);
        assert_eq!(values, vec![0]);
    }

    #[test]
    fn zero_target_schedules_nothing() {
        let mut clock = FrameClock::new(16.0);
        let mut anim = CounterAnimation::new(timing(0, 1000, 0));
        assert!(anim.start(&mut clock));
        assert!(anim.is_finished());
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn tiny_duration_finishes_on_first_post_delay_frame() {
        let mut clock = FrameClock::new(16.0);
        let mut anim = CounterAnimation::new(timing(42, 1, 0));
        anim.start(&mut clock);
        // First frame: elapsed 0, progress 0.
        let first = clock.tick()[0];
        assert_eq!(
            anim.on_frame(first.handle, first.timestamp_ms, &mut clock),
            FrameUpdate::Progress(0)
        );
        let second = clock.tick()[0];
        assert_eq!(
            anim.on_frame(second.handle, second.timestamp_ms, &mut clock),
            FrameUpdate::Finished(42)
        );
    }

    #[test]
    fn second_start_is_ignored() {
        let mut clock = FrameClock::new(100.0);
        let mut anim = CounterAnimation::new(timing(100, 300, 0));
        assert!(anim.start(&mut clock));
        for _ in 0..3 {
            for due in clock.tick() {
                anim.on_frame(due.handle, due.timestamp_ms, &mut clock);
            }
        }
        let mid = anim.value();
        assert!(mid > 0);

        assert!(!anim.start(&mut clock));
        assert_eq!(anim.value(), mid);
        assert_eq!(clock.pending_count(), 1);
    }

    #[test]
    fn restart_after_completion_keeps_target() {
        let mut clock = FrameClock::new(16.0);
        let mut anim = CounterAnimation::new(timing(20, 100, 0));
        anim.start(&mut clock);
        while !anim.is_finished() {
            for due in clock.tick() {
                anim.on_frame(due.handle, due.timestamp_ms, &mut clock);
            }
        }
        assert!(!anim.start(&mut clock));
        assert_eq!(anim.value(), 20);
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn stale_handles_change_nothing() {
        let mut clock = FrameClock::new(16.0);
        let mut other = CounterAnimation::new(timing(5, 100, 0));
        let mut anim = CounterAnimation::new(timing(5, 100, 0));
        other.start(&mut clock);
        anim.start(&mut clock);
        let foreign = other.pending_frame().unwrap();
        assert_eq!(anim.on_frame(foreign, 16.0, &mut clock), FrameUpdate::Stale);
        assert!(anim.is_running());
    }

    #[test]
    fn cancel_releases_pending_frame() {
        let mut clock = FrameClock::new(16.0);
        let mut anim = CounterAnimation::new(timing(500, 1500, 0));
        anim.start(&mut clock);
        for _ in 0..10 {
            for due in clock.tick() {
                anim.on_frame(due.handle, due.timestamp_ms, &mut clock);
            }
        }
        assert_eq!(clock.pending_count(), 1);
        let last = anim.cancel(&mut clock);
        assert!(last < 500);
        assert_eq!(clock.pending_count(), 0);
        assert!(clock.tick().is_empty());
    }
}
