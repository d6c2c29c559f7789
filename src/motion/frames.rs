//! Per-frame scheduling.
//!
//! [`FrameScheduler`] is the seam to the platform's "call me before the next
//! repaint" API. [`FrameClock`] is a deterministic implementation that ticks
//! at a fixed spacing, used by `simulate` and by tests. Real display refresh
//! is not exact; the fixed spacing is only a stand-in for it.

use std::collections::BTreeSet;

/// Opaque token for a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

/// Request and cancel next-frame callbacks.
pub trait FrameScheduler {
    /// Schedule one callback for the next frame.
    fn request_frame(&mut self) -> FrameHandle;
    /// Cancel a previously scheduled callback. Unknown or already-fired
    /// handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A frame that came due on a [`FrameClock`] tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DueFrame {
    pub handle: FrameHandle,
    pub timestamp_ms: f64,
}

/// Fixed-spacing frame clock.
///
/// Callbacks requested during one tick become due on the following tick,
/// matching how a browser defers callbacks requested inside a frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    spacing_ms: f64,
    now_ms: f64,
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
}

impl FrameClock {
    /// A clock starting at `t = 0` that advances `spacing_ms` per tick.
    /// Non-positive spacing falls back to ~60 fps.
    pub fn new(spacing_ms: f64) -> Self {
        let spacing_ms = if spacing_ms > 0.0 { spacing_ms } else { 1000.0 / 60.0 };
        Self {
            spacing_ms,
            now_ms: 0.0,
            next_id: 1,
            pending: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    #[inline]
    pub fn spacing_ms(&self) -> f64 {
        self.spacing_ms
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Advance one frame and drain every callback that was pending.
    pub fn tick(&mut self) -> Vec<DueFrame> {
        self.now_ms += self.spacing_ms;
        let timestamp_ms = self.now_ms;
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|handle| DueFrame {
                handle,
                timestamp_ms,
            })
            .collect()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(1000.0 / 60.0)
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_frames_fire_on_next_tick() {
        let mut clock = FrameClock::new(10.0);
        let a = clock.request_frame();
        let b = clock.request_frame();
        assert_ne!(a, b);

        let due = clock.tick();
        assert_eq!(due.len(), 2);
        assert!(due.iter().all(|f| f.timestamp_ms == 10.0));
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn cancelled_frames_never_fire() {
        let mut clock = FrameClock::new(10.0);
        let a = clock.request_frame();
        clock.cancel_frame(a);
        assert!(!clock.is_pending(a));
        assert!(clock.tick().is_empty());
    }

    #[test]
    fn cancel_unknown_handle_is_noop() {
        let mut clock = FrameClock::new(10.0);
        let a = clock.request_frame();
        clock.tick();
        clock.cancel_frame(a);
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn time_advances_by_spacing() {
        let mut clock = FrameClock::new(16.0);
        clock.tick();
        clock.tick();
        assert_eq!(clock.now_ms(), 32.0);
    }

    #[test]
    fn non_positive_spacing_falls_back() {
        let clock = FrameClock::new(0.0);
        assert!((clock.spacing_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }
}
