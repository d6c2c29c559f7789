//! Hero background rotation.
//!
//! A fixed, ordered set of slides advances on a wall-clock interval and wraps
//! modulo its length. Selecting a slide (an indicator click) jumps to it; the
//! interval keeps its phase, so the next automatic advance still happens on
//! the original schedule.

use tracing::debug;

#[derive(Debug, Clone)]
pub struct BackgroundRotator {
    len: usize,
    interval_ms: u64,
    active: usize,
    next_switch_ms: u64,
    changes: u64,
}

impl BackgroundRotator {
    /// Returns `None` for an empty slide set or a zero interval.
    pub fn new(len: usize, interval_ms: u64) -> Option<Self> {
        if len == 0 || interval_ms == 0 {
            return None;
        }
        Some(Self {
            len,
            interval_ms,
            active: 0,
            next_switch_ms: interval_ms,
            changes: 0,
        })
    }

    #[inline]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Number of slides. Never zero.
    pub fn slide_count(&self) -> usize {
        self.len
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Number of index changes so far, automatic and selected.
    pub fn changes(&self) -> u64 {
        self.changes
    }

    /// Run every interval tick up to and including `now_ms`. Returns the
    /// indices switched to, in order.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<usize> {
        let mut switched = Vec::new();
        while self.next_switch_ms <= now_ms {
            self.active = (self.active + 1) % self.len;
            self.changes += 1;
            switched.push(self.active);
            debug!(at_ms = self.next_switch_ms, slide = self.active, "hero slide advanced");
            self.next_switch_ms += self.interval_ms;
        }
        switched
    }

    /// Jump to `index`. Returns `false` if it is out of range or already
    /// active.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len || index == self.active {
            return false;
        }
        self.active = index;
        self.changes += 1;
        true
    }
}
