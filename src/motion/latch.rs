//! One-way boolean latch.
//!
//! A [`StickyLatch`] starts cleared and can be tripped exactly once. There is
//! no method that clears it again, so "visible once, visible forever" holds by
//! construction rather than by convention at every call site.

/// A boolean that can only move from `false` to `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickyLatch {
    set: bool,
}

impl StickyLatch {
    /// A cleared latch.
    pub const fn new() -> Self {
        Self { set: false }
    }

    /// A latch that is already tripped (used when failing open).
    pub const fn tripped() -> Self {
        Self { set: true }
    }

    /// Trip the latch. Returns `true` only on the call that flipped it.
    pub fn trip(&mut self) -> bool {
        let flipped = !self.set;
        self.set = true;
        flipped
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared() {
        assert!(!StickyLatch::new().is_set());
        assert!(!StickyLatch::default().is_set());
    }

    #[test]
    fn trip_reports_flip_only_once() {
        let mut latch = StickyLatch::new();
        assert!(latch.trip());
        assert!(!latch.trip());
        assert!(!latch.trip());
        assert!(latch.is_set());
    }

    #[test]
    fn tripped_constructor_never_flips() {
        let mut latch = StickyLatch::tripped();
        assert!(latch.is_set());
        assert!(!latch.trip());
    }
}
