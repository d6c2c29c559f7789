//! Region lifecycles: the glue between detectors and animators.
//!
//! A [`RevealRegion`] is a page section that fades in once seen. A
//! [`CounterRegion`] pairs its own detector with a [`CounterAnimation`] that
//! starts when the detector latches. Both are torn down by value through
//! `unmount`, which releases the observation and any pending frame.

use super::animator::{CounterAnimation, CounterTiming, FrameUpdate};
use super::frames::{FrameHandle, FrameScheduler};
use super::visibility::{
    IntersectionEntry, IntersectionPlatform, ObserveOptions, RegionId, VisibilityDetector,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a counter value is rendered. Purely presentational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterSuffix {
    /// `500`
    #[default]
    None,
    /// `500+`
    Plus,
    /// `98%`
    Percent,
}

impl CounterSuffix {
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterSuffix::None => "",
            CounterSuffix::Plus => "+",
            CounterSuffix::Percent => "%",
        }
    }

    pub fn render(&self, value: u64) -> String {
        format!("{value}{}", self.as_str())
    }
}

impl fmt::Display for CounterSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A section that is revealed once and stays revealed.
#[derive(Debug)]
pub struct RevealRegion {
    detector: VisibilityDetector,
}

impl RevealRegion {
    pub fn mount<P: IntersectionPlatform + ?Sized>(
        region: RegionId,
        options: &ObserveOptions,
        platform: &mut P,
    ) -> Self {
        Self {
            detector: VisibilityDetector::mount(region, options, platform),
        }
    }

    pub fn region(&self) -> &RegionId {
        self.detector.region()
    }

    pub fn is_revealed(&self) -> bool {
        self.detector.is_visible()
    }

    /// Returns `true` for the update that revealed the section.
    pub fn on_intersection(&mut self, entry: &IntersectionEntry) -> bool {
        self.detector.on_intersection(entry)
    }

    pub fn unmount<P: IntersectionPlatform + ?Sized>(self, platform: &mut P) {
        self.detector.unmount(platform);
    }
}

/// An animated counter with its own visibility detector.
#[derive(Debug)]
pub struct CounterRegion {
    detector: VisibilityDetector,
    animation: CounterAnimation,
    suffix: CounterSuffix,
}

impl CounterRegion {
    /// Mount and begin observing. If the detector failed open, the animation
    /// starts right away.
    pub fn mount<P, S>(
        region: RegionId,
        options: &ObserveOptions,
        timing: CounterTiming,
        suffix: CounterSuffix,
        platform: &mut P,
        scheduler: &mut S,
    ) -> Self
    where
        P: IntersectionPlatform + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let detector = VisibilityDetector::mount(region, options, platform);
        let mut animation = CounterAnimation::new(timing);
        if detector.is_visible() {
            animation.start(scheduler);
        }
        Self {
            detector,
            animation,
            suffix,
        }
    }

    pub fn region(&self) -> &RegionId {
        self.detector.region()
    }

    pub fn is_visible(&self) -> bool {
        self.detector.is_visible()
    }

    pub fn value(&self) -> u64 {
        self.animation.value()
    }

    pub fn is_finished(&self) -> bool {
        self.animation.is_finished()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.animation.pending_frame()
    }

    /// Rendered value, e.g. `"98%"`.
    pub fn display(&self) -> String {
        self.suffix.render(self.animation.value())
    }

    /// Apply an intersection update; starts the animation when the region
    /// first becomes visible. Returns `true` if this update started it.
    pub fn on_intersection<S: FrameScheduler + ?Sized>(
        &mut self,
        entry: &IntersectionEntry,
        scheduler: &mut S,
    ) -> bool {
        if self.detector.on_intersection(entry) {
            return self.animation.start(scheduler);
        }
        false
    }

    pub fn on_frame<S: FrameScheduler + ?Sized>(
        &mut self,
        handle: FrameHandle,
        timestamp_ms: f64,
        scheduler: &mut S,
    ) -> FrameUpdate {
        self.animation.on_frame(handle, timestamp_ms, scheduler)
    }

    /// Release the observation and cancel any pending frame. Returns the last
    /// displayed value.
    pub fn unmount<P, S>(self, platform: &mut P, scheduler: &mut S) -> u64
    where
        P: IntersectionPlatform + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        self.detector.unmount(platform);
        self.animation.cancel(scheduler)
    }
}
