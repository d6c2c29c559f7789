//! View-driven animation core.
//!
//! Everything here is deterministic and clock-driven: platform APIs sit
//! behind two traits, so the same state machines run against a browser-like
//! simulation in `simulate` and in tests.
//!
//! ## Building blocks
//! - [`latch`] - one-way boolean
//! - [`easing`] - ease-in-out curve and delayed progress
//! - [`frames`] - per-frame scheduling seam and a fixed-spacing clock
//! - [`visibility`] - sticky visibility detector and observation options
//! - [`viewport`] - software intersection platform
//!
//! ## Composed
//! - [`animator`] - eased count-up, runs once
//! - [`rotator`] - hero background rotation
//! - [`region`] - reveal and counter region lifecycles
//!
//! Single-threaded by construction: nothing here is `Sync`-dependent and no
//! state is shared between regions.

pub mod easing;
pub mod frames;
pub mod latch;
pub mod viewport;
pub mod visibility;

pub mod animator;
pub mod region;
pub mod rotator;

pub use animator::{CounterAnimation, CounterTiming, FrameUpdate};
pub use frames::{DueFrame, FrameClock, FrameHandle, FrameScheduler};
pub use latch::StickyLatch;
pub use region::{CounterRegion, CounterSuffix, RevealRegion};
pub use rotator::BackgroundRotator;
pub use viewport::{Rect, SimulatedViewport};
pub use visibility::{
    IntersectionEntry, IntersectionPlatform, NoIntersection, ObserveOptions, RegionId,
    RootMargin, Thresholds, VISIBLE_RATIO, VisibilityDetector,
};
