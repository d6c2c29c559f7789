//! Sticky visibility detection.
//!
//! A [`VisibilityDetector`] owns one region's intersection observation. It
//! registers with an [`IntersectionPlatform`] on mount, latches visible the
//! first time an update reports the region intersecting with a ratio of at
//! least [`VISIBLE_RATIO`], and releases the observation on unmount.
//!
//! The cutoff is fixed at 0.2 regardless of which configured threshold fired
//! the update. Lower ratios are ignored; nothing ever un-latches, so a
//! revealed section stays revealed when scrolled past.
//!
//! If the platform cannot observe at all, the detector fails open: it is
//! visible from the moment it mounts.

use super::latch::StickyLatch;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Minimum intersection ratio that latches a region visible.
pub const VISIBLE_RATIO: f64 = 0.2;

/// Identity of an observed page region (its element id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("thresholds must not be empty")]
    EmptyThresholds,
    #[error("threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),
    #[error("invalid root margin {0:?}: expected 1-4 lengths in px or %")]
    RootMargin(String),
}

/// Non-empty, sorted set of ratio fractions in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds(Vec<f64>);

impl Thresholds {
    pub fn new(mut values: Vec<f64>) -> Result<Self, OptionsError> {
        if values.is_empty() {
            return Err(OptionsError::EmptyThresholds);
        }
        if let Some(bad) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(OptionsError::ThresholdOutOfRange(*bad));
        }
        values.sort_by(f64::total_cmp);
        values.dedup();
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self(vec![0.0, 0.2, 0.5])
    }
}

/// One side of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginLength {
    Px(f64),
    /// Percent of the root box's width (left/right) or height (top/bottom).
    Percent(f64),
}

impl MarginLength {
    /// Resolve against the root box dimension this side is relative to.
    pub fn resolve(&self, basis: f64) -> f64 {
        match self {
            MarginLength::Px(px) => *px,
            MarginLength::Percent(pct) => basis * pct / 100.0,
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginLength::Px(v) => write!(f, "{v}px"),
            MarginLength::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for MarginLength {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(num) = s.strip_suffix("px") {
            num.parse().map(MarginLength::Px).map_err(|_| ())
        } else if let Some(num) = s.strip_suffix('%') {
            num.parse().map(MarginLength::Percent).map_err(|_| ())
        } else if s == "0" {
            Ok(MarginLength::Px(0.0))
        } else {
            Err(())
        }
    }
}

/// Signed offsets that grow (positive) or shrink (negative) the root box
/// before intersections are computed. Same shorthand as CSS `margin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl Default for RootMargin {
    /// `0px 0px -10% 0px`: a region counts only once it clears the bottom
    /// tenth of the viewport.
    fn default() -> Self {
        Self {
            top: MarginLength::Px(0.0),
            right: MarginLength::Px(0.0),
            bottom: MarginLength::Percent(-10.0),
            left: MarginLength::Px(0.0),
        }
    }
}

impl FromStr for RootMargin {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || OptionsError::RootMargin(s.to_string());
        let parts = s
            .split_whitespace()
            .map(|p| p.parse::<MarginLength>().map_err(|_| err()))
            .collect::<Result<Vec<_>, _>>()?;
        let (top, right, bottom, left) = match parts.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return Err(err()),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Thresholds and margin for one observation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObserveOptions {
    pub thresholds: Thresholds,
    pub root_margin: RootMargin,
}

/// An intersection update delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Token for a live observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationHandle(pub(crate) u64);

/// The platform has no intersection observation API.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("intersection observation is unavailable")]
pub struct Unavailable;

/// The platform's viewport-intersection API.
pub trait IntersectionPlatform {
    fn observe(
        &mut self,
        region: &RegionId,
        options: &ObserveOptions,
    ) -> Result<ObservationHandle, Unavailable>;

    fn unobserve(&mut self, handle: ObservationHandle);
}

/// A platform without intersection support. Every detector mounted on it
/// fails open.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIntersection;

impl IntersectionPlatform for NoIntersection {
    fn observe(&mut self, _: &RegionId, _: &ObserveOptions) -> Result<ObservationHandle, Unavailable> {
        Err(Unavailable)
    }

    fn unobserve(&mut self, _: ObservationHandle) {}
}

#[derive(Debug)]
pub struct VisibilityDetector {
    region: RegionId,
    handle: Option<ObservationHandle>,
    visible: StickyLatch,
}

impl VisibilityDetector {
    /// Start observing `region`. Observation begins immediately.
    pub fn mount<P: IntersectionPlatform + ?Sized>(
        region: RegionId,
        options: &ObserveOptions,
        platform: &mut P,
    ) -> Self {
        match platform.observe(&region, options) {
            Ok(handle) => Self {
                region,
                handle: Some(handle),
                visible: StickyLatch::new(),
            },
            Err(Unavailable) => {
                warn!(%region, "intersection observation unavailable, showing region");
                Self {
                    region,
                    handle: None,
                    visible: StickyLatch::tripped(),
                }
            }
        }
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub fn handle(&self) -> Option<ObservationHandle> {
        self.handle
    }

    /// The sticky signal: true once the region has been seen.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible.is_set()
    }

    /// Apply an intersection update. Returns `true` only for the update that
    /// latched the region visible.
    pub fn on_intersection(&mut self, entry: &IntersectionEntry) -> bool {
        if !(entry.is_intersecting && entry.ratio >= VISIBLE_RATIO) {
            return false;
        }
        let flipped = self.visible.trip();
        if flipped {
            debug!(region = %self.region, ratio = entry.ratio, "region latched visible");
        }
        flipped
    }

    /// Stop observing. Consumes the detector.
    pub fn unmount<P: IntersectionPlatform + ?Sized>(self, platform: &mut P) {
        if let Some(handle) = self.handle {
            platform.unobserve(handle);
            debug!(region = %self.region, "observation released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records observe/unobserve calls.
    #[derive(Default)]
    struct Recorder {
        next: u64,
        live: Vec<ObservationHandle>,
    }

    impl IntersectionPlatform for Recorder {
        fn observe(&mut self, _: &RegionId, _: &ObserveOptions) -> Result<ObservationHandle, Unavailable> {
            self.next += 1;
            let handle = ObservationHandle(self.next);
            self.live.push(handle);
            Ok(handle)
        }

        fn unobserve(&mut self, handle: ObservationHandle) {
            self.live.retain(|h| *h != handle);
        }
    }

    fn entry(ratio: f64, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            ratio,
            is_intersecting,
        }
    }

    fn mounted(platform: &mut Recorder) -> VisibilityDetector {
        VisibilityDetector::mount(RegionId::new("stats"), &ObserveOptions::default(), platform)
    }

    #[test]
    fn mount_begins_observation() {
        let mut platform = Recorder::default();
        let detector = mounted(&mut platform);
        assert_eq!(platform.live.len(), 1);
        assert!(!detector.is_visible());
    }

    #[test]
    fn below_cutoff_is_ignored() {
        let mut platform = Recorder::default();
        let mut detector = mounted(&mut platform);
        assert!(!detector.on_intersection(&entry(0.0, true)));
        assert!(!detector.on_intersection(&entry(0.19, true)));
        assert!(!detector.is_visible());
    }

    #[test]
    fn cutoff_requires_intersecting() {
        let mut platform = Recorder::default();
        let mut detector = mounted(&mut platform);
        assert!(!detector.on_intersection(&entry(0.5, false)));
        assert!(!detector.is_visible());
    }

    #[test]
    fn latches_at_cutoff_and_never_reverts() {
        let mut platform = Recorder::default();
        let mut detector = mounted(&mut platform);
        assert!(detector.on_intersection(&entry(0.2, true)));
        assert!(detector.is_visible());

        // Scrolled away, then back again.
        assert!(!detector.on_intersection(&entry(0.0, false)));
        assert!(detector.is_visible());
        assert!(!detector.on_intersection(&entry(0.9, true)));
        assert!(detector.is_visible());
    }

    #[test]
    fn flips_at_most_once_across_update_sequences() {
        let ratios = [0.0, 0.1, 0.25, 0.0, 0.6, 0.19, 1.0, 0.0];
        let mut platform = Recorder::default();
        let mut detector = mounted(&mut platform);
        let flips = ratios
            .iter()
            .filter(|r| detector.on_intersection(&entry(**r, **r > 0.0)))
            .count();
        assert_eq!(flips, 1);
        assert!(detector.is_visible());
    }

    #[test]
    fn unavailable_platform_fails_open() {
        let mut platform = NoIntersection;
        let mut detector =
            VisibilityDetector::mount(RegionId::new("about"), &ObserveOptions::default(), &mut platform);
        assert!(detector.is_visible());
        assert!(detector.handle().is_none());
        assert!(!detector.on_intersection(&entry(1.0, true)));
    }

    #[test]
    fn unmount_releases_observation() {
        let mut platform = Recorder::default();
        let detector = mounted(&mut platform);
        detector.unmount(&mut platform);
        assert!(platform.live.is_empty());
    }

    #[test]
    fn thresholds_validate_and_sort() {
        let t = Thresholds::new(vec![0.5, 0.0, 0.2, 0.2]).unwrap();
        assert_eq!(t.as_slice(), &[0.0, 0.2, 0.5]);
        assert_eq!(Thresholds::new(vec![]), Err(OptionsError::EmptyThresholds));
        assert_eq!(
            Thresholds::new(vec![1.5]),
            Err(OptionsError::ThresholdOutOfRange(1.5))
        );
    }

    #[test]
    fn root_margin_parses_css_shorthand() {
        let m: RootMargin = "0px 0px -10% 0px".parse().unwrap();
        assert_eq!(m, RootMargin::default());

        let one: RootMargin = "8px".parse().unwrap();
        assert_eq!(one.left, MarginLength::Px(8.0));
        assert_eq!(one.bottom, MarginLength::Px(8.0));

        let two: RootMargin = "0 5%".parse().unwrap();
        assert_eq!(two.top, MarginLength::Px(0.0));
        assert_eq!(two.right, MarginLength::Percent(5.0));
        assert_eq!(two.left, MarginLength::Percent(5.0));
    }

    #[test]
    fn root_margin_rejects_garbage() {
        assert!("".parse::<RootMargin>().is_err());
        assert!("10em".parse::<RootMargin>().is_err());
        assert!("1px 2px 3px 4px 5px".parse::<RootMargin>().is_err());
    }

    #[test]
    fn root_margin_display_roundtrips() {
        let m = RootMargin::default();
        assert_eq!(m.to_string(), "0px 0px -10% 0px");
        assert_eq!(m.to_string().parse::<RootMargin>().unwrap(), m);
    }

    #[test]
    fn margin_percent_resolves_against_basis() {
        assert_eq!(MarginLength::Percent(-10.0).resolve(800.0), -80.0);
        assert_eq!(MarginLength::Px(12.0).resolve(800.0), 12.0);
    }
}
