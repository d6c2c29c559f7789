//! Software intersection platform.
//!
//! [`SimulatedViewport`] lays regions out on a vertical page and computes
//! intersection ratios against a scrollable viewport, delivering entries the
//! way a browser observer does: once when observation starts, then whenever
//! the region crosses one of its thresholds or starts/stops intersecting.

use super::visibility::{
    IntersectionEntry, IntersectionPlatform, ObservationHandle, ObserveOptions, RegionId,
    RootMargin, Unavailable,
};
use std::collections::BTreeMap;
use tracing::trace;

/// Axis-aligned box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of two boxes, or `None` if they are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        (right >= left && bottom >= top).then(|| Rect::new(left, top, right - left, bottom - top))
    }

    /// Grow (or shrink, for negative lengths) by a root margin.
    pub fn expand(&self, margin: &RootMargin) -> Rect {
        let top = margin.top.resolve(self.height);
        let bottom = margin.bottom.resolve(self.height);
        let left = margin.left.resolve(self.width);
        let right = margin.right.resolve(self.width);
        Rect::new(
            self.x - left,
            self.y - top,
            (self.width + left + right).max(0.0),
            (self.height + top + bottom).max(0.0),
        )
    }
}

/// Intersection of `target` with `root` after applying `margin`.
pub fn intersection_entry(target: &Rect, root: &Rect, margin: &RootMargin) -> IntersectionEntry {
    let root = root.expand(margin);
    match target.intersect(&root) {
        None => IntersectionEntry {
            ratio: 0.0,
            is_intersecting: false,
        },
        Some(overlap) => {
            let area = target.area();
            let ratio = if area > 0.0 {
                (overlap.area() / area).clamp(0.0, 1.0)
            } else {
                1.0
            };
            IntersectionEntry {
                ratio,
                is_intersecting: true,
            }
        }
    }
}

#[derive(Debug)]
struct Observation {
    region: RegionId,
    options: ObserveOptions,
    /// Last reported (intersecting, thresholds reached) pair.
    state: Option<(bool, usize)>,
}

/// Page layout plus a viewport that can be scrolled.
#[derive(Debug)]
pub struct SimulatedViewport {
    width: f64,
    height: f64,
    scroll_y: f64,
    layout: BTreeMap<RegionId, Rect>,
    observations: BTreeMap<u64, Observation>,
    next_id: u64,
}

impl SimulatedViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
            layout: BTreeMap::new(),
            observations: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Place a region on the page.
    pub fn place(&mut self, region: RegionId, rect: Rect) {
        self.layout.insert(region, rect);
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn observed_count(&self) -> usize {
        self.observations.len()
    }

    fn root(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    /// Scroll to `y` and collect entries for every observation whose state
    /// changed.
    pub fn scroll_to(&mut self, y: f64) -> Vec<(RegionId, IntersectionEntry)> {
        self.scroll_y = y.max(0.0);
        self.collect_entries()
    }

    /// Entries pending since the last call (initial entries after `observe`).
    pub fn collect_entries(&mut self) -> Vec<(RegionId, IntersectionEntry)> {
        let root = self.root();
        let mut out = Vec::new();
        for observation in self.observations.values_mut() {
            let Some(rect) = self.layout.get(&observation.region) else {
                continue;
            };
            let entry = intersection_entry(rect, &root, &observation.options.root_margin);
            let reached = if entry.is_intersecting {
                observation
                    .options
                    .thresholds
                    .as_slice()
                    .iter()
                    .filter(|t| entry.ratio >= **t)
                    .count()
            } else {
                0
            };
            let state = (entry.is_intersecting, reached);
            if observation.state != Some(state) {
                observation.state = Some(state);
                trace!(region = %observation.region, ratio = entry.ratio, "intersection entry");
                out.push((observation.region.clone(), entry));
            }
        }
        out
    }
}

impl IntersectionPlatform for SimulatedViewport {
    fn observe(
        &mut self,
        region: &RegionId,
        options: &ObserveOptions,
    ) -> Result<ObservationHandle, Unavailable> {
        let id = self.next_id;
        self.next_id += 1;
        self.observations.insert(
            id,
            Observation {
                region: region.clone(),
                options: options.clone(),
                state: None,
            },
        );
        Ok(ObservationHandle(id))
    }

    fn unobserve(&mut self, handle: ObservationHandle) {
        self.observations.remove(&handle.0);
    }
}
