//! Headless run of the page's motion.
//!
//! Lays the configured sections out on a [`SimulatedViewport`], scrolls it a
//! fixed distance per frame, and drives every reveal region and counter with
//! a [`FrameClock`] until all counters settle. The hero rotator runs on its
//! own wall clock for a fixed span.
//!
//! The browser script mirrors these state machines, so `salon-page simulate`
//! shows what a config's timings look like without opening a browser.

use crate::config::{ConfigError, SiteConfig};
use crate::motion::{
    BackgroundRotator, CounterRegion, FrameClock, FrameUpdate, Rect, RegionId, RevealRegion,
    SimulatedViewport,
};
use crate::types::Section;
use tracing::debug;

const HERO_HEIGHT: f64 = 800.0;
const SECTION_HEIGHT: f64 = 640.0;
/// Offset of the counter row inside the stats section.
const COUNTER_TOP: f64 = 200.0;
const COUNTER_HEIGHT: f64 = 120.0;
const COUNTER_WIDTH: f64 = 300.0;

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Milliseconds between frames.
    pub frame_ms: f64,
    /// Wall-clock span the rotator runs for.
    pub rotator_ms: u64,
    /// Pixels scrolled per frame until the page bottom.
    pub scroll_step: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Safety cap on frames.
    pub max_frames: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            frame_ms: 1000.0 / 60.0,
            rotator_ms: 12_500,
            scroll_step: 40.0,
            viewport_width: 1280.0,
            viewport_height: 800.0,
            max_frames: 10_000,
        }
    }
}

/// One displayed value at a frame timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub at_ms: f64,
    pub value: u64,
}

#[derive(Debug, Clone)]
pub struct CounterTrace {
    pub id: String,
    pub label: String,
    /// Clock time at which the region latched visible.
    pub visible_at_ms: Option<f64>,
    pub finished_at_ms: Option<f64>,
    pub samples: Vec<Sample>,
    /// Rendered final value, e.g. `"98%"`.
    pub display: String,
}

impl CounterTrace {
    pub fn values(&self) -> Vec<u64> {
        self.samples.iter().map(|s| s.value).collect()
    }
}

#[derive(Debug, Clone)]
pub struct RevealTrace {
    pub id: String,
    /// Scroll offset at which the section latched visible.
    pub revealed_at_scroll: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct RotatorTrace {
    pub span_ms: u64,
    pub interval_ms: u64,
    pub slides: usize,
    /// `(time, index switched to)` in order.
    pub switches: Vec<(u64, usize)>,
    pub active: usize,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub frame_ms: f64,
    pub frames: usize,
    pub counters: Vec<CounterTrace>,
    pub reveals: Vec<RevealTrace>,
    pub rotator: Option<RotatorTrace>,
}

impl SimulationReport {
    pub fn all_settled(&self) -> bool {
        self.counters.iter().all(|c| c.finished_at_ms.is_some())
    }
}

fn section_rect(index: usize, width: f64) -> Rect {
    // Hero is section 0.
    let top = HERO_HEIGHT + (index as f64 - 1.0) * SECTION_HEIGHT;
    Rect::new(0.0, top, width, SECTION_HEIGHT)
}

/// Run the simulation for `config`.
pub fn simulate(
    config: &SiteConfig,
    options: &SimulationOptions,
) -> Result<SimulationReport, ConfigError> {
    let observe = config.motion.observe_options()?;
    let mut viewport = SimulatedViewport::new(options.viewport_width, options.viewport_height);
    let mut clock = FrameClock::new(options.frame_ms);

    let mut stats_top = 0.0;
    let mut reveals = Vec::new();
    let mut reveal_traces = Vec::new();
    for (index, section) in Section::ALL.iter().enumerate() {
        let rect = section_rect(index, options.viewport_width);
        if *section == Section::Stats {
            stats_top = rect.y;
        }
        if !section.reveals() {
            continue;
        }
        let region = RegionId::new(section.id());
        viewport.place(region.clone(), rect);
        reveals.push(RevealRegion::mount(region, &observe, &mut viewport));
        reveal_traces.push(RevealTrace {
            id: section.id().to_string(),
            revealed_at_scroll: None,
        });
    }
    let page_bottom = section_rect(Section::ALL.len(), options.viewport_width).y;

    // Counters wrap into rows so none lands outside the viewport's width.
    let per_row = ((options.viewport_width / COUNTER_WIDTH).floor() as usize).max(1);
    let mut content_bottom = page_bottom;
    let mut counters = Vec::new();
    let mut traces = Vec::new();
    for (i, counter) in config.stats.counters.iter().enumerate() {
        let region = RegionId::new(counter.region_id());
        let rect = Rect::new(
            (i % per_row) as f64 * COUNTER_WIDTH,
            stats_top + COUNTER_TOP + (i / per_row) as f64 * COUNTER_HEIGHT,
            COUNTER_WIDTH,
            COUNTER_HEIGHT,
        );
        content_bottom = f64::max(content_bottom, rect.y + rect.height);
        viewport.place(region.clone(), rect);
        counters.push(CounterRegion::mount(
            region,
            &observe,
            counter.timing(),
            counter.suffix,
            &mut viewport,
            &mut clock,
        ));
        traces.push(CounterTrace {
            id: counter.id.clone(),
            label: counter.label.clone(),
            visible_at_ms: None,
            finished_at_ms: None,
            samples: Vec::new(),
            display: String::new(),
        });
    }

    let max_scroll = (content_bottom - options.viewport_height).max(0.0);
    let mut scroll = 0.0;
    let mut entries = viewport.collect_entries();
    let mut frames = 0;

    loop {
        let now = clock.now_ms();
        for (region, entry) in &entries {
            if let Some(i) = reveals.iter().position(|r| r.region() == region) {
                if reveals[i].on_intersection(entry) {
                    reveal_traces[i].revealed_at_scroll = Some(scroll);
                }
            }
            if let Some(i) = counters.iter().position(|c| c.region() == region) {
                counters[i].on_intersection(entry, &mut clock);
                if counters[i].is_visible() && traces[i].visible_at_ms.is_none() {
                    traces[i].visible_at_ms = Some(now);
                }
            }
        }

        let settled = counters.iter().all(|c| c.is_finished());
        if (settled && scroll >= max_scroll) || frames >= options.max_frames {
            break;
        }

        for due in clock.tick() {
            let Some(i) = counters
                .iter()
                .position(|c| c.pending_frame() == Some(due.handle))
            else {
                continue;
            };
            let update = counters[i].on_frame(due.handle, due.timestamp_ms, &mut clock);
            if let Some(value) = update.value() {
                traces[i].samples.push(Sample {
                    at_ms: due.timestamp_ms,
                    value,
                });
            }
            if let FrameUpdate::Finished(_) = update {
                traces[i].finished_at_ms = Some(due.timestamp_ms);
            }
        }
        frames += 1;

        scroll = (scroll + options.scroll_step).min(max_scroll);
        entries = viewport.scroll_to(scroll);
    }

    for (counter, trace) in counters.into_iter().zip(traces.iter_mut()) {
        trace.display = counter.display();
        // Zero targets finish without ever taking a frame.
        if trace.finished_at_ms.is_none() && counter.is_finished() {
            trace.finished_at_ms = trace.visible_at_ms;
        }
        counter.unmount(&mut viewport, &mut clock);
    }
    for reveal in reveals {
        reveal.unmount(&mut viewport);
    }
    debug!(frames, "simulation finished");

    Ok(SimulationReport {
        frame_ms: clock.spacing_ms(),
        frames,
        counters: traces,
        reveals: reveal_traces,
        rotator: simulate_rotator(config.hero.slides.len(), config.hero.interval_ms, options.rotator_ms),
    })
}

/// Run the hero rotator for `span_ms`.
pub fn simulate_rotator(slides: usize, interval_ms: u64, span_ms: u64) -> Option<RotatorTrace> {
    let mut rotator = BackgroundRotator::new(slides, interval_ms)?;
    let mut switches = Vec::new();
    let mut t = interval_ms;
    while t <= span_ms {
        for index in rotator.advance_to(t) {
            switches.push((t, index));
        }
        t += interval_ms;
    }
    rotator.advance_to(span_ms);
    Some(RotatorTrace {
        span_ms,
        interval_ms,
        slides,
        switches,
        active: rotator.active(),
    })
}
