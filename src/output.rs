//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each entity (section,
//! counter, slide) leads with its positional index and human label; paths,
//! timings and values follow as indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 Hero (2 slides)
//!     Rotates every 5000ms
//! 002 Stats (3 counters)
//!     001 Klien Puas → 500+
//!         1500ms after 200ms delay
//! ...
//!
//! Motion
//!     Thresholds: 0, 0.2, 0.5
//!     Root margin: 0px 0px -10% 0px
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Build
//!
//! ```text
//! Page → dist/index.html (48213 bytes)
//!     9 reveal regions, 2 hero slides
//!     Counters: 500+, 98%, 10+
//! Assets → dist/assets/ (3 files)
//! ```
//!
//! ## Simulate
//!
//! ```text
//! Counters (16.7ms frames, 152 frames)
//! 001 Klien Puas → 500+
//!     Visible at 133ms, finished at 1850ms
//!     0 @350ms, 12 @600ms, ... 500 @1850ms
//!
//! Reveals
//! 001 stats at scroll 240px
//!
//! Rotator (2 slides, every 5000ms, over 12500ms)
//!     5000ms → slide 2
//!     10000ms → slide 1
//!     Showing slide 1 after 2 changes
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::SiteConfig;
use crate::generate::BuildReport;
use crate::simulate::{Sample, SimulationReport};
use crate::types::Section;
use std::path::Path;

/// Samples shown per counter in simulation output.
pub const SAMPLES_SHOWN: usize = 8;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional count.
///
/// ```text
/// 002 Stats (3 counters)
/// 009 Contact
/// ```
fn entity_header(index: usize, title: &str, count: Option<(usize, &str)>) -> String {
    match count {
        Some((n, unit)) => format!("{} {} ({} {})", format_index(index), title, n, unit),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Milliseconds without a trailing `.0` for whole values.
fn format_ms(ms: f64) -> String {
    if ms.fract() == 0.0 {
        format!("{}ms", ms as i64)
    } else {
        format!("{:.1}ms", ms)
    }
}

/// Pick up to `max` samples spread evenly, always keeping the first and last.
fn spread_samples(samples: &[Sample], max: usize) -> Vec<Sample> {
    if samples.len() <= max {
        return samples.to_vec();
    }
    if max < 2 {
        return samples.iter().take(max).copied().collect();
    }
    let last = samples.len() - 1;
    (0..max)
        .map(|i| samples[i * last / (max - 1)])
        .collect()
}

// ============================================================================
// Check
// ============================================================================

/// Label and item count for a section in check output.
fn section_summary(config: &SiteConfig, section: Section) -> (&str, Option<(usize, &'static str)>) {
    match section {
        Section::Hero => ("Hero", Some((config.hero.slides.len(), "slides"))),
        Section::Stats => ("Stats", Some((config.stats.counters.len(), "counters"))),
        Section::Services => (
            config.services.heading.as_str(),
            Some((config.services.items.len(), "services")),
        ),
        Section::About => (
            config.about.heading.as_str(),
            Some((config.about.highlights.len(), "highlights")),
        ),
        Section::WhyUs => (
            config.why_us.heading.as_str(),
            Some((config.why_us.items.len(), "reasons")),
        ),
        Section::Gallery => {
            let images = config.gallery.images.len();
            if images == 0 {
                (
                    config.gallery.heading.as_str(),
                    Some((config.gallery.placeholder_tiles, "placeholders")),
                )
            } else {
                (config.gallery.heading.as_str(), Some((images, "images")))
            }
        }
        Section::Promo => (
            config.promo.heading.as_str(),
            Some((config.promo.packages.len(), "packages")),
        ),
        Section::Testimonials => (
            config.testimonials.heading.as_str(),
            Some((config.testimonials.items.len(), "testimonials")),
        ),
        Section::Contact => (config.contact.heading.as_str(), None),
        Section::Cta => (config.cta.heading.as_str(), None),
    }
}

/// Format `check` output: page inventory plus where config came from.
pub fn format_check_output(config: &SiteConfig, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];

    for (i, section) in Section::ALL.iter().enumerate() {
        let (title, count) = section_summary(config, *section);
        lines.push(entity_header(i + 1, title, count));

        match section {
            Section::Hero => {
                lines.push(format!("{}Rotates every {}ms", indent(1), config.hero.interval_ms));
            }
            Section::Stats => {
                for (j, counter) in config.stats.counters.iter().enumerate() {
                    lines.push(format!(
                        "{}{} \u{2192} {}",
                        indent(1),
                        entity_header(j + 1, &counter.label, None),
                        counter.suffix.render(counter.target)
                    ));
                    lines.push(format!(
                        "{}{}ms after {}ms delay",
                        indent(2),
                        counter.duration_ms,
                        counter.delay_ms
                    ));
                }
            }
            Section::Contact => {
                lines.push(format!(
                    "{}WhatsApp: {}/{}",
                    indent(1),
                    config.contact.whatsapp_base.trim_end_matches('/'),
                    config.contact.whatsapp_number
                ));
            }
            _ => {}
        }
    }

    lines.push(String::new());
    lines.push("Motion".to_string());
    let thresholds: Vec<String> = config.motion.thresholds.iter().map(|t| t.to_string()).collect();
    lines.push(format!("{}Thresholds: {}", indent(1), thresholds.join(", ")));
    lines.push(format!("{}Root margin: {}", indent(1), config.motion.root_margin));
    lines.push(format!(
        "{}Navbar solid past {}px",
        indent(1),
        config.motion.navbar_scroll_offset
    ));

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(stock defaults)", indent(1)));
    }
    if source_root.join(&config.site.assets_dir).is_dir() {
        lines.push(format!("{}{}/", indent(1), config.site.assets_dir));
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(config: &SiteConfig, source_root: &Path) {
    for line in format_check_output(config, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport, assets_dir: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "Page \u{2192} {} ({} bytes)",
        report.index_path.display(),
        report.index_bytes
    )];
    lines.push(format!(
        "{}{} reveal regions, {} hero slides",
        indent(1),
        report.reveal_regions,
        report.slides
    ));
    if !report.counters.is_empty() {
        lines.push(format!("{}Counters: {}", indent(1), report.counters.join(", ")));
    }

    if report.assets_copied > 0 {
        let out_root = report.index_path.parent().unwrap_or(Path::new("."));
        lines.push(format!(
            "Assets \u{2192} {}/ ({} files)",
            out_root.join(assets_dir).display(),
            report.assets_copied
        ));
    } else {
        lines.push("Assets \u{2192} none copied".to_string());
    }
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport, assets_dir: &str) {
    for line in format_build_output(report, assets_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Simulate
// ============================================================================

pub fn format_simulation(report: &SimulationReport, samples_shown: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "Counters ({} frames, {} frames)",
        format_ms(report.frame_ms),
        report.frames
    )];

    for (i, trace) in report.counters.iter().enumerate() {
        lines.push(format!(
            "{} \u{2192} {}",
            entity_header(i + 1, &trace.label, None),
            trace.display
        ));
        let visible = trace
            .visible_at_ms
            .map(format_ms)
            .unwrap_or_else(|| "never".to_string());
        let finished = trace
            .finished_at_ms
            .map(format_ms)
            .unwrap_or_else(|| "never".to_string());
        lines.push(format!(
            "{}Visible at {}, finished at {}",
            indent(1),
            visible,
            finished
        ));
        let shown: Vec<String> = spread_samples(&trace.samples, samples_shown)
            .iter()
            .map(|s| format!("{} @{}", s.value, format_ms(s.at_ms)))
            .collect();
        if !shown.is_empty() {
            lines.push(format!("{}{}", indent(1), shown.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push("Reveals".to_string());
    for (i, reveal) in report.reveals.iter().enumerate() {
        let at = match reveal.revealed_at_scroll {
            Some(y) => format!("at scroll {}px", y),
            None => "never revealed".to_string(),
        };
        lines.push(format!("{} {}", entity_header(i + 1, &reveal.id, None), at));
    }

    if let Some(rotator) = &report.rotator {
        lines.push(String::new());
        lines.push(format!(
            "Rotator ({} slides, every {}ms, over {}ms)",
            rotator.slides, rotator.interval_ms, rotator.span_ms
        ));
        for (at, index) in &rotator.switches {
            lines.push(format!("{}{}ms \u{2192} slide {}", indent(1), at, index + 1));
        }
        lines.push(format!(
            "{}Showing slide {} after {} changes",
            indent(1),
            rotator.active + 1,
            rotator.switches.len()
        ));
    }

    lines
}

/// Print simulation output to stdout.
pub fn print_simulation(report: &SimulationReport, samples_shown: usize) {
    for line in format_simulation(report, samples_shown) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
