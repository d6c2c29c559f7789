//! Shared test utilities for the salon-page test suite.
//!
//! Provides fixture setup, a frame-driven counter runner, and assertions
//! over generated HTML.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let values = run_counter(CounterTiming { target: 98, duration_ms: 1800, delay_ms: 400 }, 16.0);
//! assert_non_decreasing(&values);
//!
//! let tmp = setup_fixtures();
//! let config = load_config(tmp.path()).unwrap();
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::motion::{CounterAnimation, CounterTiming, FrameClock, FrameUpdate};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `config.toml` into `dir`.
pub fn write_config(dir: &Path, content: &str) {
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

// =========================================================================
// Counter driving
// =========================================================================

/// Run a counter to completion on a fixed-spacing clock.
///
/// Returns the initial `0` followed by every value a frame displayed. A zero
/// target never schedules a frame, so the result is just `[0]`.
pub fn run_counter(timing: CounterTiming, spacing_ms: f64) -> Vec<u64> {
    let mut clock = FrameClock::new(spacing_ms);
    let mut anim = CounterAnimation::new(timing);
    let mut values = vec![anim.value()];
    anim.start(&mut clock);

    let mut frames = 0usize;
    while !anim.is_finished() {
        for due in clock.tick() {
            match anim.on_frame(due.handle, due.timestamp_ms, &mut clock) {
                FrameUpdate::Progress(v) | FrameUpdate::Finished(v) => values.push(v),
                FrameUpdate::Waiting | FrameUpdate::Stale => {}
            }
        }
        frames += 1;
        assert!(frames < 100_000, "counter {timing:?} never finished");
    }
    values
}

/// Panics with the offending position if `values` ever decreases.
pub fn assert_non_decreasing(values: &[u64]) {
    for (i, pair) in values.windows(2).enumerate() {
        assert!(
            pair[0] <= pair[1],
            "value decreased at index {}: {} -> {} in {values:?}",
            i + 1,
            pair[0],
            pair[1]
        );
    }
}

// =========================================================================
// HTML assertions
// =========================================================================

/// Number of non-overlapping occurrences of `needle` in `html`.
pub fn count_occurrences(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}

/// Assert that every needle appears in order.
pub fn assert_in_order(html: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        let pos = html[from..]
            .find(needle)
            .unwrap_or_else(|| panic!("'{needle}' not found after byte {from}"));
        from += pos + needle.len();
    }
}
