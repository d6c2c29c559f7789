//! Easing curve and delayed-progress timing for counter animations.
//!
//! Pure functions only: map elapsed time to progress in `[0, 1]`, then map
//! progress through the ease-in-out curve.

/// Ease-in-out quadratic: accelerate through the first half, decelerate
/// through the second.
///
/// `f(p) = 2p²` for `p < 0.5`, otherwise `-1 + (4 - 2p)p`.
#[inline]
pub fn ease_in_out_quad(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        2.0 * p * p
    } else {
        -1.0 + (4.0 - 2.0 * p) * p
    }
}

/// Progress of a delayed animation.
///
/// Returns `None` while `elapsed_ms < delay_ms` (still waiting), otherwise
/// `min((elapsed - delay) / duration, 1)`. A zero duration completes on the
/// first post-delay frame.
#[inline]
pub fn delayed_progress(elapsed_ms: f64, delay_ms: f64, duration_ms: f64) -> Option<f64> {
    if elapsed_ms < delay_ms {
        return None;
    }
    if duration_ms <= 0.0 {
        return Some(1.0);
    }
    Some(((elapsed_ms - delay_ms) / duration_ms).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_boundaries() {
        assert!((ease_in_out_quad(0.0) - 0.0).abs() < 1e-9);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-9);
        assert!((ease_in_out_quad(1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn curve_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease_in_out_quad(i as f64 / 100.0);
            assert!(v >= prev, "not monotonic at step {i}");
            prev = v;
        }
    }

    #[test]
    fn curve_clamps_out_of_range_input() {
        assert_eq!(ease_in_out_quad(-0.5), 0.0);
        assert_eq!(ease_in_out_quad(1.5), 1.0);
    }

    #[test]
    fn first_half_is_slower_than_linear() {
        assert!(ease_in_out_quad(0.25) < 0.25);
        assert!(ease_in_out_quad(0.75) > 0.75);
    }

    #[test]
    fn progress_waits_for_delay() {
        assert_eq!(delayed_progress(0.0, 200.0, 1500.0), None);
        assert_eq!(delayed_progress(199.9, 200.0, 1500.0), None);
        assert_eq!(delayed_progress(200.0, 200.0, 1500.0), Some(0.0));
    }

    #[test]
    fn progress_midpoint_and_cap() {
        assert_eq!(delayed_progress(950.0, 200.0, 1500.0), Some(0.5));
        assert_eq!(delayed_progress(1700.0, 200.0, 1500.0), Some(1.0));
        assert_eq!(delayed_progress(9000.0, 200.0, 1500.0), Some(1.0));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        assert_eq!(delayed_progress(0.0, 0.0, 0.0), Some(1.0));
    }
}
