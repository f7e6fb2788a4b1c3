//! Per-node scatter-width acceptance policy.
//!
//! A migration changes the scatter width of every node it touches. Each
//! change is judged on its own against the configured band
//! `[min, max]`:
//!
//! - **Inside the band** after the change: always acceptable.
//! - **Below min**: a non-target may not shrink further; the target
//!   (the node gaining the replica) must grow by at least one.
//! - **Above max**: a non-target may not grow further; the target must
//!   shrink by at least one, which only happens when the new replica's
//!   partners overlap partners it already has.

use copyset_core::ScatterWidthLimits;

/// Whether moving a node's scatter width from `old` to `new` is acceptable.
pub fn satisfies_scatter_width(
    is_target: bool,
    old: u32,
    new: u32,
    limits: &ScatterWidthLimits,
) -> bool {
    let delta = i64::from(new) - i64::from(old);

    if new < limits.min_scatter_width {
        if is_target { delta >= 1 } else { delta >= 0 }
    } else if new > limits.max_scatter_width() {
        if is_target { delta <= -1 } else { delta <= 0 }
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ScatterWidthLimits {
        // Band is [5, 6].
        ScatterWidthLimits::new(5, 0.2)
    }

    #[test]
    fn inside_band_always_accepted() {
        let limits = limits();
        for new in 5..=6 {
            for old in 0..=12 {
                assert!(satisfies_scatter_width(false, old, new, &limits));
                assert!(satisfies_scatter_width(true, old, new, &limits));
            }
        }
    }

    #[test]
    fn below_min_non_target_must_not_shrink() {
        let limits = limits();
        assert!(satisfies_scatter_width(false, 4, 4, &limits));
        assert!(satisfies_scatter_width(false, 2, 4, &limits));
        assert!(!satisfies_scatter_width(false, 6, 4, &limits));
        assert!(!satisfies_scatter_width(false, 5, 4, &limits));
    }

    #[test]
    fn below_min_target_must_grow() {
        let limits = limits();
        assert!(satisfies_scatter_width(true, 3, 4, &limits));
        assert!(satisfies_scatter_width(true, 0, 2, &limits));
        assert!(!satisfies_scatter_width(true, 4, 4, &limits));
        assert!(!satisfies_scatter_width(true, 4, 3, &limits));
    }

    #[test]
    fn above_max_non_target_must_not_grow() {
        let limits = limits();
        assert!(satisfies_scatter_width(false, 7, 7, &limits));
        assert!(satisfies_scatter_width(false, 9, 7, &limits));
        assert!(!satisfies_scatter_width(false, 6, 7, &limits));
    }

    #[test]
    fn above_max_target_must_shrink() {
        let limits = limits();
        assert!(satisfies_scatter_width(true, 9, 8, &limits));
        assert!(!satisfies_scatter_width(true, 8, 8, &limits));
        assert!(!satisfies_scatter_width(true, 7, 8, &limits));
    }

    #[test]
    fn zero_range_band_is_single_width() {
        let limits = ScatterWidthLimits::new(3, 0.0);
        assert!(satisfies_scatter_width(true, 0, 3, &limits));
        // 4 is above max = 3, and the target grew.
        assert!(!satisfies_scatter_width(true, 3, 4, &limits));
        // Non-target staying at 4 is tolerated.
        assert!(satisfies_scatter_width(false, 4, 4, &limits));
    }
}
