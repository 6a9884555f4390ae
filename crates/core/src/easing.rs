//! Easing curves and point interpolation.

use glam::DVec2;

/// Cubic ease-in-out: `4t³` below the midpoint, `1 - (-2t + 2)³ / 2` above it.
///
/// Maps [0, 1] onto [0, 1] monotonically with `ease(0) = 0`, `ease(0.5) = 0.5`
/// and `ease(1) = 1`. Inputs outside [0, 1] are not clamped.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Interpolates each `source[i]` toward `target[i]` by `ease_in_out_cubic(progress)`.
///
/// Pairs up to the shorter of the two slices.
pub fn eased_positions(source: &[DVec2], target: &[DVec2], progress: f64) -> Vec<DVec2> {
    let s = ease_in_out_cubic(progress);
    source
        .iter()
        .zip(target)
        .map(|(from, to)| from.lerp(*to, s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_fixes_endpoints_and_midpoint() {
        assert!(ease_in_out_cubic(0.0).abs() < 1e-12);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ease_is_slow_near_the_ends() {
        assert!(ease_in_out_cubic(0.1) < 0.1);
        assert!(ease_in_out_cubic(0.9) > 0.9);
    }

    #[test]
    fn eased_positions_at_zero_equal_source() {
        let source = [DVec2::new(1.0, 2.0), DVec2::new(-3.0, 4.0)];
        let target = [DVec2::new(10.0, 20.0), DVec2::new(30.0, -40.0)];
        let pts = eased_positions(&source, &target, 0.0);
        for (p, s) in pts.iter().zip(&source) {
            assert!(p.distance(*s) < 1e-9, "{p} != {s}");
        }
    }

    #[test]
    fn eased_positions_at_one_equal_target() {
        let source = [DVec2::new(1.0, 2.0), DVec2::new(-3.0, 4.0)];
        let target = [DVec2::new(10.0, 20.0), DVec2::new(30.0, -40.0)];
        let pts = eased_positions(&source, &target, 1.0);
        for (p, t) in pts.iter().zip(&target) {
            assert!(p.distance(*t) < 1e-9, "{p} != {t}");
        }
    }

    #[test]
    fn eased_positions_at_half_is_the_midpoint() {
        let pts = eased_positions(&[DVec2::ZERO], &[DVec2::new(8.0, -4.0)], 0.5);
        assert!(pts[0].distance(DVec2::new(4.0, -2.0)) < 1e-9);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ease_stays_in_unit_interval(t in 0.0_f64..=1.0) {
                let e = ease_in_out_cubic(t);
                prop_assert!((0.0..=1.0).contains(&e), "ease({t}) = {e}");
            }

            #[test]
            fn ease_is_monotonic(a in 0.0_f64..=1.0, b in 0.0_f64..=1.0) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(ease_in_out_cubic(lo) <= ease_in_out_cubic(hi) + 1e-12);
            }

            #[test]
            fn eased_point_stays_on_the_segment(
                sx in -500.0_f64..500.0, sy in -500.0_f64..500.0,
                tx in -500.0_f64..500.0, ty in -500.0_f64..500.0,
                p in 0.0_f64..=1.0,
            ) {
                let s = DVec2::new(sx, sy);
                let t = DVec2::new(tx, ty);
                let q = eased_positions(&[s], &[t], p)[0];
                let total = s.distance(t);
                prop_assert!((s.distance(q) + q.distance(t) - total).abs() < 1e-6);
            }
        }
    }
}
