//! Integer interval algebra for band lists.
//!
//! Band lists are ordered vectors of closed integer intervals over the
//! sample grid. Left-side lists are negated in place and appended to
//! right-side lists so the combined list runs over signed indices with 0 at
//! "no maneuver".

use daa_geom::{to_2pi, IntervalSet, TWO_PI};
use serde::{Deserialize, Serialize};

/// Closed integer interval `[lb, ub]` of sample indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntInterval {
    pub lb: i64,
    pub ub: i64,
}

impl IntInterval {
    pub fn new(lb: i64, ub: i64) -> Self {
        Self { lb, ub }
    }
}

/// Negate a band list in place: reverse the order and negate every bound, so
/// a left-side list `[k_lo, k_hi]` becomes the signed list `[-k_hi, -k_lo]`
/// in ascending order.
pub fn neg(l: &mut [IntInterval]) {
    l.reverse();
    for iv in l.iter_mut() {
        let lb = iv.lb;
        iv.lb = -iv.ub;
        iv.ub = -lb;
    }
}

/// Append `r` onto `l`, coalescing across the seam when the neighboring
/// intervals touch or overlap on the integer grid (gap of at most 1).
pub fn append_intband(l: &mut Vec<IntInterval>, mut r: Vec<IntInterval>) {
    if let Some(first) = r.first().copied() {
        if let Some(last) = l.last_mut() {
            if first.lb - last.ub <= 1 {
                last.ub = first.ub;
                r.remove(0);
            }
        }
    }
    l.append(&mut r);
}

/// Project a band list onto the real line: each `[lb, ub]` maps to
/// `[scal*lb + add, scal*ub + add]`, intersected with `[min, max]`.
pub fn to_interval_set(l: &[IntInterval], scal: f64, add: f64, min: f64, max: f64) -> IntervalSet {
    let mut set = IntervalSet::new();
    for iv in l {
        let lb = scal * iv.lb as f64 + add;
        let ub = scal * iv.ub as f64 + add;
        if min <= ub && lb <= max {
            set.almost_add(min.max(lb), max.min(ub));
        }
    }
    set
}

/// Project a band list onto the angular circle `[0, 2*pi]`.
///
/// Projected intervals that fall outside the circle are wrapped; intervals
/// straddling 0 or 2*pi are split into their two wrapped pieces.
pub fn to_interval_set_0_2pi(l: &[IntInterval], scal: f64, add: f64) -> IntervalSet {
    let mut set = IntervalSet::new();
    for iv in l {
        let mut lb = scal * iv.lb as f64 + add;
        let mut ub = scal * iv.ub as f64 + add;
        if 0.0 <= lb && ub <= TWO_PI {
            set.almost_add(lb, ub);
        } else if ub < 0.0 || lb > TWO_PI {
            set.almost_add(to_2pi(lb), to_2pi(ub));
        } else {
            if lb < 0.0 {
                set.almost_add(to_2pi(lb), TWO_PI);
                lb = 0.0;
            }
            if ub > TWO_PI {
                set.almost_add(0.0, to_2pi(ub));
                ub = TWO_PI;
            }
            set.almost_add(lb, ub);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use daa_geom::Interval;

    #[test]
    fn test_neg_maps_left_list_to_signed() {
        let mut l = vec![IntInterval::new(3, 7), IntInterval::new(9, 12)];
        neg(&mut l);
        assert_eq!(l, vec![IntInterval::new(-12, -9), IntInterval::new(-7, -3)]);
    }

    #[test]
    fn test_neg_is_involutive() {
        let orig = vec![
            IntInterval::new(-5, -2),
            IntInterval::new(0, 3),
            IntInterval::new(7, 7),
        ];
        let mut l = orig.clone();
        neg(&mut l);
        neg(&mut l);
        assert_eq!(l, orig);
    }

    #[test]
    fn test_append_coalesces_gap_of_one() {
        let mut l = vec![IntInterval::new(0, 3)];
        append_intband(&mut l, vec![IntInterval::new(4, 7)]);
        assert_eq!(l, vec![IntInterval::new(0, 7)]);
    }

    #[test]
    fn test_append_keeps_gap_of_two() {
        let mut l = vec![IntInterval::new(0, 3)];
        append_intband(&mut l, vec![IntInterval::new(5, 7)]);
        assert_eq!(l, vec![IntInterval::new(0, 3), IntInterval::new(5, 7)]);
    }

    #[test]
    fn test_append_with_empty_sides() {
        let mut l: Vec<IntInterval> = Vec::new();
        append_intband(&mut l, vec![IntInterval::new(1, 2)]);
        assert_eq!(l, vec![IntInterval::new(1, 2)]);
        append_intband(&mut l, Vec::new());
        assert_eq!(l, vec![IntInterval::new(1, 2)]);
    }

    #[test]
    fn test_projection_scales_and_clips() {
        let l = vec![IntInterval::new(-7, -3), IntInterval::new(4, 6)];
        let set = to_interval_set(&l, 2.0, 10.0, 0.0, 20.0);
        // [-4, 4] clipped to [0, 4]; [18, 22] clipped to [18, 20]
        assert_eq!(
            set.intervals(),
            &[Interval::new(0.0, 4.0), Interval::new(18.0, 20.0)]
        );
    }

    #[test]
    fn test_projection_identity_preserves_endpoints() {
        let l = vec![IntInterval::new(-2, 1), IntInterval::new(5, 9)];
        let set = to_interval_set(&l, 1.0, 0.0, f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(
            set.intervals(),
            &[Interval::new(-2.0, 1.0), Interval::new(5.0, 9.0)]
        );
    }

    #[test]
    fn test_projection_drops_out_of_range() {
        let l = vec![IntInterval::new(10, 20)];
        let set = to_interval_set(&l, 1.0, 0.0, 0.0, 5.0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_angular_projection_straddles_zero() {
        let set = to_interval_set_0_2pi(&[IntInterval::new(-1, 2)], 1.0, 0.0);
        let ivs = set.intervals();
        assert_eq!(ivs.len(), 2);
        assert!((ivs[0].lb - 0.0).abs() < 1e-12);
        assert!((ivs[0].ub - 2.0).abs() < 1e-12);
        assert!((ivs[1].lb - (TWO_PI - 1.0)).abs() < 1e-12);
        assert!((ivs[1].ub - TWO_PI).abs() < 1e-12);
    }

    #[test]
    fn test_angular_projection_straddles_two_pi() {
        let set = to_interval_set_0_2pi(&[IntInterval::new(5, 7)], 1.0, 0.0);
        // [5, 7] wraps into [5, 2pi] and [0, 7 - 2pi]
        let ivs = set.intervals();
        assert_eq!(ivs.len(), 2);
        assert!((ivs[0].ub - (7.0 - TWO_PI)).abs() < 1e-12);
        assert!((ivs[1].lb - 5.0).abs() < 1e-12);
        assert!((ivs[1].ub - TWO_PI).abs() < 1e-12);
    }

    #[test]
    fn test_angular_projection_wholly_outside_wraps() {
        let set = to_interval_set_0_2pi(&[IntInterval::new(-3, -2)], 1.0, 0.0);
        let ivs = set.intervals();
        assert_eq!(ivs.len(), 1);
        assert!((ivs[0].lb - (TWO_PI - 3.0)).abs() < 1e-12);
        assert!((ivs[0].ub - (TWO_PI - 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_angular_projection_preserves_length() {
        let l = vec![IntInterval::new(-1, 2)];
        let set = to_interval_set_0_2pi(&l, 1.0, 0.0);
        assert!((set.total_length() - 3.0).abs() < 1e-9);
    }
}
