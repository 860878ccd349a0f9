//! Conflict detection oracle: trait, cylinder detector, closest approach.

use daa_geom::{cyl_norm, Vect2, Vect3};
use serde::{Deserialize, Serialize};

/// Result of a conflict query over a time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictData {
    pub conflict: bool,
    /// Entry time into the conflict volume, clipped to the query window.
    pub time_in: f64,
    /// Exit time, clipped to the query window.
    pub time_out: f64,
}

impl ConflictData {
    /// The no-conflict value. `time_in > time_out` so the empty window is
    /// visible to callers that look at the times.
    pub fn none() -> Self {
        Self { conflict: false, time_in: f64::INFINITY, time_out: f64::NEG_INFINITY }
    }
}

/// Conflict oracle over relative aircraft states.
///
/// Implementations are chosen per call; the bands core runs a primary and an
/// optional recovery detector side by side.
pub trait ConflictDetector {
    /// Loss of separation right now.
    fn violation(&self, so: Vect3, vo: Vect3, si: Vect3, vi: Vect3) -> bool;

    /// Conflict anywhere within the time window `[b, t]`, assuming both
    /// aircraft hold their current velocities.
    fn conflict(&self, so: Vect3, vo: Vect3, si: Vect3, vi: Vect3, b: f64, t: f64) -> ConflictData;
}

/// Cylindrical separation volume: radius `d`, half-height `h`, both meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderDetector {
    pub d: f64,
    pub h: f64,
}

impl CylinderDetector {
    pub fn new(d: f64, h: f64) -> Self {
        Self { d, h }
    }
}

impl ConflictDetector for CylinderDetector {
    fn violation(&self, so: Vect3, _vo: Vect3, si: Vect3, _vi: Vect3) -> bool {
        let s = so.sub(si);
        s.vect2().sqv() < self.d * self.d && s.z.abs() < self.h
    }

    fn conflict(&self, so: Vect3, vo: Vect3, si: Vect3, vi: Vect3, b: f64, t: f64) -> ConflictData {
        let s = so.sub(si);
        let v = vo.sub(vi);
        let horizontal = horizontal_entry_times(s.vect2(), v.vect2(), self.d);
        let vertical = vertical_entry_times(s.z, v.z, self.h);
        match (horizontal, vertical) {
            (Some((h_in, h_out)), Some((v_in, v_out))) => {
                let time_in = h_in.max(v_in).max(b);
                let time_out = h_out.min(v_out).min(t);
                if time_in < time_out {
                    ConflictData { conflict: true, time_in, time_out }
                } else {
                    ConflictData::none()
                }
            }
            _ => ConflictData::none(),
        }
    }
}

/// Times during which the horizontal distance is below `d`, if any.
fn horizontal_entry_times(s2: Vect2, v2: Vect2, d: f64) -> Option<(f64, f64)> {
    let a = v2.sqv();
    if a == 0.0 {
        return if s2.sqv() < d * d {
            Some((f64::NEG_INFINITY, f64::INFINITY))
        } else {
            None
        };
    }
    let b = 2.0 * s2.dot(v2);
    let c = s2.sqv() - d * d;
    let disc = b * b - 4.0 * a * c;
    if disc <= 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    Some(((-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)))
}

/// Times during which the vertical offset is within `h`, if any.
fn vertical_entry_times(sz: f64, vz: f64, h: f64) -> Option<(f64, f64)> {
    if vz == 0.0 {
        return if sz.abs() < h {
            Some((f64::NEG_INFINITY, f64::INFINITY))
        } else {
            None
        };
    }
    let t1 = (-h - sz) / vz;
    let t2 = (h - sz) / vz;
    Some((t1.min(t2), t1.max(t2)))
}

/// Time `t >= 0` at which the relative state `s + t*(vo - vi)` attains its
/// minimum cylindrical norm for the `(d, h)` cylinder.
///
/// The norm is a max of two convex functions of `t`, so the minimum sits at
/// the horizontal closest-approach time, the vertical crossing time, or a
/// time where the two branches meet. The earliest minimizer is returned, so
/// a plateau (constant-norm stretch) reports its first instant.
pub fn tccpa(s: Vect3, vo: Vect3, vi: Vect3, d: f64, h: f64) -> f64 {
    let v = vo.sub(vi);
    let s2 = s.vect2();
    let v2 = v.vect2();
    let mut candidates = vec![0.0];
    if v2.sqv() > 0.0 {
        candidates.push((-s2.dot(v2) / v2.sqv()).max(0.0));
    }
    if v.z != 0.0 {
        candidates.push((-s.z / v.z).max(0.0));
    }
    // Branch crossings: |s2 + t*v2|^2 / d^2 == (sz + t*vz)^2 / h^2
    let a = v2.sqv() / (d * d) - (v.z * v.z) / (h * h);
    let b = 2.0 * (s2.dot(v2) / (d * d) - s.z * v.z / (h * h));
    let c = s2.sqv() / (d * d) - (s.z * s.z) / (h * h);
    if a != 0.0 {
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            for root in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
                if root >= 0.0 {
                    candidates.push(root);
                }
            }
        }
    } else if b != 0.0 {
        let root = -c / b;
        if root >= 0.0 {
            candidates.push(root);
        }
    }
    candidates.sort_by(|x, y| x.total_cmp(y));
    let mut best_t = 0.0;
    let mut best = f64::INFINITY;
    for t in candidates {
        let n = cyl_norm(v.scal_add(t, s), d, h);
        if n < best {
            best = n;
            best_t = t;
        }
    }
    best_t
}

#[cfg(test)]
mod tests {
    use super::*;

    const DET: CylinderDetector = CylinderDetector { d: 1.0, h: 1.0 };

    #[test]
    fn test_violation_inside_cylinder() {
        let so = Vect3::new(0.5, 0.0, 0.2);
        assert!(DET.violation(so, Vect3::zero(), Vect3::zero(), Vect3::zero()));
    }

    #[test]
    fn test_violation_strict_at_boundary() {
        let so = Vect3::new(1.0, 0.0, 0.0);
        assert!(!DET.violation(so, Vect3::zero(), Vect3::zero(), Vect3::zero()));
        let above = Vect3::new(0.0, 0.0, 1.0);
        assert!(!DET.violation(above, Vect3::zero(), Vect3::zero(), Vect3::zero()));
    }

    #[test]
    fn test_conflict_head_on_entry_times() {
        // Intruder 100 m ahead, 10 m/s closure: inside the unit disk for
        // |100 - 10t| < 1, i.e. t in (9.9, 10.1)
        let so = Vect3::zero();
        let vo = Vect3::new(0.0, 10.0, 0.0);
        let si = Vect3::new(0.0, 100.0, 0.0);
        let cd = DET.conflict(so, vo, si, Vect3::zero(), 0.0, 60.0);
        assert!(cd.conflict);
        assert!((cd.time_in - 9.9).abs() < 1e-9);
        assert!((cd.time_out - 10.1).abs() < 1e-9);
    }

    #[test]
    fn test_conflict_outside_window() {
        let so = Vect3::zero();
        let vo = Vect3::new(0.0, 10.0, 0.0);
        let si = Vect3::new(0.0, 100.0, 0.0);
        let cd = DET.conflict(so, vo, si, Vect3::zero(), 0.0, 5.0);
        assert!(!cd.conflict);
    }

    #[test]
    fn test_conflict_misses_laterally() {
        // Passes 2 m abeam of a 1 m cylinder
        let so = Vect3::zero();
        let vo = Vect3::new(0.0, 10.0, 0.0);
        let si = Vect3::new(2.0, 100.0, 0.0);
        assert!(!DET.conflict(so, vo, si, Vect3::zero(), 0.0, 60.0).conflict);
    }

    #[test]
    fn test_conflict_vertical_separation_holds() {
        // Head-on horizontally but 5 m above a 1 m half-height slab
        let so = Vect3::zero();
        let vo = Vect3::new(0.0, 10.0, 0.0);
        let si = Vect3::new(0.0, 100.0, 5.0);
        assert!(!DET.conflict(so, vo, si, Vect3::zero(), 0.0, 60.0).conflict);
    }

    #[test]
    fn test_tccpa_pure_horizontal() {
        // Relative position 10 m behind with 0.5 m offset, unit closure
        let s = Vect3::new(-10.0, -0.5, 0.0);
        let t = tccpa(s, Vect3::zero(), Vect3::new(-1.0, 0.0, 0.0), 1.0, 1.0);
        assert!((t - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_tccpa_vertical_plateau_reports_first_instant() {
        // Vertical branch dominates at 50; the norm plateaus once the
        // horizontal branch drops below it, which happens at t = 5
        let s = Vect3::new(0.0, -100.0, -50.0);
        let t = tccpa(s, Vect3::new(0.0, 10.0, 0.0), Vect3::zero(), 1.0, 1.0);
        assert!((t - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_tccpa_diverging_is_now() {
        // Already moving apart: closest approach is t = 0
        let s = Vect3::new(10.0, 0.0, 0.0);
        let t = tccpa(s, Vect3::new(1.0, 0.0, 0.0), Vect3::zero(), 1.0, 1.0);
        assert_eq!(t, 0.0);
    }
}
