//! Repulsive maneuver criteria.
//!
//! A candidate velocity is "repulsive" against an intruder when it keeps
//! pushing the relative motion away on a chosen resolution side. The bands
//! core evaluates these predicates on sampled velocities and on the discrete
//! chords between samples; it only needs the boolean answers, so the
//! criteria sit behind a trait.

use daa_geom::Vect3;

/// Horizontal and vertical repulsion predicates.
///
/// Arguments follow the relative-state convention: `s` is ownship minus
/// intruder position, `v1` the reference ownship velocity, `vi` the intruder
/// velocity, `v2` the candidate ownship velocity. `eps` in `{-1, +1}`
/// selects the resolution side; a disabled check (`eps == 0`) never reaches
/// the criterion.
pub trait RepulsiveCriteria {
    fn horizontal_repulsive(&self, s: Vect3, v1: Vect3, vi: Vect3, v2: Vect3, eps: i32) -> bool;
    fn vertical_repulsive(&self, s: Vect3, v1: Vect3, vi: Vect3, v2: Vect3, eps: i32) -> bool;
}

/// Divergence-based criteria.
///
/// Horizontally, the candidate relative velocity must stay on the `eps` side
/// of the relative-position line, and while the pair still converges it must
/// be rotated at least as far to that side as the reference while strictly
/// reducing closure; once diverging it must keep diverging. Vertically, the
/// candidate vertical closure rate must push in the `eps` direction at least
/// as strongly as the reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivergenceCriteria;

impl RepulsiveCriteria for DivergenceCriteria {
    fn horizontal_repulsive(&self, s: Vect3, v1: Vect3, vi: Vect3, v2: Vect3, eps: i32) -> bool {
        let s2 = s.vect2();
        let v = v1.vect2().sub(vi.vect2());
        let nv = v2.vect2().sub(vi.vect2());
        if s2.is_zero() || nv.is_zero() {
            return false;
        }
        let e = eps as f64;
        if e * s2.det(nv) > 0.0 {
            return false;
        }
        if s2.dot(v) < 0.0 {
            // Still converging: at least as far to the resolution side as
            // the reference, and strictly less closure
            e * s2.det(nv) <= e * s2.det(v) && s2.dot(nv) > s2.dot(v)
        } else {
            // Already diverging: stay diverging
            s2.dot(nv) >= 0.0
        }
    }

    fn vertical_repulsive(&self, _s: Vect3, v1: Vect3, vi: Vect3, v2: Vect3, eps: i32) -> bool {
        let vz = v1.z - vi.z;
        let nvz = v2.z - vi.z;
        let e = eps as f64;
        e * nvz >= e * vz && e * nvz >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Intruder 100 m north of the ownship, both level. s = own - intruder.
    const S: Vect3 = Vect3 { x: 0.0, y: -100.0, z: 0.0 };
    const VO: Vect3 = Vect3 { x: 0.0, y: 10.0, z: 0.0 };
    const VI: Vect3 = Vect3 { x: 0.0, y: 0.0, z: 0.0 };

    // With s pointing south, det(s2, w) = 100 * w.x, so eps = +1 admits
    // westward (left-of-track) deviations only.

    #[test]
    fn test_horizontal_turn_to_resolution_side() {
        let turned = Vect3::new(-2.0, 9.8, 0.0);
        let crit = DivergenceCriteria;
        assert!(crit.horizontal_repulsive(S, VO, VI, turned, 1));
        // Same candidate on the other side fails
        assert!(!crit.horizontal_repulsive(S, VO, VI, turned, -1));
    }

    #[test]
    fn test_horizontal_straight_ahead_not_repulsive() {
        // Head-on with no change does not push away
        assert!(!DivergenceCriteria.horizontal_repulsive(S, VO, VI, VO, 1));
    }

    #[test]
    fn test_horizontal_wrong_side_rejected() {
        let east = Vect3::new(2.0, 9.8, 0.0);
        assert!(!DivergenceCriteria.horizontal_repulsive(S, VO, VI, east, 1));
        assert!(DivergenceCriteria.horizontal_repulsive(S, VO, VI, east, -1));
    }

    #[test]
    fn test_horizontal_diverging_keeps_diverging() {
        // Ownship already past the intruder, moving away
        let s = Vect3::new(0.0, 100.0, 0.0);
        let crit = DivergenceCriteria;
        assert!(crit.horizontal_repulsive(s, VO, VI, Vect3::new(0.0, 9.0, 0.0), 1));
        // Turning back toward the intruder fails
        assert!(!crit.horizontal_repulsive(s, VO, VI, Vect3::new(0.0, -9.0, 0.0), 1));
    }

    #[test]
    fn test_horizontal_degenerate_states_not_repulsive() {
        let crit = DivergenceCriteria;
        assert!(!crit.horizontal_repulsive(Vect3::zero(), VO, VI, VO, 1));
        assert!(!crit.horizontal_repulsive(S, VO, VI, VI, 1));
    }

    #[test]
    fn test_vertical_climb_sense() {
        let crit = DivergenceCriteria;
        let level = Vect3::new(0.0, 10.0, 0.0);
        let climbing = Vect3::new(0.0, 10.0, 3.0);
        let descending = Vect3::new(0.0, 10.0, -3.0);
        assert!(crit.vertical_repulsive(S, level, VI, climbing, 1));
        assert!(!crit.vertical_repulsive(S, level, VI, descending, 1));
        assert!(crit.vertical_repulsive(S, level, VI, descending, -1));
    }

    #[test]
    fn test_vertical_must_not_weaken() {
        // Reference already climbing at 3; candidate climbing at 1 weakens
        let crit = DivergenceCriteria;
        let ref_climb = Vect3::new(0.0, 10.0, 3.0);
        let weaker = Vect3::new(0.0, 10.0, 1.0);
        assert!(!crit.vertical_repulsive(S, ref_climb, VI, weaker, 1));
        assert!(crit.vertical_repulsive(S, ref_climb, VI, ref_climb, 1));
    }
}
