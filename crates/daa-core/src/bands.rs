//! Kinematic integer bands.
//!
//! The engine samples a candidate maneuver at integer multiples of a step
//! time, left and right of the current state, and partitions each side into
//! conflict and conflict-free index runs. Intruders propagate linearly at
//! their current velocity inside every conflict query. Two detectors can run
//! side by side (primary conflict and recovery), and two repulsive criteria
//! (horizontal and vertical) further cut the searchable range against the
//! most urgent intruder.

use crate::criteria::RepulsiveCriteria;
use crate::detection::ConflictDetector;
use crate::error::DaaError;
use crate::intband::{append_intband, neg, IntInterval};
use crate::maneuver::{Side, SidePreference, TrajectorySampler};
use crate::traffic::{OwnshipState, TrafficState};
use daa_geom::Vect3;
use tracing::debug;

/// Immutable inputs of one bands computation.
///
/// All collaborators are borrowed for the duration of the query; the engine
/// owns nothing but the lists it returns. Preconditions (`tstep > 0`,
/// `0 <= b <= t`, `0 <= b2 <= t2`) can be checked once via [`validate`].
///
/// [`validate`]: BandsQuery::validate
#[derive(Clone, Copy)]
pub struct BandsQuery<'a> {
    pub conflict_det: &'a dyn ConflictDetector,
    pub recovery_det: Option<&'a dyn ConflictDetector>,
    /// Sample step in seconds.
    pub tstep: f64,
    /// Primary conflict window `[b, t]`.
    pub b: f64,
    pub t: f64,
    /// Recovery conflict window `[b2, t2]`; only read when `recovery_det`
    /// is present.
    pub b2: f64,
    pub t2: f64,
    /// Last sample index on the left / right side.
    pub maxl: usize,
    pub maxr: usize,
    pub ownship: &'a OwnshipState,
    pub traffic: &'a [TrafficState],
    /// Most urgent intruder; `None` disables both repulsion checks.
    pub repac: Option<&'a TrafficState>,
    /// Horizontal / vertical repulsion sign in `{-1, 0, +1}`; 0 disables.
    pub epsh: i32,
    pub epsv: i32,
    pub sampler: &'a dyn TrajectorySampler,
    pub criteria: &'a dyn RepulsiveCriteria,
}

impl<'a> BandsQuery<'a> {
    pub fn validate(&self) -> Result<(), DaaError> {
        if self.tstep <= 0.0 {
            return Err(DaaError::NonPositive { name: "tstep", value: self.tstep });
        }
        if self.b < 0.0 || self.b > self.t {
            return Err(DaaError::InvalidWindow { name: "primary", b: self.b, t: self.t });
        }
        if self.recovery_det.is_some() && (self.b2 < 0.0 || self.b2 > self.t2) {
            return Err(DaaError::InvalidWindow { name: "recovery", b: self.b2, t: self.t2 });
        }
        Ok(())
    }

    fn trajectory(&self, t: f64, dir: Side) -> (Vect3, Vect3) {
        self.sampler.sample(self.ownship, t, dir)
    }

    /// Discrete-chord velocity between samples `k` and `k+1`.
    fn linvel(&self, dir: Side, k: usize) -> Vect3 {
        let (s1, _) = self.trajectory((k + 1) as f64 * self.tstep, dir);
        let (s0, _) = self.trajectory(k as f64 * self.tstep, dir);
        s1.sub(s0).scal(1.0 / self.tstep)
    }

    /// Any intruder in loss of separation at the sampled time `tsk`.
    fn any_los_aircraft(&self, det: &dyn ConflictDetector, dir: Side, tsk: f64) -> bool {
        let (sot, vot) = self.trajectory(tsk, dir);
        self.traffic.iter().any(|ac| {
            let si = self.ownship.traffic_s(ac);
            let vi = self.ownship.traffic_v(ac);
            let sit = vi.scal_add(tsk, si);
            det.violation(sot, vot, sit, vi)
        })
    }

    /// Conflict with `ac` over the window remaining after `t`, starting from
    /// the sampled future state.
    fn cd_future_traj(
        &self,
        det: &dyn ConflictDetector,
        b: f64,
        t: f64,
        dir: Side,
        tsk: f64,
        ac: &TrafficState,
    ) -> bool {
        if tsk > t || b > t {
            return false;
        }
        let (sot, vot) = self.trajectory(tsk, dir);
        let si = self.ownship.traffic_s(ac);
        let vi = self.ownship.traffic_v(ac);
        let sit = vi.scal_add(tsk, si);
        det.conflict(sot, vot, sit, vi, (b - tsk).max(0.0), t - tsk).conflict
    }

    fn any_conflict_aircraft(
        &self,
        det: &dyn ConflictDetector,
        b: f64,
        t: f64,
        dir: Side,
        tsk: f64,
    ) -> bool {
        self.traffic.iter().any(|ac| self.cd_future_traj(det, b, t, dir, tsk, ac))
    }

    /// Conflict at `tsk` under the primary window or, when a recovery
    /// detector is present, its window.
    fn any_conflict(&self, dir: Side, tsk: f64) -> bool {
        self.any_conflict_aircraft(self.conflict_det, self.b, self.t, dir, tsk)
            || self
                .recovery_det
                .is_some_and(|det| self.any_conflict_aircraft(det, self.b2, self.t2, dir, tsk))
    }

    fn any_conflict_step(
        &self,
        det: &dyn ConflictDetector,
        b: f64,
        t: f64,
        dir: Side,
        max: usize,
    ) -> bool {
        (0..=max).any(|k| self.any_conflict_aircraft(det, b, t, dir, self.tstep * k as f64))
    }

    /// Horizontal repulsion against `ac` at step `k`.
    ///
    /// Step 0 holds by convention. Step 1 gates on the criterion at the
    /// initial state against the first chord. Every step from 1 on must then
    /// satisfy the criterion three ways at the sampled state: incoming chord
    /// against sampled velocity, sampled velocity against outgoing chord,
    /// and incoming against outgoing chord. The bracket of chords around the
    /// sample is what makes the discrete trajectory repulsive, so this must
    /// not collapse into a single criterion call.
    fn repulsive_at(&self, dir: Side, k: usize, ac: &TrafficState) -> bool {
        if k == 0 {
            return true;
        }
        let (so, vo) = self.trajectory(0.0, dir);
        let si = self.ownship.traffic_s(ac);
        let vi = self.ownship.traffic_v(ac);
        if k == 1
            && !self.criteria.horizontal_repulsive(
                so.sub(si),
                vo,
                vi,
                self.linvel(dir, 0),
                self.epsh,
            )
        {
            return false;
        }
        let tsk = k as f64 * self.tstep;
        let (sot, vot) = self.trajectory(tsk, dir);
        let st = sot.sub(vi.scal_add(tsk, si));
        let vop = self.linvel(dir, k - 1);
        let vok = self.linvel(dir, k);
        self.criteria.horizontal_repulsive(st, vop, vi, vot, self.epsh)
            && self.criteria.horizontal_repulsive(st, vot, vi, vok, self.epsh)
            && self.criteria.horizontal_repulsive(st, vop, vi, vok, self.epsh)
    }

    /// Vertical twin of [`repulsive_at`], same step structure.
    ///
    /// [`repulsive_at`]: BandsQuery::repulsive_at
    fn vert_repul_at(&self, dir: Side, k: usize, ac: &TrafficState) -> bool {
        if k == 0 {
            return true;
        }
        let (so, vo) = self.trajectory(0.0, dir);
        let si = self.ownship.traffic_s(ac);
        let vi = self.ownship.traffic_v(ac);
        if k == 1
            && !self.criteria.vertical_repulsive(
                so.sub(si),
                vo,
                vi,
                self.linvel(dir, 0),
                self.epsv,
            )
        {
            return false;
        }
        let tsk = k as f64 * self.tstep;
        let (sot, vot) = self.trajectory(tsk, dir);
        let st = sot.sub(vi.scal_add(tsk, si));
        let vop = self.linvel(dir, k - 1);
        let vok = self.linvel(dir, k);
        self.criteria.vertical_repulsive(st, vop, vi, vot, self.epsv)
            && self.criteria.vertical_repulsive(st, vot, vi, vok, self.epsv)
            && self.criteria.vertical_repulsive(st, vop, vi, vok, self.epsv)
    }

    /// Smallest step in `[0, max]` breaking horizontal repulsion.
    fn first_nonrepulsive_step(&self, dir: Side, max: usize, ac: &TrafficState) -> Option<usize> {
        (0..=max).find(|&k| !self.repulsive_at(dir, k, ac))
    }

    /// Smallest step in `[0, max]` breaking vertical repulsion.
    fn first_nonvert_repul_step(&self, dir: Side, max: usize, ac: &TrafficState) -> Option<usize> {
        (0..=max).find(|&k| !self.vert_repul_at(dir, k, ac))
    }

    /// Smallest step in `[min, max]` in loss of separation under `det`.
    fn first_los_step(
        &self,
        det: &dyn ConflictDetector,
        dir: Side,
        min: usize,
        max: usize,
    ) -> Option<usize> {
        (min..=max).find(|&k| self.any_los_aircraft(det, dir, self.tstep * k as f64))
    }

    /// First forbidden index: the earliest LOS under either detector within
    /// its window, or `max + 1` when every step stays clear.
    fn first_los_search_index(&self, dir: Side, max: usize) -> usize {
        // First k with k*tstep >= b, last k <= max with k*tstep <= t
        let k1 = (self.b / self.tstep).ceil() as usize;
        let n1 = ((self.t / self.tstep).floor() as usize).min(max);
        let k2 = (self.b2 / self.tstep).ceil() as usize;
        let n2 = ((self.t2 / self.tstep).floor() as usize).min(max);
        let first_los_init = self
            .recovery_det
            .and_then(|det| self.first_los_step(det, dir, k2, n2))
            .unwrap_or(max + 1);
        let first_los =
            self.first_los_step(self.conflict_det, dir, k1, n1).unwrap_or(max + 1);
        first_los_init.min(first_los)
    }

    /// First index forbidden by LOS or by a repulsion break.
    ///
    /// Repulsion is only scanned up to one below the current cutoff: it is
    /// cheaper than a LOS sweep and can only tighten the bound.
    fn bands_search_index(&self, dir: Side, max: usize) -> usize {
        let first_los = self.first_los_search_index(dir, max);
        let first_prob_hl = match self.repac.filter(|_| self.epsh != 0) {
            Some(ac) if first_los > 0 => {
                let first_non_h = self
                    .first_nonrepulsive_step(dir, first_los - 1, ac)
                    .unwrap_or(max + 1);
                first_los.min(first_non_h)
            }
            _ => first_los,
        };
        match self.repac.filter(|_| self.epsv != 0) {
            Some(ac) if first_prob_hl > 0 => {
                let first_non_v = self
                    .first_nonvert_repul_step(dir, first_prob_hl - 1, ac)
                    .unwrap_or(max + 1);
                first_prob_hl.min(first_non_v)
            }
            _ => first_prob_hl,
        }
    }

    /// Partition `[0, max]` into runs of consecutive conflict indices.
    ///
    /// Two-state scanner: a run opens at the first conflicting step and
    /// closes (emitting `[first, k-1]`) at the first clear one; a run still
    /// open at the end emits `[first, max]`.
    fn traj_conflict_only_bands(&self, dir: Side, max: usize) -> Vec<IntInterval> {
        let mut list = Vec::new();
        let mut first: Option<usize> = None;
        for k in 0..=max {
            let conflict = self.any_conflict(dir, self.tstep * k as f64);
            match first {
                Some(f) if !conflict => {
                    list.push(IntInterval::new(f as i64, k as i64 - 1));
                    first = None;
                }
                None if conflict => first = Some(k),
                _ => {}
            }
        }
        if let Some(f) = first {
            list.push(IntInterval::new(f as i64, max as i64));
        }
        list
    }

    /// Conflict bands on one side, cut at the first forbidden or
    /// non-repulsive step. An empty list with a zero cutoff means nothing on
    /// this side is reachable at all.
    fn kinematic_bands(&self, dir: Side, max: usize) -> Vec<IntInterval> {
        let bsi = self.bands_search_index(dir, max);
        if bsi == 0 {
            Vec::new()
        } else {
            self.traj_conflict_only_bands(dir, bsi - 1)
        }
    }

    /// Combined signed band list over `[-maxl, +maxr]`, index 0 meaning "no
    /// maneuver". Left indices are negated and the two sides coalesce at the
    /// seam when adjacent on the grid.
    pub fn kinematic_bands_combine(&self) -> Vec<IntInterval> {
        let mut left = self.kinematic_bands(Side::Left, self.maxl);
        let right = self.kinematic_bands(Side::Right, self.maxr);
        neg(&mut left);
        append_intband(&mut left, right);
        debug!(
            bands = left.len(),
            maxl = self.maxl,
            maxr = self.maxr,
            "combined kinematic bands"
        );
        left
    }

    /// Smallest step on `dir` that is clear of LOS (under both windowed
    /// detectors), satisfies the active repulsion checks, and has no
    /// conflict under either window. `None` as soon as a forbidden step is
    /// hit first, or when no such step exists.
    fn first_green(&self, dir: Side, max: usize) -> Option<usize> {
        let hcrit = self.repac.filter(|_| self.epsh != 0);
        let vcrit = self.repac.filter(|_| self.epsv != 0);
        for k in 0..=max {
            let tsk = self.tstep * k as f64;
            let los = (tsk >= self.b
                && tsk <= self.t
                && self.any_los_aircraft(self.conflict_det, dir, tsk))
                || self.recovery_det.is_some_and(|det| {
                    tsk >= self.b2 && tsk <= self.t2 && self.any_los_aircraft(det, dir, tsk)
                });
            if los
                || hcrit.is_some_and(|ac| !self.repulsive_at(dir, k, ac))
                || vcrit.is_some_and(|ac| !self.vert_repul_at(dir, k, ac))
            {
                return None;
            }
            if !self.any_conflict_aircraft(self.conflict_det, self.b, self.t, dir, tsk)
                && !self.recovery_det.is_some_and(|det| {
                    self.any_conflict_aircraft(det, self.b2, self.t2, dir, tsk)
                })
            {
                return Some(k);
            }
        }
        None
    }

    /// Some step in `[0, max]` on `dir` is red: it breaks an active
    /// repulsion check or conflicts under either detector's window.
    fn red_band_exist(&self, dir: Side, max: usize) -> bool {
        let hcrit = self.repac.filter(|_| self.epsh != 0);
        let vcrit = self.repac.filter(|_| self.epsv != 0);
        hcrit.is_some_and(|ac| self.first_nonrepulsive_step(dir, max, ac).is_some())
            || vcrit.is_some_and(|ac| self.first_nonvert_repul_step(dir, max, ac).is_some())
            || self.any_conflict_step(self.conflict_det, self.b, self.t, dir, max)
            || self.recovery_det.is_some_and(|det| {
                self.any_conflict_step(det, self.b2, self.t2, dir, max)
            })
    }

    /// Every reachable step on the requested side(s) is unsafe.
    pub fn all_int_red(&self, dir: SidePreference) -> bool {
        let left = !dir.allows(Side::Left) || self.first_green(Side::Left, self.maxl).is_none();
        let right = !dir.allows(Side::Right) || self.first_green(Side::Right, self.maxr).is_none();
        left && right
    }

    /// Some step on the requested side(s) is unsafe.
    pub fn any_int_red(&self, dir: SidePreference) -> bool {
        (dir.allows(Side::Left) && self.red_band_exist(Side::Left, self.maxl))
            || (dir.allows(Side::Right) && self.red_band_exist(Side::Right, self.maxr))
    }
}
