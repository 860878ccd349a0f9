//! Candidate maneuver trajectories.
//!
//! The bands core samples one family of maneuvers (turn, speed change,
//! vertical-rate change) at integer multiples of a step time, on both sides
//! of the current state. The family is injected through
//! [`TrajectorySampler`]; the samplers here cover the standard kinematic
//! maneuvers.

use crate::traffic::OwnshipState;
use daa_geom::Vect3;
use serde::{Deserialize, Serialize};

/// Side of the candidate maneuver relative to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Query-side filter for the boolean band queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidePreference {
    Left,
    Both,
    Right,
}

impl SidePreference {
    pub fn allows(self, side: Side) -> bool {
        match (self, side) {
            (SidePreference::Left, Side::Right) | (SidePreference::Right, Side::Left) => false,
            _ => true,
        }
    }
}

/// Samples the candidate maneuver at time `t >= 0`.
///
/// Deterministic; `sample(own, 0, dir)` must return the ownship's current
/// position and velocity.
pub trait TrajectorySampler {
    fn sample(&self, own: &OwnshipState, t: f64, dir: Side) -> (Vect3, Vect3);
}

/// Constant-rate, constant-speed level turn. `turn_rate` is rad/s, positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnSampler {
    pub turn_rate: f64,
}

impl TrajectorySampler for TurnSampler {
    fn sample(&self, own: &OwnshipState, t: f64, dir: Side) -> (Vect3, Vect3) {
        let pos = own.pos();
        let vel = own.vel();
        let gs = vel.vect2().norm();
        if gs == 0.0 {
            // No track to turn around; fall back to linear propagation
            return (vel.scal_add(t, pos), vel);
        }
        // Track angle from north, clockwise; right turn increases it
        let trk = vel.x.atan2(vel.y);
        let w = match dir {
            Side::Right => self.turn_rate,
            Side::Left => -self.turn_rate,
        };
        let nt = trk + w * t;
        let x = pos.x + gs / w * (trk.cos() - nt.cos());
        let y = pos.y + gs / w * (nt.sin() - trk.sin());
        let z = pos.z + vel.z * t;
        (Vect3::new(x, y, z), Vect3::new(gs * nt.sin(), gs * nt.cos(), vel.z))
    }
}

/// Straight-line ground-speed change along the current track, clamped at
/// standstill. Left decelerates, right accelerates. `accel` is m/s^2,
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSpeedSampler {
    pub accel: f64,
}

impl TrajectorySampler for GroundSpeedSampler {
    fn sample(&self, own: &OwnshipState, t: f64, dir: Side) -> (Vect3, Vect3) {
        let pos = own.pos();
        let vel = own.vel();
        let gs0 = vel.vect2().norm();
        if gs0 == 0.0 {
            // No track to accelerate along
            return (vel.scal_add(t, pos), vel);
        }
        let a = match dir {
            Side::Right => self.accel,
            Side::Left => -self.accel,
        };
        let stop = gs0 / self.accel;
        let (dist, gs) = if a < 0.0 && t >= stop {
            (0.5 * gs0 * stop, 0.0)
        } else {
            (gs0 * t + 0.5 * a * t * t, gs0 + a * t)
        };
        let ux = vel.x / gs0;
        let uy = vel.y / gs0;
        (
            Vect3::new(pos.x + ux * dist, pos.y + uy * dist, pos.z + vel.z * t),
            Vect3::new(ux * gs, uy * gs, vel.z),
        )
    }
}

/// Vertical-rate change at constant horizontal velocity. Left pushes the
/// rate down, right up. `vs_accel` is m/s^2, positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalSpeedSampler {
    pub vs_accel: f64,
}

impl TrajectorySampler for VerticalSpeedSampler {
    fn sample(&self, own: &OwnshipState, t: f64, dir: Side) -> (Vect3, Vect3) {
        let pos = own.pos();
        let vel = own.vel();
        let a = match dir {
            Side::Right => self.vs_accel,
            Side::Left => -self.vs_accel,
        };
        (
            Vect3::new(
                pos.x + vel.x * t,
                pos.y + vel.y * t,
                pos.z + vel.z * t + 0.5 * a * t * t,
            ),
            Vect3::new(vel.x, vel.y, vel.z + a * t),
        )
    }
}
