//! Aircraft states in the local Cartesian frame.

use daa_geom::{LocalFrame, Vect3};
use serde::{Deserialize, Serialize};

/// One aircraft's position and velocity in the shared ENU frame.
///
/// Immutable within a bands computation. "No candidate" is represented by
/// `Option<&TrafficState>` at the call sites, never by a sentinel value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficState {
    pub id: String,
    pub pos: Vect3,
    pub vel: Vect3,
}

impl TrafficState {
    pub fn new(id: impl Into<String>, pos: Vect3, vel: Vect3) -> Self {
        Self { id: id.into(), pos, vel }
    }

    /// Build a state from a geodetic fix projected into `frame`. Velocity is
    /// already ENU (east, north, up) in m/s.
    pub fn from_geodetic(
        id: impl Into<String>,
        frame: &LocalFrame,
        lat_deg: f64,
        lon_deg: f64,
        alt_m: f64,
        vel: Vect3,
    ) -> Self {
        Self { id: id.into(), pos: frame.project(lat_deg, lon_deg, alt_m), vel }
    }
}

/// The ownship, plus the frame hooks the core uses to read traffic in
/// ownship coordinates.
///
/// With every state already in one local Cartesian frame the hooks are the
/// identity; they stay as the seam where a projecting ownship (e.g. one that
/// re-centers the frame on itself each cycle) would plug in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnshipState {
    state: TrafficState,
}

impl OwnshipState {
    pub fn new(state: TrafficState) -> Self {
        Self { state }
    }

    pub fn id(&self) -> &str {
        &self.state.id
    }

    pub fn pos(&self) -> Vect3 {
        self.state.pos
    }

    pub fn vel(&self) -> Vect3 {
        self.state.vel
    }

    /// Project an absolute position into ownship-frame coordinates.
    pub fn pos_to_s(&self, pos: Vect3) -> Vect3 {
        pos
    }

    /// Project an absolute velocity into ownship-frame coordinates.
    pub fn vel_to_v(&self, _pos: Vect3, vel: Vect3) -> Vect3 {
        vel
    }

    /// Intruder position in ownship-frame coordinates.
    pub fn traffic_s(&self, ac: &TrafficState) -> Vect3 {
        self.pos_to_s(ac.pos)
    }

    /// Intruder velocity in ownship-frame coordinates.
    pub fn traffic_v(&self, ac: &TrafficState) -> Vect3 {
        self.vel_to_v(ac.pos, ac.vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daa_geom::LocalFrame;

    #[test]
    fn test_from_geodetic_projects_into_frame() {
        let frame = LocalFrame::new(33.68, -117.82, 0.0);
        let ac = TrafficState::from_geodetic("AC1", &frame, 33.68, -117.82, 120.0, Vect3::zero());
        assert!(ac.pos.vect2().norm() < 1e-9);
        assert_eq!(ac.pos.z, 120.0);
    }

    #[test]
    fn test_ownship_frame_hooks_are_identity() {
        let own = OwnshipState::new(TrafficState::new(
            "OWN",
            Vect3::new(1.0, 2.0, 3.0),
            Vect3::new(4.0, 5.0, 6.0),
        ));
        let ac = TrafficState::new("AC1", Vect3::new(10.0, 0.0, 0.0), Vect3::new(0.0, -5.0, 0.0));
        assert_eq!(own.traffic_s(&ac), ac.pos);
        assert_eq!(own.traffic_v(&ac), ac.vel);
    }
}
