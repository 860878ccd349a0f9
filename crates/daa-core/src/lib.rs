//! DAA Core - Kinematic bands and urgency ranking for detect-and-avoid
//!
//! Given an ownship state, intruder traffic, and a conflict detector, this
//! crate computes which candidate maneuvers (left/right turn steps, speed
//! steps, vertical steps) stay clear of conflict over a look-ahead horizon,
//! and which single intruder is the most urgent one to maneuver against.
//! Pure logic with NO networking or I/O; all collaborators are injected
//! through narrow traits.

pub mod bands;
pub mod config;
pub mod criteria;
pub mod detection;
pub mod error;
pub mod intband;
pub mod maneuver;
pub mod traffic;
pub mod urgency;

pub use bands::BandsQuery;
pub use config::DaaConfig;
pub use criteria::{DivergenceCriteria, RepulsiveCriteria};
pub use detection::{tccpa, ConflictData, ConflictDetector, CylinderDetector};
pub use error::DaaError;
pub use intband::{append_intband, neg, to_interval_set, to_interval_set_0_2pi, IntInterval};
pub use maneuver::{
    GroundSpeedSampler, Side, SidePreference, TrajectorySampler, TurnSampler,
    VerticalSpeedSampler,
};
pub use traffic::{OwnshipState, TrafficState};
pub use urgency::most_urgent;
