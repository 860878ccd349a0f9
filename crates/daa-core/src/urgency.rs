//! Most-urgent intruder selection.
//!
//! Ranks intruders by distance at closest point of approach in the NMAC
//! cylindrical metric; time at closest approach breaks near-ties and takes
//! over entirely once an intruder is inside the minimum-recovery regime
//! (dcpa at or below the NMAC boundary).

use crate::config::DaaConfig;
use crate::detection::{tccpa, ConflictDetector};
use crate::traffic::{OwnshipState, TrafficState};
use daa_geom::{almost_equals, cyl_norm};
use tracing::debug;

/// Pick the most urgent intruder among those in conflict within `[0, t]`.
///
/// Returns `None` when no intruder is in conflict. The selection lattice:
/// an intruder with `dcpa <= 1` (inside the minimum-recovery regime) beats
/// any with `dcpa > 1`; between two in the regime the smaller `tcpa` wins,
/// with `dcpa` breaking near-ties; outside the regime the smaller `dcpa`
/// wins, with `tcpa` breaking near-ties. Near-ties are at 5-digit precision.
pub fn most_urgent<'a>(
    detector: &dyn ConflictDetector,
    ownship: &OwnshipState,
    traffic: &'a [TrafficState],
    t: f64,
    config: &DaaConfig,
) -> Option<&'a TrafficState> {
    let d = config.nmac_d;
    let h = config.nmac_h;
    let so = ownship.pos();
    let vo = ownship.vel();
    let mut repac: Option<&TrafficState> = None;
    let mut mindcpa = 0.0;
    let mut mintcpa = 0.0;
    for ac in traffic {
        let si = ownship.pos_to_s(ac.pos);
        let vi = ownship.vel_to_v(ac.pos, ac.vel);
        let s = so.sub(si);
        let v = vo.sub(vi);
        if !detector.conflict(so, vo, si, vi, 0.0, t).conflict {
            continue;
        }
        let tcpa = tccpa(s, vo, vi, d, h);
        let dcpa = cyl_norm(v.scal_add(tcpa, s), d, h);
        // Near-equal tcpa: fall back to the smaller dcpa, and vice versa
        let tcpa_strategy = if almost_equals(tcpa, mintcpa) { dcpa < mindcpa } else { tcpa < mintcpa };
        let dcpa_strategy = if almost_equals(dcpa, mindcpa) { tcpa < mintcpa } else { dcpa < mindcpa };
        let replace = match repac {
            None => true,
            Some(_) if dcpa <= 1.0 => mindcpa > 1.0 || tcpa_strategy,
            Some(_) => dcpa_strategy,
        };
        if replace {
            repac = Some(ac);
            mindcpa = dcpa;
            mintcpa = tcpa;
        }
    }
    debug!(
        urgent = repac.map(|ac| ac.id.as_str()),
        dcpa = mindcpa,
        tcpa = mintcpa,
        "most urgent intruder selection"
    );
    repac
}
