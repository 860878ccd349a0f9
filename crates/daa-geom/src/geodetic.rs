//! Geodetic to local East-North-Up conversion.
//!
//! The bands engine works in a flat Cartesian frame centered on a reference
//! point. These helpers project lat/lon/alt fixes into that frame using
//! latitude-aware meter-per-degree scaling (WGS84 series approximation),
//! which is accurate over the short ranges a DAA encounter spans.

use crate::vect::Vect3;
use serde::{Deserialize, Serialize};

/// Meters per degree of latitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lat(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_132.954 - 559.822 * (2.0 * lat_rad).cos() + 1.175 * (4.0 * lat_rad).cos()
        - 0.0023 * (6.0 * lat_rad).cos()
}

/// Meters per degree of longitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lon(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_412.84 * lat_rad.cos() - 93.5 * (3.0 * lat_rad).cos() + 0.118 * (5.0 * lat_rad).cos()
}

/// Reference point anchoring a local ENU frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalFrame {
    pub ref_lat_deg: f64,
    pub ref_lon_deg: f64,
    pub ref_alt_m: f64,
}

impl LocalFrame {
    pub fn new(ref_lat_deg: f64, ref_lon_deg: f64, ref_alt_m: f64) -> Self {
        Self { ref_lat_deg, ref_lon_deg, ref_alt_m }
    }

    /// Project a geodetic fix into frame coordinates (east, north, up) in
    /// meters.
    pub fn project(&self, lat_deg: f64, lon_deg: f64, alt_m: f64) -> Vect3 {
        let east = (lon_deg - self.ref_lon_deg) * meters_per_deg_lon(self.ref_lat_deg);
        let north = (lat_deg - self.ref_lat_deg) * meters_per_deg_lat(self.ref_lat_deg);
        Vect3::new(east, north, alt_m - self.ref_alt_m)
    }
}
