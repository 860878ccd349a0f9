//! Engine configuration.

use crate::error::DaaError;
use serde::{Deserialize, Serialize};

/// NMAC cylinder dimensions used by the urgency metric.
///
/// `nmac_d` is the horizontal radius, `nmac_h` the half-height. Distances at
/// closest approach are measured in the cylindrical norm scaled by these, so
/// a value of 1 sits exactly on the NMAC boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaaConfig {
    /// NMAC horizontal radius in meters (500 ft)
    pub nmac_d: f64,
    /// NMAC vertical half-height in meters (100 ft)
    pub nmac_h: f64,
}

impl Default for DaaConfig {
    fn default() -> Self {
        Self { nmac_d: 152.4, nmac_h: 30.48 }
    }
}

impl DaaConfig {
    pub fn validate(&self) -> Result<(), DaaError> {
        if self.nmac_d <= 0.0 {
            return Err(DaaError::NonPositive { name: "nmac_d", value: self.nmac_d });
        }
        if self.nmac_h <= 0.0 {
            return Err(DaaError::NonPositive { name: "nmac_h", value: self.nmac_h });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DaaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_nonpositive_radius() {
        let cfg = DaaConfig { nmac_d: 0.0, nmac_h: 30.48 };
        assert_eq!(
            cfg.validate(),
            Err(DaaError::NonPositive { name: "nmac_d", value: 0.0 })
        );
    }
}
