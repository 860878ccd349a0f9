//! Plain-component vector types for the local East-North-Up frame.
//!
//! Positions are meters, velocities meters per second. The x axis points
//! east, y north, z up.

use serde::{Deserialize, Serialize};

/// 2-D horizontal vector (east, north).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vect2 {
    pub x: f64,
    pub y: f64,
}

impl Vect2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn add(self, w: Vect2) -> Vect2 {
        Vect2::new(self.x + w.x, self.y + w.y)
    }

    pub fn sub(self, w: Vect2) -> Vect2 {
        Vect2::new(self.x - w.x, self.y - w.y)
    }

    pub fn scal(self, k: f64) -> Vect2 {
        Vect2::new(k * self.x, k * self.y)
    }

    pub fn dot(self, w: Vect2) -> f64 {
        self.x * w.x + self.y * w.y
    }

    /// 2-D cross product (determinant). Positive when `w` lies
    /// counterclockwise of `self`.
    pub fn det(self, w: Vect2) -> f64 {
        self.x * w.y - self.y * w.x
    }

    /// Squared norm.
    pub fn sqv(self) -> f64 {
        self.dot(self)
    }

    pub fn norm(self) -> f64 {
        self.sqv().sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// 3-D vector (east, north, up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vect3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vect3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn add(self, w: Vect3) -> Vect3 {
        Vect3::new(self.x + w.x, self.y + w.y, self.z + w.z)
    }

    pub fn sub(self, w: Vect3) -> Vect3 {
        Vect3::new(self.x - w.x, self.y - w.y, self.z - w.z)
    }

    pub fn scal(self, k: f64) -> Vect3 {
        Vect3::new(k * self.x, k * self.y, k * self.z)
    }

    /// `k * self + w`. The usual linear-propagation step: position `w`
    /// advanced for `k` seconds at velocity `self`.
    pub fn scal_add(self, k: f64, w: Vect3) -> Vect3 {
        Vect3::new(k * self.x + w.x, k * self.y + w.y, k * self.z + w.z)
    }

    pub fn dot(self, w: Vect3) -> f64 {
        self.x * w.x + self.y * w.y + self.z * w.z
    }

    pub fn sqv(self) -> f64 {
        self.dot(self)
    }

    pub fn norm(self) -> f64 {
        self.sqv().sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Horizontal projection.
    pub fn vect2(self) -> Vect2 {
        Vect2::new(self.x, self.y)
    }
}

/// Cylindrical norm with horizontal radius `d` and half-height `h`.
///
/// Dimensionless: the value is 1 exactly on the surface of the `(d, h)`
/// cylinder, below 1 inside it.
pub fn cyl_norm(v: Vect3, d: f64, h: f64) -> f64 {
    (v.vect2().norm() / d).max(v.z.abs() / h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_det_orientation() {
        let east = Vect2::new(1.0, 0.0);
        let north = Vect2::new(0.0, 1.0);
        // north is counterclockwise of east
        assert!(east.det(north) > 0.0);
        assert!(north.det(east) < 0.0);
    }

    #[test]
    fn test_scal_add_propagates_position() {
        let vel = Vect3::new(10.0, 0.0, -1.0);
        let pos = Vect3::new(100.0, 200.0, 50.0);
        let p = vel.scal_add(5.0, pos);
        assert_eq!(p, Vect3::new(150.0, 200.0, 45.0));
    }

    #[test]
    fn test_cyl_norm_boundary() {
        // On the rim of the cylinder the norm is exactly 1
        assert_eq!(cyl_norm(Vect3::new(152.4, 0.0, 0.0), 152.4, 30.48), 1.0);
        assert_eq!(cyl_norm(Vect3::new(0.0, 0.0, 30.48), 152.4, 30.48), 1.0);
        // Inside
        assert!(cyl_norm(Vect3::new(50.0, 0.0, 10.0), 152.4, 30.48) < 1.0);
    }

    #[test]
    fn test_cyl_norm_takes_worse_axis() {
        // Horizontally inside, vertically outside
        let n = cyl_norm(Vect3::new(10.0, 0.0, 100.0), 152.4, 30.48);
        assert!((n - 100.0 / 30.48).abs() < 1e-12);
    }
}
