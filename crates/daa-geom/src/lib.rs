//! DAA Geometry Kit - Vector math and interval sets for the advisory engine
//!
//! This crate contains the geometric primitives shared by the detect-and-avoid
//! core: 2-D/3-D vectors in a local Cartesian frame, the cylindrical
//! separation metric, angle normalization, precision-tolerant comparisons,
//! real interval sets, and geodetic projection helpers.
//! No networking, no I/O.

pub mod angles;
pub mod geodetic;
pub mod interval;
pub mod vect;

pub use angles::{almost_equals, to_2pi, TWO_PI};
pub use geodetic::LocalFrame;
pub use interval::{Interval, IntervalSet};
pub use vect::{cyl_norm, Vect2, Vect3};
